// file: src/pipeline/enricher.rs
// description: derives summary, keywords and historical events for a place
// reference: encyclopedia lookup with graceful degradation

use crate::clients::{Article, Encyclopedia};
use crate::error::{PipelineError, Result};
use crate::extractor::{EventExtractor, KeywordExtractor};
use crate::models::{EnrichmentInfo, Place};
use tracing::{debug, info, warn};

pub struct PlaceEnricher<'a> {
    encyclopedia: &'a dyn Encyclopedia,
    keywords: KeywordExtractor,
    events: EventExtractor,
}

impl<'a> PlaceEnricher<'a> {
    pub fn new(encyclopedia: &'a dyn Encyclopedia) -> Self {
        Self {
            encyclopedia,
            keywords: KeywordExtractor::new(),
            events: EventExtractor::new(),
        }
    }

    /// Lookup failures of any kind produce an empty `EnrichmentInfo`.
    pub async fn enrich(&self, place: &Place) -> EnrichmentInfo {
        match self.lookup(place).await {
            Ok(article) => {
                let info = self.from_article(place, &article);
                info!(
                    "Enriched {}: {} keywords, {} historical events",
                    place.name,
                    info.keywords.len(),
                    info.historical_events.len()
                );
                info
            }
            Err(PipelineError::PageNotFound(title)) => {
                warn!("No encyclopedia page for {}", title);
                EnrichmentInfo::default()
            }
            Err(PipelineError::Disambiguation(title)) => {
                warn!("Encyclopedia title {} is ambiguous", title);
                EnrichmentInfo::default()
            }
            Err(e) => {
                warn!("Encyclopedia lookup for {} failed: {}", place.name, e);
                EnrichmentInfo::default()
            }
        }
    }

    /// Bare name first; an ambiguous name is retried as "<name>, <location>".
    async fn lookup(&self, place: &Place) -> Result<Article> {
        match self.encyclopedia.lookup(place.name).await {
            Err(PipelineError::Disambiguation(title)) if place.has_location() => {
                let qualified = qualified_title(place);
                debug!("{} is ambiguous, trying {}", title, qualified);
                self.encyclopedia.lookup(&qualified).await
            }
            other => other,
        }
    }

    pub fn from_article(&self, place: &Place, article: &Article) -> EnrichmentInfo {
        if article.summary.is_empty() && article.full_text.is_empty() {
            debug!("Empty article for {}", place.name);
            return EnrichmentInfo::default();
        }

        let full_text = if article.full_text.is_empty() {
            article.summary.clone()
        } else {
            article.full_text.clone()
        };

        let keyword_source = format!("{} {}", article.summary, full_text);

        EnrichmentInfo {
            summary: article.summary.clone(),
            keywords: self.keywords.extract(&keyword_source),
            historical_events: self.events.extract(&full_text, place.name),
            full_text,
        }
    }
}

fn qualified_title(place: &Place) -> String {
    format!("{}, {}", place.name, place.location.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::NoEncyclopedia;
    use async_trait::async_trait;

    struct StubEncyclopedia(fn(&str) -> Result<Article>);

    #[async_trait]
    impl Encyclopedia for StubEncyclopedia {
        async fn lookup(&self, title: &str) -> Result<Article> {
            (self.0)(title)
        }
    }

    fn centralia_article(title: &str) -> Result<Article> {
        Ok(Article {
            title: title.to_string(),
            summary: "Centralia is a borough and near-ghost town in Pennsylvania.".to_string(),
            full_text: "Centralia was founded as a mining settlement in 1866. \
                A coal mine fire has burned beneath Centralia since 1962. \
                Most residents left."
                .to_string(),
        })
    }

    #[tokio::test]
    async fn test_enrich_from_article() {
        let encyclopedia = StubEncyclopedia(centralia_article);
        let enricher = PlaceEnricher::new(&encyclopedia);
        let place = Place::find("Centralia").unwrap();

        let info = enricher.enrich(&place).await;

        assert!(info.summary.starts_with("Centralia is a borough"));
        assert!(info.keywords.contains(&"ghost town".to_string()));
        assert!(info.keywords.contains(&"mining".to_string()));
        assert!(info.keywords.len() <= 5);
        assert_eq!(info.historical_events.len(), 2);
        assert!(info.full_text.contains("Most residents left."));
    }

    #[tokio::test]
    async fn test_enrich_degrades_on_errors() {
        let place = Place::find("Craco").unwrap();

        for failure in [
            (|t: &str| Err(PipelineError::PageNotFound(t.to_string()))) as fn(&str) -> Result<Article>,
            |t: &str| Err(PipelineError::Disambiguation(t.to_string())),
            |_: &str| Err(PipelineError::rate_limited("Wikipedia")),
        ] {
            let encyclopedia = StubEncyclopedia(failure);
            let info = PlaceEnricher::new(&encyclopedia).enrich(&place).await;
            assert!(info.is_empty());
        }
    }

    fn bodie_article(title: &str) -> Result<Article> {
        match title {
            "Bodie, California, USA" => Ok(Article {
                title: "Bodie, California".to_string(),
                summary: "Bodie is a ghost town in the Bodie Hills.".to_string(),
                full_text: "Bodie was founded after gold was discovered there in 1859.".to_string(),
            }),
            other => Err(PipelineError::Disambiguation(other.to_string())),
        }
    }

    #[tokio::test]
    async fn test_ambiguous_name_retried_with_location() {
        let encyclopedia = StubEncyclopedia(bodie_article);
        let info = PlaceEnricher::new(&encyclopedia)
            .enrich(&Place::find("Bodie").unwrap())
            .await;

        assert_eq!(info.summary, "Bodie is a ghost town in the Bodie Hills.");
        assert!(info.keywords.contains(&"ghost town".to_string()));
        assert_eq!(info.historical_events.len(), 1);
    }

    #[tokio::test]
    async fn test_ambiguous_name_without_location_gives_up() {
        let encyclopedia = StubEncyclopedia(bodie_article);
        let place = Place::new("Bodie", "", "A ghost town.");

        let info = PlaceEnricher::new(&encyclopedia).enrich(&place).await;
        assert!(info.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_encyclopedia_yields_empty_info() {
        let enricher = PlaceEnricher::new(&NoEncyclopedia);
        let info = enricher.enrich(&Place::find("Bodie").unwrap()).await;
        assert_eq!(info, EnrichmentInfo::default());
    }

    #[test]
    fn test_summary_only_article() {
        let enricher = PlaceEnricher::new(&NoEncyclopedia);
        let place = Place::find("Varosha").unwrap();
        let article = Article {
            title: "Varosha".to_string(),
            summary: "Varosha was abandoned after the Turkish invasion of Cyprus in 1974.".to_string(),
            full_text: String::new(),
        };

        let info = enricher.from_article(&place, &article);
        assert_eq!(info.full_text, article.summary);
        assert_eq!(info.historical_events.len(), 1);
    }
}
