// file: src/clients/encyclopedia.rs
// description: Wikipedia client for page summaries and plain-text extracts
// reference: https://en.wikipedia.org/api/rest_v1/ and https://www.mediawiki.org/wiki/Extension:TextExtracts

use crate::clients::{Article, Encyclopedia};
use crate::config::EncyclopediaConfig;
use crate::error::{PipelineError, Result};
use crate::extractor::patterns::{normalize_whitespace, strip_section_headings};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};

const SERVICE: &str = "Wikipedia";

pub struct WikipediaClient {
    client: Client,
    rest_base: String,
    action_endpoint: String,
}

impl WikipediaClient {
    pub fn new(config: &EncyclopediaConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(PipelineError::http)?;

        let host = format!("https://{}.wikipedia.org", config.language);

        Ok(Self {
            client,
            rest_base: format!("{}/api/rest_v1/page/summary/", host),
            action_endpoint: format!("{}/w/api.php", host),
        })
    }

    fn summary_url(&self, title: &str) -> Result<Url> {
        let mut url = Url::parse(&self.rest_base)
            .map_err(|e| PipelineError::Config(format!("Invalid encyclopedia URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| PipelineError::Config("Encyclopedia URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(&page_key(title));

        Ok(url)
    }

    async fn fetch_summary(&self, title: &str) -> Result<(String, String)> {
        let url = self.summary_url(title)?;
        debug!("Fetching summary: {}", url);

        let response = self.client.get(url).send().await.map_err(PipelineError::http)?;
        let status = response.status();

        match status {
            StatusCode::NOT_FOUND => return Err(PipelineError::PageNotFound(title.to_string())),
            StatusCode::TOO_MANY_REQUESTS => return Err(PipelineError::rate_limited(SERVICE)),
            s if !s.is_success() => {
                return Err(PipelineError::api(SERVICE, format!("summary status {}", s)));
            }
            _ => {}
        }

        let body: Value = response.json().await.map_err(PipelineError::http)?;
        parse_summary(&body, title)
    }

    async fn fetch_full_text(&self, title: &str) -> Result<String> {
        let params = [
            ("action", "query"),
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("format", "json"),
            ("formatversion", "2"),
            ("titles", title),
        ];

        let response = self
            .client
            .get(&self.action_endpoint)
            .query(&params)
            .send()
            .await
            .map_err(PipelineError::http)?;

        if !response.status().is_success() {
            return Err(PipelineError::api(
                SERVICE,
                format!("extract status {}", response.status()),
            ));
        }

        let body: Value = response.json().await.map_err(PipelineError::http)?;
        parse_extract(&body, title)
    }
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn lookup(&self, title: &str) -> Result<Article> {
        let (resolved_title, summary) = self.fetch_summary(title).await?;

        let full_text = match self.fetch_full_text(&resolved_title).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => summary.clone(),
            Err(e) => {
                warn!("Full text for {} unavailable, using summary: {}", resolved_title, e);
                summary.clone()
            }
        };

        Ok(Article {
            title: resolved_title,
            summary,
            full_text,
        })
    }
}

/// REST page keys use underscores for spaces.
fn page_key(title: &str) -> String {
    normalize_whitespace(title).replace(' ', "_")
}

/// `(title, extract)` from a REST summary payload.
pub fn parse_summary(body: &Value, requested: &str) -> Result<(String, String)> {
    if body.get("type").and_then(Value::as_str) == Some("disambiguation") {
        return Err(PipelineError::Disambiguation(requested.to_string()));
    }

    let title = body
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(requested)
        .to_string();

    let extract = body
        .get("extract")
        .and_then(Value::as_str)
        .map(normalize_whitespace)
        .unwrap_or_default();

    Ok((title, extract))
}

/// Plain-text page body from an action API `prop=extracts` payload, with
/// section headings removed.
pub fn parse_extract(body: &Value, requested: &str) -> Result<String> {
    let page = body
        .pointer("/query/pages/0")
        .ok_or_else(|| PipelineError::PageNotFound(requested.to_string()))?;

    if page.get("missing").and_then(Value::as_bool).unwrap_or(false) {
        return Err(PipelineError::PageNotFound(requested.to_string()));
    }

    let extract = page.get("extract").and_then(Value::as_str).unwrap_or_default();
    Ok(strip_section_headings(extract).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    #[test]
    fn test_summary_url_encodes_title() {
        let client = WikipediaClient::new(&Config::default_config().encyclopedia).unwrap();
        let url = client.summary_url("Oradour-sur-Glane").unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Oradour-sur-Glane"
        );

        let url = client.summary_url("Hashima  Island").unwrap();
        assert!(url.as_str().ends_with("/summary/Hashima_Island"));
    }

    #[test]
    fn test_parse_summary() {
        let body = json!({
            "type": "standard",
            "title": "Bodie, California",
            "extract": "Bodie is a ghost town\nin the Bodie Hills."
        });

        let (title, extract) = parse_summary(&body, "Bodie").unwrap();
        assert_eq!(title, "Bodie, California");
        assert_eq!(extract, "Bodie is a ghost town in the Bodie Hills.");
    }

    #[test]
    fn test_parse_summary_disambiguation() {
        let body = json!({"type": "disambiguation", "title": "Craco"});
        assert!(matches!(
            parse_summary(&body, "Craco"),
            Err(PipelineError::Disambiguation(_))
        ));
    }

    #[test]
    fn test_parse_extract() {
        let body = json!({
            "query": {
                "pages": [{
                    "title": "Centralia, Pennsylvania",
                    "extract": "Centralia is a borough.\n\n== History ==\nThe mine fire began in 1962."
                }]
            }
        });

        let text = parse_extract(&body, "Centralia").unwrap();
        assert!(!text.contains("=="));
        assert!(text.contains("The mine fire began in 1962."));
    }

    #[test]
    fn test_parse_extract_missing_page() {
        let body = json!({"query": {"pages": [{"title": "Nowhere", "missing": true}]}});
        assert!(matches!(
            parse_extract(&body, "Nowhere"),
            Err(PipelineError::PageNotFound(_))
        ));
        assert!(parse_extract(&json!({}), "Nowhere").is_err());
    }
}
