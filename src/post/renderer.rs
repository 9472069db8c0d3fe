// file: src/post/renderer.rs
// description: assembles front matter and markdown body for a place post
// reference: jekyll post layout with yaml front matter

use crate::config::OutputConfig;
use crate::error::Result;
use crate::models::{EnrichmentInfo, ImageResult, Place};
use crate::post::description::generate_event_description;
use crate::post::frontmatter::Frontmatter;
use crate::post::slug::post_filename;
use crate::post::template::PostTemplate;
use chrono::NaiveDateTime;
use std::collections::HashMap;

const BASE_TAGS: [&str; 2] = ["abandoned places", "current state"];

#[derive(Debug, Clone)]
pub struct RenderedPost {
    pub filename: String,
    pub frontmatter: Frontmatter,
    pub body: String,
}

impl RenderedPost {
    pub fn to_markdown(&self) -> Result<String> {
        self.frontmatter.render_document(&self.body)
    }
}

/// Everything a post is assembled from.
#[derive(Debug, Clone, Copy)]
pub struct PostInputs<'a> {
    pub place: &'a Place,
    pub enrichment: &'a EnrichmentInfo,
    pub current_images: &'a [ImageResult],
    pub historical_images: &'a [ImageResult],
    pub date: NaiveDateTime,
}

pub struct PostRenderer {
    template: PostTemplate,
    categories: Vec<String>,
    max_event_length: usize,
    date_restrict_days: u32,
}

impl PostRenderer {
    pub fn new(output: &OutputConfig, date_restrict_days: u32) -> Self {
        Self {
            template: PostTemplate::new(),
            categories: output.categories.clone(),
            max_event_length: output.max_event_length,
            date_restrict_days,
        }
    }

    pub fn with_template(mut self, template: PostTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn render(&self, inputs: PostInputs<'_>) -> RenderedPost {
        let place = inputs.place;
        let title = format!("The Current State of {}", place.name);

        let frontmatter = Frontmatter {
            title: title.clone(),
            date: inputs.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            categories: self.categories.clone(),
            tags: build_tags(place, &inputs.enrichment.keywords),
        };

        let mut values: HashMap<&str, String> = HashMap::new();
        values.insert("title", title);
        values.insert("location_suffix", place.location_suffix());
        values.insert("name", place.name.to_string());
        values.insert("description", place.description.to_string());
        values.insert("summary", inputs.enrichment.summary.trim().to_string());
        values.insert("events", self.events_section(place, &inputs.enrichment.historical_events));
        values.insert(
            "historical_images",
            image_gallery(place, inputs.historical_images, "historical image"),
        );
        values.insert("current_images", self.current_images_section(place, inputs.current_images));
        values.insert("attribution", self.attribution(inputs.enrichment));

        RenderedPost {
            filename: post_filename(inputs.date.date(), place.name),
            frontmatter,
            body: self.template.render(&values),
        }
    }

    fn events_section(&self, place: &Place, events: &[String]) -> String {
        if events.is_empty() {
            return format!("No documented historical events were found for {}.", place.name);
        }

        events
            .iter()
            .map(|event| {
                format!(
                    "- {}",
                    generate_event_description(event, place.name, self.max_event_length)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn current_images_section(&self, place: &Place, images: &[ImageResult]) -> String {
        if images.is_empty() {
            return format!(
                "No recent images of {} were found. Check back later for updates.",
                place.name
            );
        }

        image_gallery(place, images, "image")
    }

    fn attribution(&self, enrichment: &EnrichmentInfo) -> String {
        let mut line = format!(
            "*This post was generated using Google Custom Search API, searching for images from within the last {} days.",
            self.date_restrict_days
        );
        if !enrichment.summary.is_empty() {
            line.push_str(" Background information from Wikipedia.");
        }
        line.push('*');
        line
    }
}

fn image_gallery(place: &Place, images: &[ImageResult], label: &str) -> String {
    images
        .iter()
        .enumerate()
        .map(|(i, image)| {
            format!(
                "![{} {} {}]({})\n\n*{}*",
                place.name,
                label,
                i + 1,
                image.url,
                image.caption()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Name, base tags, location, then keywords; duplicates dropped case-insensitively.
fn build_tags(place: &Place, keywords: &[String]) -> Vec<String> {
    let mut candidates: Vec<String> = vec![place.name.to_string()];
    candidates.extend(BASE_TAGS.iter().map(|t| t.to_string()));
    if place.has_location() {
        candidates.push(place.location.trim().to_string());
    }
    candidates.extend(keywords.iter().cloned());

    let mut tags: Vec<String> = Vec::new();
    for tag in candidates {
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap()
    }

    fn renderer() -> PostRenderer {
        let config = Config::default_config();
        PostRenderer::new(&config.output, config.search.date_restrict_days)
    }

    fn bodie() -> Place {
        Place::find("Bodie").unwrap()
    }

    #[test]
    fn test_render_full_post() {
        let place = bodie();
        let enrichment = EnrichmentInfo {
            summary: "Bodie is a ghost town in the Bodie Hills.".to_string(),
            keywords: vec!["ghost town".to_string(), "gold".to_string(), "abandoned places".to_string()],
            full_text: String::new(),
            historical_events: vec!["Bodie boomed after gold was found in 1876".to_string()],
        };
        let current = vec![ImageResult::new("https://img.example/1.jpg", "Main street")];
        let historical = vec![ImageResult::new("https://img.example/old.jpg", "Bodie in 1890")];

        let post = renderer().render(PostInputs {
            place: &place,
            enrichment: &enrichment,
            current_images: &current,
            historical_images: &historical,
            date: date(),
        });

        assert_eq!(post.filename, "2024-05-01-bodie.md");
        assert_eq!(post.frontmatter.title, "The Current State of Bodie");
        assert_eq!(post.frontmatter.date, "2024-05-01 08:15:00");
        assert_eq!(post.frontmatter.categories, vec!["Place Exploration"]);
        assert_eq!(
            post.frontmatter.tags,
            vec!["Bodie", "abandoned places", "current state", "California, USA", "ghost town", "gold"]
        );

        let body = &post.body;
        assert!(body.starts_with("# The Current State of Bodie (California, USA)\n"));
        assert!(body.contains("Bodie is a ghost town in the Bodie Hills."));
        assert!(body.contains("### Historical Events\n\n- Bodie boomed after gold was found in 1876\n"));
        assert!(body.contains("![Bodie historical image 1](https://img.example/old.jpg)\n\n*Bodie in 1890*"));
        assert!(body.contains("## Current State\n\n![Bodie image 1](https://img.example/1.jpg)\n\n*Main street*"));
        assert!(body.contains("## Conclusion"));
        assert!(body.contains("Background information from Wikipedia."));
        assert!(!body.contains("\n\n\n"));
        assert!(!body.contains('{'));
    }

    #[test]
    fn test_render_placeholders_when_nothing_found() {
        let place = bodie();
        let post = renderer().render(PostInputs {
            place: &place,
            enrichment: &EnrichmentInfo::default(),
            current_images: &[],
            historical_images: &[],
            date: date(),
        });

        assert!(post.body.contains("No documented historical events were found for Bodie."));
        assert!(post.body.contains("No recent images of Bodie were found."));
        assert!(!post.body.contains("Wikipedia"));
        assert_eq!(post.frontmatter.tags.len(), 4);
    }

    #[test]
    fn test_long_events_are_truncated() {
        let place = bodie();
        let mut config = Config::default_config();
        config.output.max_event_length = 40;
        let renderer = PostRenderer::new(&config.output, 30);
        let enrichment = EnrichmentInfo {
            historical_events: vec!["Bodie ".repeat(30)],
            ..Default::default()
        };

        let post = renderer.render(PostInputs {
            place: &place,
            enrichment: &enrichment,
            current_images: &[],
            historical_images: &[],
            date: date(),
        });

        let event_line = post
            .body
            .lines()
            .find(|line| line.starts_with("- "))
            .unwrap();
        assert!(event_line.chars().count() <= 42);
        assert!(event_line.ends_with("..."));
    }

    #[test]
    fn test_markdown_document() {
        let place = bodie();
        let post = renderer().render(PostInputs {
            place: &place,
            enrichment: &EnrichmentInfo::default(),
            current_images: &[],
            historical_images: &[],
            date: date(),
        });

        let markdown = post.to_markdown().unwrap();
        assert!(markdown.starts_with("---\ntitle: The Current State of Bodie\n"));
        assert!(markdown.contains("\n---\n\n# The Current State of Bodie"));
    }
}
