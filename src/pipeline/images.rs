// file: src/pipeline/images.rs
// description: builds image search queries for a place and collects deduplicated results
// reference: sequential search calls with a fixed delay between them

use crate::clients::{ImageQuery, ImageSearch};
use crate::config::SearchConfig;
use crate::extractor::KeywordExtractor;
use crate::models::{ImageResult, Place};
use crate::utils::Validator;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct ImageFinder<'a> {
    search: &'a dyn ImageSearch,
    num_results: usize,
    historical_results: usize,
    keyword_queries: usize,
    request_delay: Duration,
}

impl<'a> ImageFinder<'a> {
    pub fn new(search: &'a dyn ImageSearch, config: &SearchConfig) -> Self {
        Self {
            search,
            num_results: config.num_results,
            historical_results: config.historical_results,
            keyword_queries: config.keyword_queries,
            request_delay: config.request_delay(),
        }
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Base query first, then one refinement per leading keyword. Keywords
    /// come from the place description when enrichment found none.
    pub fn current_state_queries(&self, place: &Place, keywords: &[String]) -> Vec<String> {
        let subject = subject(place);
        let mut queries = vec![format!("{} current state abandoned", subject)];

        let derived;
        let keywords: &[String] = if keywords.is_empty() {
            derived = KeywordExtractor::new().extract(place.description);
            &derived
        } else {
            keywords
        };

        for keyword in keywords.iter().take(self.keyword_queries) {
            let query = format!("{} {}", subject, keyword);
            if !queries.contains(&query) {
                queries.push(query);
            }
        }

        queries
    }

    pub fn historical_query(&self, place: &Place) -> String {
        format!("{} history", subject(place))
    }

    /// Runs queries in order until enough images are collected. A failed
    /// query is logged and skipped.
    pub async fn find_current(&self, place: &Place, keywords: &[String]) -> Vec<ImageResult> {
        let queries = self.current_state_queries(place, keywords);
        let mut images: Vec<ImageResult> = Vec::new();

        for (index, text) in queries.into_iter().enumerate() {
            if images.len() >= self.num_results {
                break;
            }
            if index > 0 {
                self.pause().await;
            }

            let query = ImageQuery {
                text,
                num_results: self.num_results,
                recent_only: true,
            };
            let found = self.run_query(&query).await;
            merge_unique(&mut images, found, self.num_results);
        }

        info!("Found {} current images of {}", images.len(), place.name);
        images
    }

    pub async fn find_historical(&self, place: &Place) -> Vec<ImageResult> {
        if self.historical_results == 0 {
            return Vec::new();
        }

        self.pause().await;

        let query = ImageQuery {
            text: self.historical_query(place),
            num_results: self.historical_results,
            recent_only: false,
        };

        let mut images = Vec::new();
        merge_unique(&mut images, self.run_query(&query).await, self.historical_results);
        info!("Found {} historical images of {}", images.len(), place.name);
        images
    }

    async fn run_query(&self, query: &ImageQuery) -> Vec<ImageResult> {
        match self.search.search_images(query).await {
            Ok(images) => images,
            Err(e) => {
                warn!("Image search for '{}' failed: {}", query.text, e);
                Vec::new()
            }
        }
    }

    async fn pause(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }
}

fn subject(place: &Place) -> String {
    format!("{} {}", place.name, place.location).trim().to_string()
}

fn merge_unique(images: &mut Vec<ImageResult>, found: Vec<ImageResult>, limit: usize) {
    for image in found {
        if images.len() >= limit {
            break;
        }
        if let Err(e) = Validator::validate_image(&image) {
            debug!("Dropping image: {}", e);
            continue;
        }
        if images.iter().any(|existing| existing.url == image.url) {
            continue;
        }
        images.push(image);
    }
}
