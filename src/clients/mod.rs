// file: src/clients/mod.rs
// description: external service capabilities and their no-op implementations
// reference: https://docs.rs/async-trait

pub mod encyclopedia;
pub mod search;
pub mod trends;

use crate::error::Result;
use crate::models::ImageResult;
use async_trait::async_trait;

pub use encyclopedia::WikipediaClient;
pub use search::GoogleImageSearch;
pub use trends::GoogleTrendsClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    pub text: String,
    pub num_results: usize,
    /// Restrict to the configured recent window
    pub recent_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub full_text: String,
}

#[async_trait]
pub trait ImageSearch: Send + Sync {
    async fn search_images(&self, query: &ImageQuery) -> Result<Vec<ImageResult>>;
}

#[async_trait]
pub trait Encyclopedia: Send + Sync {
    async fn lookup(&self, title: &str) -> Result<Article>;
}

/// Popularity of a search term, 0 to 100.
#[async_trait]
pub trait TrendScorer: Send + Sync {
    async fn score(&self, term: &str) -> Result<u8>;
}

/// Used when encyclopedia enrichment is disabled.
pub struct NoEncyclopedia;

#[async_trait]
impl Encyclopedia for NoEncyclopedia {
    async fn lookup(&self, _title: &str) -> Result<Article> {
        Ok(Article::default())
    }
}

/// Scores every term with the same default, which selection treats as "no signal".
pub struct NeutralTrendScorer {
    score: u8,
}

impl NeutralTrendScorer {
    pub fn new(score: u8) -> Self {
        Self { score }
    }
}

#[async_trait]
impl TrendScorer for NeutralTrendScorer {
    async fn score(&self, _term: &str) -> Result<u8> {
        Ok(self.score)
    }
}
