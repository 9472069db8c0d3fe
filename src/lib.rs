// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod clients;
pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod post;
pub mod utils;

pub use clients::{
    Article, Encyclopedia, GoogleImageSearch, GoogleTrendsClient, ImageQuery, ImageSearch,
    NeutralTrendScorer, NoEncyclopedia, TrendScorer, WikipediaClient,
};
pub use config::{Config, SelectionStrategy};
pub use error::{PipelineError, Result};
pub use extractor::{EventExtractor, KeywordExtractor};
pub use models::{EnrichmentInfo, ImageResult, PLACES, Place};
pub use pipeline::{
    GenerateOptions, GenerateOutcome, PlaceEnricher, PlaceSelector, PostGenerator, ScoredPlace,
    run_generate, score_catalog,
};
pub use post::{Frontmatter, PostRenderer, PostWriter, generate_event_description, slugify};
pub use utils::Validator;
