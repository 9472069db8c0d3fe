// file: src/extractor/mod.rs
// description: keyword and historical event extraction module exports
// reference: internal module structure

pub mod events;
pub mod keywords;
pub mod patterns;

pub use events::{EventExtractor, extract_historical_events, split_sentences};
pub use keywords::{KeywordExtractor, extract_keywords};
