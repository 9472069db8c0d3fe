// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

pub mod enricher;
pub mod generator;
pub mod images;
pub mod progress;
pub mod selector;

pub use enricher::PlaceEnricher;
pub use generator::{
    GenerateOptions, GenerateOutcome, PostGenerator, run_generate, score_catalog, select_place,
};
pub use images::ImageFinder;
pub use progress::{RunSummary, ScoringProgress};
pub use selector::{PlaceSelector, ScoredPlace, rank};
