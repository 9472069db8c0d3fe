// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod enrichment;
pub mod image;
pub mod place;

pub use enrichment::EnrichmentInfo;
pub use image::ImageResult;
pub use place::{PLACES, Place};
