// file: src/utils/validation.rs
// description: input validation for places, search results and output paths
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use crate::models::{ImageResult, Place};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_place(place: &Place) -> Result<()> {
        if place.name.trim().is_empty() {
            return Err(PipelineError::Validation("Place name is empty".to_string()));
        }

        if place.description.trim().is_empty() {
            return Err(PipelineError::Validation(format!(
                "Place {} has no description",
                place.name
            )));
        }

        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PipelineError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Existing path must be a directory; a missing one is created on write.
    pub fn validate_output_dir(path: &Path) -> Result<()> {
        if path.exists() && !path.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Output path is not a directory: {}",
                path.display()
            )));
        }
        Ok(())
    }

    pub fn validate_markdown_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") | Some("markdown") => Ok(()),
            _ => Err(PipelineError::Validation(format!(
                "File is not a markdown file: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// Images must carry an http(s) link and nothing that breaks `![..](url)`.
    pub fn validate_image(image: &ImageResult) -> Result<()> {
        Self::validate_url(&image.url)?;

        if image.url.chars().any(|c| c.is_whitespace() || c == ')') {
            return Err(PipelineError::Validation(format!(
                "Image URL cannot be embedded in markdown: {}",
                image.url
            )));
        }

        Ok(())
    }
}
