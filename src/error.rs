// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API error: {message}")]
    Api { service: String, message: String },

    #[error("{service} rate limit exceeded")]
    RateLimited { service: String },

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Ambiguous page title: {0}")]
    Disambiguation(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Front matter error in {file}: {message}")]
    FrontMatter { file: String, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PipelineError {
    pub fn api(service: &str, message: impl Into<String>) -> Self {
        Self::Api {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn rate_limited(service: &str) -> Self {
        Self::RateLimited {
            service: service.to_string(),
        }
    }

    /// Wraps a reqwest error with the request URL removed, since query strings
    /// carry the API key.
    pub fn http(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = PipelineError::api("Custom Search", "quota exceeded");
        assert_eq!(err.to_string(), "Custom Search API error: quota exceeded");
    }

    #[test]
    fn test_rate_limited_display() {
        let err = PipelineError::rate_limited("Google Trends");
        assert_eq!(err.to_string(), "Google Trends rate limit exceeded");
    }
}
