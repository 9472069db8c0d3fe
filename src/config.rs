// file: src/config.rs
// description: application configuration management with toml and environment support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use clap::ValueEnum;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const ENGINE_ID_ENV: &str = "GOOGLE_CSE_ID";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub encyclopedia: EncyclopediaConfig,
    pub trends: TrendsConfig,
    pub selection: SelectionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub engine_id: Option<String>,
    pub num_results: usize,
    pub historical_results: usize,
    pub keyword_queries: usize,
    pub date_restrict_days: u32,
    pub timeout_secs: u64,
    pub request_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EncyclopediaConfig {
    pub enabled: bool,
    pub language: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrendsConfig {
    pub enabled: bool,
    pub timeframe: String,
    pub geo: String,
    pub default_score: u8,
    pub timeout_secs: u64,
    pub request_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionConfig {
    pub strategy: SelectionStrategy,
    pub top_candidates: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub posts_dir: PathBuf,
    /// Markdown body template; the built-in one when unset
    pub template: Option<PathBuf>,
    pub max_event_length: usize,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStrategy {
    /// Uniform choice over the catalog
    #[default]
    Random,
    /// Highest trend score wins
    Trending,
    /// Score-weighted choice among the top candidates
    Weighted,
}

impl SelectionStrategy {
    pub fn needs_scores(self) -> bool {
        !matches!(self, Self::Random)
    }
}

/// Validated Custom Search credentials.
#[derive(Debug, Clone)]
pub struct SearchCredentials {
    pub api_key: String,
    pub engine_id: String,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix("PLACE_CHRONICLE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("search.api_key", non_empty_env(API_KEY_ENV))
            .and_then(|builder| {
                builder.set_override_option("search.engine_id", non_empty_env(ENGINE_ID_ENV))
            })
            .and_then(|builder| builder.build())
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            search: SearchConfig {
                endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
                api_key: None,
                engine_id: None,
                num_results: 5,
                historical_results: 3,
                keyword_queries: 2,
                date_restrict_days: 30,
                timeout_secs: 10,
                request_delay_ms: 1000,
            },
            encyclopedia: EncyclopediaConfig {
                enabled: true,
                language: "en".to_string(),
                user_agent: format!(
                    "place_chronicle/{} (https://github.com/cipher_rc5/place_chronicle)",
                    env!("CARGO_PKG_VERSION")
                ),
                timeout_secs: 10,
            },
            trends: TrendsConfig {
                enabled: true,
                timeframe: "today 3-m".to_string(),
                geo: String::new(),
                default_score: 50,
                timeout_secs: 10,
                request_delay_ms: 2000,
            },
            selection: SelectionConfig {
                strategy: SelectionStrategy::Random,
                top_candidates: 5,
            },
            output: OutputConfig {
                posts_dir: PathBuf::from("_posts"),
                template: None,
                max_event_length: 200,
                categories: vec!["Place Exploration".to_string()],
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if !(1..=10).contains(&self.search.num_results) {
            return Err(PipelineError::Config(
                "search.num_results must be between 1 and 10".to_string(),
            ));
        }

        if self.search.historical_results > 10 {
            return Err(PipelineError::Config(
                "search.historical_results must not exceed 10".to_string(),
            ));
        }

        if self.output.max_event_length < 4 {
            return Err(PipelineError::Config(
                "output.max_event_length must be at least 4".to_string(),
            ));
        }

        if self.selection.top_candidates == 0 {
            return Err(PipelineError::Config(
                "selection.top_candidates must be greater than 0".to_string(),
            ));
        }

        if self.trends.default_score > 100 {
            return Err(PipelineError::Config(
                "trends.default_score must be between 0 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

impl SearchConfig {
    pub fn credentials(&self) -> Result<SearchCredentials> {
        let api_key = usable_secret(self.api_key.as_deref()).ok_or_else(|| {
            PipelineError::Config(format!("{} is not set", API_KEY_ENV))
        })?;
        let engine_id = usable_secret(self.engine_id.as_deref()).ok_or_else(|| {
            PipelineError::Config(format!("{} is not set", ENGINE_ID_ENV))
        })?;

        Ok(SearchCredentials {
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl EncyclopediaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl TrendsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

// Placeholders like YOUR_CSE_ID_HERE count as unset.
fn usable_secret(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !(v.starts_with("YOUR_") && v.ends_with("_HERE")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.max_event_length, 200);
        assert_eq!(config.trends.default_score, 50);
    }

    #[test]
    fn test_validate_rejects_small_event_length() {
        let mut config = Config::default_config();
        config.output.max_event_length = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_search() {
        let mut config = Config::default_config();
        config.search.num_results = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_missing() {
        let config = Config::default_config();
        let err = config.search.credentials().unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_credentials_placeholder_rejected() {
        let mut search = Config::default_config().search;
        search.api_key = Some("key".to_string());
        search.engine_id = Some("YOUR_CSE_ID_HERE".to_string());
        let err = search.credentials().unwrap_err();
        assert!(err.to_string().contains(ENGINE_ID_ENV));
    }

    #[test]
    fn test_credentials_present() {
        let mut search = Config::default_config().search;
        search.api_key = Some(" key ".to_string());
        search.engine_id = Some("engine".to_string());
        let credentials = search.credentials().unwrap();
        assert_eq!(credentials.api_key, "key");
        assert_eq!(credentials.engine_id, "engine");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "[output]\nmax_event_length = 120\n\n[selection]\nstrategy = \"weighted\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.output.max_event_length, 120);
        assert_eq!(config.selection.strategy, SelectionStrategy::Weighted);
        assert_eq!(config.search.num_results, 5);
        assert!(config.output.template.is_none());
    }
}
