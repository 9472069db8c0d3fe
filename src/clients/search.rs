// file: src/clients/search.rs
// description: Google Custom Search JSON API client for image search
// reference: https://developers.google.com/custom-search/v1/reference/rest/v1/cse/list

use crate::clients::{ImageQuery, ImageSearch};
use crate::config::SearchConfig;
use crate::error::{PipelineError, Result};
use crate::models::ImageResult;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

const SERVICE: &str = "Custom Search";
const MAX_RESULTS_PER_REQUEST: usize = 10;

pub struct GoogleImageSearch {
    client: Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
    date_restrict_days: u32,
}

impl GoogleImageSearch {
    /// Fails when the API key or engine id is missing.
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let credentials = config.credentials()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(PipelineError::http)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: credentials.api_key,
            engine_id: credentials.engine_id,
            date_restrict_days: config.date_restrict_days,
        })
    }

    fn query_params(&self, query: &ImageQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("cx", self.engine_id.clone()),
            ("q", query.text.clone()),
            ("searchType", "image".to_string()),
            ("num", query.num_results.clamp(1, MAX_RESULTS_PER_REQUEST).to_string()),
            ("safe", "active".to_string()),
            ("imgSize", "large".to_string()),
            ("imgType", "photo".to_string()),
        ];

        if query.recent_only {
            params.push(("dateRestrict", format!("d{}", self.date_restrict_days)));
        }

        params
    }
}

#[async_trait]
impl ImageSearch for GoogleImageSearch {
    async fn search_images(&self, query: &ImageQuery) -> Result<Vec<ImageResult>> {
        debug!("Image search: {}", query.text);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(PipelineError::http)?;

        let status = response.status();
        let text = response.text().await.map_err(PipelineError::http)?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PipelineError::rate_limited(SERVICE));
        }

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            PipelineError::Serialization(format!(
                "{} returned non-JSON response (status {}): {}",
                SERVICE, status, e
            ))
        })?;

        if let Some(message) = api_error_message(&body) {
            return Err(PipelineError::api(SERVICE, message));
        }

        if !status.is_success() {
            return Err(PipelineError::api(SERVICE, format!("status {}", status)));
        }

        let images = parse_image_items(&body);
        debug!("Image search returned {} results", images.len());
        Ok(images)
    }
}

/// `error.message` of an API error payload.
pub fn api_error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    Some(
        error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string(),
    )
}

/// Missing `items` means no results.
pub fn parse_image_items(body: &Value) -> Vec<ImageResult> {
    let Some(items) = body.get("items").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| {
            let image = item.get("image");
            ImageResult {
                url: string_field(Some(item), "link"),
                title: string_field(Some(item), "title"),
                thumbnail: string_field(image, "thumbnailLink"),
                context: string_field(image, "contextLink"),
            }
        })
        .collect()
}

fn string_field(value: Option<&Value>, key: &str) -> String {
    value
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn search() -> GoogleImageSearch {
        let mut config = Config::default_config().search;
        config.api_key = Some("key".to_string());
        config.engine_id = Some("engine".to_string());
        GoogleImageSearch::new(&config).unwrap()
    }

    #[test]
    fn test_new_requires_credentials() {
        let config = Config::default_config().search;
        assert!(matches!(
            GoogleImageSearch::new(&config),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn test_query_params() {
        let search = search();
        let recent = search.query_params(&ImageQuery {
            text: "Bodie current state".to_string(),
            num_results: 25,
            recent_only: true,
        });

        assert!(recent.contains(&("num", "10".to_string())));
        assert!(recent.contains(&("dateRestrict", "d30".to_string())));
        assert!(recent.contains(&("searchType", "image".to_string())));

        let historical = search.query_params(&ImageQuery {
            text: "Bodie history".to_string(),
            num_results: 3,
            recent_only: false,
        });
        assert!(historical.iter().all(|(k, _)| *k != "dateRestrict"));
    }

    #[test]
    fn test_parse_image_items() {
        let body = json!({
            "items": [
                {
                    "link": "https://img.example/1.jpg",
                    "title": "Bodie main street",
                    "image": {
                        "thumbnailLink": "https://thumb.example/1.jpg",
                        "contextLink": "https://page.example/bodie"
                    }
                },
                { "title": "No link or image block" }
            ]
        });

        let images = parse_image_items(&body);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].url, "https://img.example/1.jpg");
        assert_eq!(images[0].thumbnail, "https://thumb.example/1.jpg");
        assert_eq!(images[0].context, "https://page.example/bodie");
        assert_eq!(images[1].url, "");
    }

    #[test]
    fn test_parse_without_items() {
        assert!(parse_image_items(&json!({"searchInformation": {"totalResults": "0"}})).is_empty());
    }

    #[test]
    fn test_api_error_message() {
        let body = json!({"error": {"code": 403, "message": "Daily Limit Exceeded"}});
        assert_eq!(api_error_message(&body).as_deref(), Some("Daily Limit Exceeded"));
        assert_eq!(api_error_message(&json!({"error": {}})).as_deref(), Some("Unknown error"));
        assert!(api_error_message(&json!({"items": []})).is_none());
    }
}
