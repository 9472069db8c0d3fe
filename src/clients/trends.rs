// file: src/clients/trends.rs
// description: Google Trends interest-over-time client used for place scoring
// reference: https://trends.google.com/trends/api (explore + widgetdata/multiline)

use crate::clients::TrendScorer;
use crate::config::TrendsConfig;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tracing::{debug, warn};

const SERVICE: &str = "Google Trends";
const HOME_URL: &str = "https://trends.google.com/?geo=US";
const EXPLORE_URL: &str = "https://trends.google.com/trends/api/explore";
const MULTILINE_URL: &str = "https://trends.google.com/trends/api/widgetdata/multiline";
const TIMESERIES_WIDGET: &str = "TIMESERIES";

/// Constructed once per run and passed to whatever needs scores.
pub struct GoogleTrendsClient {
    client: Client,
    timeframe: String,
    geo: String,
}

struct TimeseriesWidget {
    token: String,
    request: Value,
}

impl GoogleTrendsClient {
    /// Builds the client and opens a session so later API calls carry the
    /// cookies Google Trends expects. A failed warm-up is only logged.
    pub async fn connect(config: &TrendsConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .build()
            .map_err(PipelineError::http)?;

        if let Err(e) = client.get(HOME_URL).send().await {
            warn!("Google Trends session warm-up failed: {}", e.without_url());
        }

        Ok(Self {
            client,
            timeframe: config.timeframe.clone(),
            geo: config.geo.clone(),
        })
    }

    async fn get_guarded_json(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(PipelineError::http)?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PipelineError::rate_limited(SERVICE));
        }
        if !status.is_success() {
            return Err(PipelineError::api(SERVICE, format!("status {}", status)));
        }

        let text = response.text().await.map_err(PipelineError::http)?;
        serde_json::from_str(strip_json_guard(&text))
            .map_err(|e| PipelineError::Serialization(format!("{} response: {}", SERVICE, e)))
    }

    async fn timeseries_widget(&self, term: &str) -> Result<TimeseriesWidget> {
        let req = json!({
            "comparisonItem": [{ "keyword": term, "time": self.timeframe, "geo": self.geo }],
            "category": 0,
            "property": ""
        });

        let explore = self
            .get_guarded_json(self.client.post(EXPLORE_URL).query(&[
                ("hl", "en-US".to_string()),
                ("tz", "0".to_string()),
                ("req", req.to_string()),
            ]))
            .await?;

        find_timeseries_widget(&explore)
            .ok_or_else(|| PipelineError::api(SERVICE, "no TIMESERIES widget in explore response"))
    }
}

#[async_trait]
impl TrendScorer for GoogleTrendsClient {
    async fn score(&self, term: &str) -> Result<u8> {
        let widget = self.timeseries_widget(term).await?;

        let timeline = self
            .get_guarded_json(self.client.get(MULTILINE_URL).query(&[
                ("hl", "en-US".to_string()),
                ("tz", "0".to_string()),
                ("req", widget.request.to_string()),
                ("token", widget.token),
            ]))
            .await?;

        let score = average_interest(&timeline).unwrap_or(0);
        debug!("Trend score for {}: {}", term, score);
        Ok(score)
    }
}

/// Google prefixes Trends JSON with `)]}'` to block JSON hijacking.
pub fn strip_json_guard(text: &str) -> &str {
    match text.find('{') {
        Some(start) => &text[start..],
        None => text,
    }
}

fn find_timeseries_widget(explore: &Value) -> Option<TimeseriesWidget> {
    explore
        .get("widgets")?
        .as_array()?
        .iter()
        .find(|w| w.get("id").and_then(Value::as_str) == Some(TIMESERIES_WIDGET))
        .and_then(|w| {
            Some(TimeseriesWidget {
                token: w.get("token")?.as_str()?.to_string(),
                request: w.get("request")?.clone(),
            })
        })
}

/// Rounded mean of `default.timelineData[].value[0]`, clamped to 0..=100.
/// `None` when the timeline is empty.
pub fn average_interest(timeline: &Value) -> Option<u8> {
    let points: Vec<f64> = timeline
        .pointer("/default/timelineData")?
        .as_array()?
        .iter()
        .filter_map(|point| point.pointer("/value/0").and_then(Value::as_f64))
        .collect();

    if points.is_empty() {
        return None;
    }

    let mean = points.iter().sum::<f64>() / points.len() as f64;
    Some(mean.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_guard() {
        assert_eq!(strip_json_guard(")]}'\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_json_guard(")]}',\n{\"b\":2}"), "{\"b\":2}");
        assert_eq!(strip_json_guard("plain"), "plain");
    }

    #[test]
    fn test_find_timeseries_widget() {
        let explore: Value = serde_json::from_str(strip_json_guard(
            r#")]}'
            {"widgets": [
                {"id": "GEO_MAP", "token": "geo"},
                {"id": "TIMESERIES", "token": "abc", "request": {"time": "today 3-m"}}
            ]}"#,
        ))
        .unwrap();

        let widget = find_timeseries_widget(&explore).unwrap();
        assert_eq!(widget.token, "abc");
        assert_eq!(widget.request["time"], "today 3-m");
        assert!(find_timeseries_widget(&json!({"widgets": []})).is_none());
    }

    #[test]
    fn test_average_interest() {
        let timeline = json!({
            "default": {
                "timelineData": [
                    {"time": "1", "value": [40]},
                    {"time": "2", "value": [61]},
                    {"time": "3", "value": [70]}
                ]
            }
        });
        assert_eq!(average_interest(&timeline), Some(57));
    }

    #[test]
    fn test_average_interest_empty() {
        assert_eq!(average_interest(&json!({"default": {"timelineData": []}})), None);
        assert_eq!(average_interest(&json!({})), None);
    }
}
