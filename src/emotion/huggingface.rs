use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use super::classifier::SentimentClassifier;
use super::probability::LabelScore;
use crate::engine::config::ClassifierConfig;
use crate::error::{EngineError, Result};
use crate::utils::http::fetch_json_with_retry;

const PREVIEW_CHARS: usize = 160;

#[derive(Serialize, Clone)]
struct InferenceRequest {
    inputs: String,
    options: InferenceOptions,
}

#[derive(Serialize, Clone)]
struct InferenceOptions {
    wait_for_model: bool,
    use_cache: bool,
}

/// Sentiment classifier backed by the Hugging Face inference API.
pub struct HuggingFaceClassifier {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    max_retries: u32,
    retry_delay: Duration,
}

impl HuggingFaceClassifier {
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint,
            api_key,
            max_retries: 2,
            retry_delay: Duration::from_millis(1000),
        }
    }

    /// Construct from a ClassifierConfig entry.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let mut classifier = Self::new(
            config.endpoint.clone(),
            config.api_key.clone().filter(|k| !k.is_empty()),
            Duration::from_secs(config.timeout_secs),
        );
        classifier.max_retries = config.max_retries;
        classifier.retry_delay = Duration::from_millis(config.retry_delay_ms);
        classifier
    }
}

#[async_trait]
impl SentimentClassifier for HuggingFaceClassifier {
    fn id(&self) -> String {
        "huggingface".to_string()
    }

    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
        debug!(
            "[Classifier] Submitting text for sentiment ({} chars): {}",
            cleaned.chars().count(),
            preview(&cleaned)
        );

        let body = InferenceRequest {
            inputs: cleaned,
            options: InferenceOptions {
                wait_for_model: true,
                use_cache: true,
            },
        };

        let client = self.client.clone();
        let url = self.endpoint.clone();
        let api_key = self.api_key.clone();

        let data: Value = fetch_json_with_retry(
            move || {
                let client = client.clone();
                let url = url.clone();
                let body = body.clone();
                let api_key = api_key.clone();
                async move {
                    let mut request = client
                        .post(&url)
                        .header("Accept", "application/json")
                        .json(&body);
                    if let Some(key) = api_key {
                        request = request.header("Authorization", format!("Bearer {}", key));
                    }
                    request.send().await
                }
            },
            self.max_retries,
            self.retry_delay,
        )
        .await
        .map_err(|e| {
            error!("[Classifier] Hugging Face inference failed: {}", e);
            EngineError::ClassificationUnavailable(format!("Hugging Face API: {}", e))
        })?;
        parse_scores(data)
    }
}

/// Accept both the flat `[{label, score}]` and nested `[[{label, score}]]`
/// shapes the inference API returns.
fn parse_scores(data: Value) -> Result<Vec<LabelScore>> {
    if let Some(message) = data.get("error") {
        error!("[Classifier] Hugging Face API error response: {}", data);
        return Err(EngineError::ClassificationUnavailable(format!(
            "Hugging Face API error: {}",
            message
        )));
    }

    let items = match data {
        Value::Array(items) => items,
        other => {
            return Err(EngineError::ClassificationUnavailable(format!(
                "unexpected response format: {}",
                other
            )))
        }
    };

    let flat = match items.first() {
        None => {
            return Err(EngineError::ClassificationUnavailable(
                "Hugging Face API returned an empty response".to_string(),
            ))
        }
        Some(Value::Array(inner)) => inner.clone(),
        Some(Value::Object(obj)) if obj.contains_key("label") => items.clone(),
        Some(other) => {
            return Err(EngineError::ClassificationUnavailable(format!(
                "unexpected response format: {}",
                other
            )))
        }
    };

    let scores = flat
        .into_iter()
        .map(serde_json::from_value::<LabelScore>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| {
            EngineError::ClassificationUnavailable(format!("malformed label score: {}", e))
        })?;
    debug!("[Classifier] Score map: {:?}", scores);
    Ok(scores)
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", head)
    } else {
        text.to_string()
    }
}
