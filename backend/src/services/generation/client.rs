use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::GoogleAiConfig;
use crate::services::generation::prompts::GENERATED_SENTENCES_KEY;
use crate::utils::{ApiError, ApiResult};

/// One-shot text-generation call returning the decoded sentence texts
/// in the exact order the model produced them.
#[async_trait]
pub trait SentenceGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> ApiResult<Vec<String>>;
}

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini implementation of the sentence generator
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    temperature: f64,
}

impl GeminiClient {
    pub fn new(config: &GoogleAiConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, self.model, self.api_key)
    }
}

#[async_trait]
impl SentenceGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> ApiResult<Vec<String>> {
        let payload = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "temperature": self.temperature,
            }
        });

        let response = self
            .http_client
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::upstream("gemini", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error status {}: {}", status, body);
            return Err(ApiError::upstream("gemini", format!("status {}: {}", status, body)));
        }

        let envelope: Value =
            response.json().await.map_err(|e| ApiError::malformed("gemini", e.to_string()))?;

        parse_generated_sentences(&envelope)
    }
}

/// Unwrap the generation envelope down to the JSON blob the model was asked
/// to emit, then extract the array under the recognized key.
///
/// The envelope shape matters only as far as "text blob containing JSON":
/// a missing or absent key decodes to an empty list (the caller decides what
/// that means), while an un-unwrappable envelope or a blob that is not valid
/// JSON is a malformed response.
pub fn parse_generated_sentences(envelope: &Value) -> ApiResult<Vec<String>> {
    let text = envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::malformed("gemini", "response envelope has no generated text"))?;

    let blob: Value = serde_json::from_str(text).map_err(|e| {
        ApiError::malformed("gemini", format!("generated text is not valid JSON: {}", e))
    })?;

    let sentences = blob
        .get(GENERATED_SENTENCES_KEY)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    Ok(sentences)
}
