//! Gemini `generateContent` REST client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::settings::LlmSettings;

use super::LlmError;

/// Minimal client for the Gemini `generateContent` endpoint.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    settings: LlmSettings,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    /// Creates a client from the language model settings.
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Returns true if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Sends a single-turn prompt and returns the model's text.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key().ok_or(LlmError::MissingApiKey)?;

        let endpoint = self.endpoint();
        debug!(model = %self.settings.model, "Sending generateContent request");

        let response = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", api_key)
            .json(&serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .timeout(Duration::from_secs(self.settings.timeout_seconds))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.into_text().ok_or(LlmError::EmptyResponse)
    }
}
