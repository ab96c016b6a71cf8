//! Gemini Provider Implementation
//!
//! Calls the Google Generative Language `generateContent` endpoint with a
//! single user turn and returns the text of the first candidate.

use crate::http::send_with_retry;
use crate::runtime::block_on;
use crate::LlmError;
use serde::{Deserialize, Serialize};
use shopbot_domain::traits::TextGenerator;
use std::time::Duration;
use tracing::debug;

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_attempts: u32,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> Result<String, LlmError> {
        let content = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or_else(|| LlmError::InvalidResponse("No candidates in response".to_string()))?;

        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "Candidate contains no text".to_string(),
            ));
        }
        Ok(text)
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Other("Gemini API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client,
            max_attempts: 1,
        })
    }

    /// Set the maximum number of attempts (at least one is always made)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text using the Gemini API
    pub async fn generate_async(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = send_with_retry("Gemini", &self.model, self.max_attempts, || {
            self.client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&request_body)
        })
        .await?;

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        let text = body.into_text()?;
        debug!("Gemini returned {} chars", text.len());
        Ok(text)
    }
}

impl TextGenerator for GeminiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        block_on(self.generate_async(prompt))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn provider(base_url: String) -> GeminiProvider {
        GeminiProvider::new(base_url, DEFAULT_MODEL, "test-key", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = GeminiProvider::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, "  ", Duration::from_secs(5));
        assert!(result.is_err());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello, "},{"text":"shopper."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.into_text().unwrap(), "Hello, shopper.");
    }

    #[test]
    fn test_response_without_candidates() {
        let body: GenerateContentResponse = serde_json::from_str(r#"{"promptFeedback":{}}"#).unwrap();
        assert!(matches!(body.into_text(), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_gemini_generate_against_mock_server() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-pro:generateContent")
                .header("x-goog-api-key", "test-key")
                .body_contains("\"text\":\"anything under 1\"");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "candidates": [{"content": {"parts": [{"text": "Nothing costs that little."}]}}]
                }));
        });

        let reply = provider(server.base_url()).generate("anything under 1").unwrap();

        assert_eq!(reply, "Nothing costs that little.");
        api_mock.assert();
    }

    #[test]
    fn test_gemini_rate_limited() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(429);
        });

        let result = provider(server.base_url()).generate("hello");
        assert!(matches!(result, Err(LlmError::RateLimitExceeded)));
    }

    #[test]
    fn test_gemini_retries_when_configured() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST);
            then.status(503);
        });

        let result = provider(server.base_url()).with_max_attempts(2).generate("hello");
        assert!(matches!(result, Err(LlmError::Communication(_))));
        api_mock.assert_hits(2);
    }
}
