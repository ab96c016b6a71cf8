//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API.
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama `/api/generate` endpoint
//! - Configurable endpoint, model and request timeout
//! - Optional retry with exponential backoff (single attempt by default)
//!
//! # Examples
//!
//! ```no_run
//! use shopbot_llm::OllamaProvider;
//! use shopbot_domain::traits::TextGenerator;
//!
//! let provider = OllamaProvider::default_endpoint("llama2").unwrap();
//! let reply = provider.generate("Suggest a gift under 20 dollars").unwrap();
//! ```

use crate::http::send_with_retry;
use crate::runtime::block_on;
use crate::LlmError;
use serde::{Deserialize, Serialize};
use shopbot_domain::traits::TextGenerator;
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per generation
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_attempts: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama2", "mistral")
    /// - `timeout`: Per-request timeout
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Create a new Ollama provider on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
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

    /// Generate text using Ollama API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running
    /// - Model is not available
    /// - Network communication fails
    /// - Response format is invalid
    pub async fn generate_async(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = send_with_retry("Ollama", &self.model, self.max_attempts, || {
            self.client.post(&url).json(&request_body)
        })
        .await?;

        let body = response
            .json::<OllamaGenerateResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        debug!("Ollama returned {} chars", body.response.len());
        Ok(body.response)
    }
}

impl TextGenerator for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        block_on(self.generate_async(prompt))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider =
            OllamaProvider::new("http://localhost:11434/", "llama2", Duration::from_secs(5)).unwrap();
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model(), "llama2");
        assert_eq!(provider.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_ollama_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("mistral").unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model(), "mistral");
    }

    #[test]
    fn test_ollama_provider_with_max_attempts() {
        let provider = OllamaProvider::default_endpoint("llama2")
            .unwrap()
            .with_max_attempts(5);
        assert_eq!(provider.max_attempts, 5);

        let provider = OllamaProvider::default_endpoint("llama2")
            .unwrap()
            .with_max_attempts(0);
        assert_eq!(provider.max_attempts, 1);
    }

    #[test]
    fn test_ollama_generate_against_mock_server() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/generate")
                .body_contains("\"model\":\"llama2\"")
                .body_contains("\"stream\":false");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"response": "Try a paperback.", "done": true}));
        });

        let provider =
            OllamaProvider::new(server.base_url(), "llama2", Duration::from_secs(5)).unwrap();
        let reply = provider.generate("gift ideas under 1").unwrap();

        assert_eq!(reply, "Try a paperback.");
        api_mock.assert();
    }

    #[test]
    fn test_ollama_model_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(404);
        });

        let provider =
            OllamaProvider::new(server.base_url(), "missing", Duration::from_secs(5)).unwrap();
        let result = provider.generate("hello");
        assert!(matches!(result, Err(LlmError::ModelNotAvailable(m)) if m == "missing"));
    }

    #[test]
    fn test_ollama_server_error_is_not_retried_by_default() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(500).body("boom");
        });

        let provider =
            OllamaProvider::new(server.base_url(), "llama2", Duration::from_secs(5)).unwrap();
        let result = provider.generate("hello");

        assert!(matches!(result, Err(LlmError::Communication(_))));
        api_mock.assert_hits(1);
    }

    #[test]
    fn test_ollama_invalid_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(200).body("not json");
        });

        let provider =
            OllamaProvider::new(server.base_url(), "llama2", Duration::from_secs(5)).unwrap();
        assert!(matches!(
            provider.generate("hello"),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        // Invalid port makes the request fail before any network traffic
        let provider =
            OllamaProvider::new("http://localhost:99999", "llama2", Duration::from_secs(1)).unwrap();

        let result = provider.generate_async("test").await;

        match result {
            Err(LlmError::Communication(_)) => {}
            _ => panic!("Expected Communication error"),
        }
    }
}
