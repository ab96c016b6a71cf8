//! Shopbot Text Generation Layer
//!
//! Pluggable implementations of the `TextGenerator` trait from
//! `shopbot-domain`. The query engine delegates to one of these when a
//! shopping query matches nothing in the catalog.
//!
//! # Providers
//!
//! - `MockGenerator`: Deterministic stand-in for tests and offline use
//! - `OllamaProvider`: Local Ollama API integration
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use shopbot_llm::MockGenerator;
//! use shopbot_domain::traits::TextGenerator;
//!
//! let generator = MockGenerator::new("Hello from LLM!");
//! let result = generator.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod gemini;
mod http;
pub mod ollama;
mod runtime;

use shopbot_domain::traits::TextGenerator;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, MockReply>,
    prompts: Vec<String>,
}

/// Mock text generator for deterministic testing
///
/// Returns pre-configured responses without making any network calls and
/// records every prompt it receives. Clones share the same state.
///
/// # Examples
///
/// ```
/// use shopbot_llm::MockGenerator;
/// use shopbot_domain::traits::TextGenerator;
///
/// // Simple fixed response
/// let generator = MockGenerator::new("Fixed response");
/// assert_eq!(generator.generate("any prompt").unwrap(), "Fixed response");
///
/// // Prompt-specific responses
/// let generator = MockGenerator::default();
/// generator.add_response("prompt1", "response1");
/// assert_eq!(generator.generate("prompt1").unwrap(), "response1");
/// assert_eq!(generator.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerator {
    default_reply: MockReply,
    state: Arc<Mutex<MockState>>,
}

impl MockGenerator {
    /// Create a new MockGenerator with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_reply: MockReply::Text(response.into()),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a MockGenerator that fails every call
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            default_reply: MockReply::Error(message.into()),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        self.state()
            .responses
            .insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&self, prompt: impl Into<String>) {
        self.state()
            .responses
            .insert(prompt.into(), MockReply::Error("Mock error".to_string()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.state().prompts.len()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    /// Forget recorded prompts
    pub fn reset_call_count(&self) {
        self.state().prompts.clear();
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl TextGenerator for MockGenerator {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.prompts.push(prompt.to_string());

        let reply = state
            .responses
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(message) => Err(LlmError::Other(message)),
        }
    }
}
