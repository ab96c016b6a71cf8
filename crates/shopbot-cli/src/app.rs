//! Wiring of store, generator and resolver from configuration.

use crate::config::{Config, GeneratorConfig, ProviderKind};
use crate::error::{CliError, Result};
use shopbot_domain::traits::TextGenerator;
use shopbot_engine::Resolver;
use shopbot_llm::{gemini, ollama, GeminiProvider, LlmError, MockGenerator, OllamaProvider};
use shopbot_store::SqliteStore;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default Ollama model when none is configured.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama2";

/// Resolver as assembled by the CLI.
pub type App = Resolver<Arc<SqliteStore>, Arc<SqliteStore>, Generator>;

/// Text generator selected at runtime.
pub enum Generator {
    /// Fixed reply
    Offline(MockGenerator),
    /// Local Ollama server
    Ollama(OllamaProvider),
    /// Google Gemini API
    Gemini(GeminiProvider),
}

impl Generator {
    /// Build the configured provider.
    ///
    /// The Gemini key is read from the environment variable named in the
    /// configuration.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let generator = match config.provider {
            ProviderKind::Offline => Generator::Offline(MockGenerator::new(&config.offline_reply)),
            ProviderKind::Ollama => {
                let endpoint = config.endpoint.as_deref().unwrap_or(ollama::DEFAULT_ENDPOINT);
                let model = config.model.as_deref().unwrap_or(DEFAULT_OLLAMA_MODEL);
                Generator::Ollama(
                    OllamaProvider::new(endpoint, model, timeout)?
                        .with_max_attempts(config.max_attempts),
                )
            }
            ProviderKind::Gemini => {
                let api_key = std::env::var(&config.api_key_env).map_err(|_| {
                    CliError::Config(format!(
                        "Environment variable {} is not set",
                        config.api_key_env
                    ))
                })?;
                let endpoint = config.endpoint.as_deref().unwrap_or(gemini::DEFAULT_ENDPOINT);
                let model = config.model.as_deref().unwrap_or(gemini::DEFAULT_MODEL);
                Generator::Gemini(
                    GeminiProvider::new(endpoint, model, api_key, timeout)?
                        .with_max_attempts(config.max_attempts),
                )
            }
        };

        debug!("Using {:?} text generation provider", config.provider);
        Ok(generator)
    }
}

impl TextGenerator for Generator {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> std::result::Result<String, Self::Error> {
        match self {
            Generator::Offline(g) => g.generate(prompt),
            Generator::Ollama(g) => g.generate(prompt),
            Generator::Gemini(g) => g.generate(prompt),
        }
    }
}

/// Open the database and assemble the resolver.
pub fn build_app(config: &Config) -> Result<App> {
    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    debug!("Opening database at {}", db_path.display());

    let store = Arc::new(SqliteStore::new(&db_path)?);
    let generator = Generator::from_config(&config.generator)?;
    let app = Resolver::with_config(store.clone(), store, generator, config.resolver.clone())?;
    Ok(app)
}
