//! LLM provider implementations for Scout.
//!
//! A single OpenAI-compatible backend covers Ollama (the default), OpenAI,
//! OpenRouter and any other `/v1/chat/completions` endpoint. The agent talks
//! to it through [`ModelClient`].

pub mod client;
pub mod openai_compat;

use std::sync::Arc;
use std::time::Duration;

use scout_config::ModelConfig;
use scout_core::provider::Provider;

pub use client::{MODEL_ERROR_PREFIX, ModelClient};
pub use openai_compat::OpenAiCompatProvider;

/// Build the provider named in `config`.
pub fn build_provider(config: &ModelConfig) -> Arc<dyn Provider> {
    let provider = match config.provider.as_str() {
        "ollama" => OpenAiCompatProvider::ollama(Some(&config.base_url)),
        name => OpenAiCompatProvider::new(
            name,
            config.base_url.as_str(),
            config.api_key.clone().unwrap_or_default(),
        ),
    };
    tracing::debug!(provider = %config.provider, url = %config.base_url, "Provider built");
    Arc::new(provider)
}

/// Build a [`ModelClient`] from configuration.
pub fn build_client(config: &ModelConfig) -> ModelClient {
    ModelClient::new(build_provider(config), &config.model)
        .with_temperature(config.temperature)
        .with_timeout(Duration::from_secs(config.timeout_secs))
}
