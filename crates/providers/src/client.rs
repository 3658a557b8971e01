//! Model client — a single prompt in, a single completion out.
//!
//! The agent never sees a provider error. [`ModelClient::complete`] folds
//! every failure into the completion text itself, prefixed with
//! [`MODEL_ERROR_PREFIX`], so the loop can feed it back like any other
//! response. Callers that need to tell success from failure (memory
//! summarization, `doctor`) use [`ModelClient::try_complete`].

use std::sync::Arc;
use std::time::Duration;

use scout_core::error::ProviderError;
use scout_core::provider::{Provider, ProviderRequest};
use tracing::{debug, warn};

/// Prefix of every completion produced from a failed model call.
pub const MODEL_ERROR_PREFIX: &str = "Error calling model: ";

/// Sends rendered prompts to a configured model at a fixed temperature.
#[derive(Clone)]
pub struct ModelClient {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl ModelClient {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.0,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    /// Whether the backend lists the configured model. Ollama reports tags,
    /// so `gemma` also matches `gemma:latest`.
    pub async fn model_available(&self) -> Result<bool, ProviderError> {
        let models = self.provider.list_models().await?;
        debug!(count = models.len(), "Models listed");
        Ok(models.iter().any(|id| serves(id, &self.model)))
    }

    /// Complete `prompt`, surfacing failures as errors.
    pub async fn try_complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ProviderRequest::prompt(&self.model, prompt, self.temperature);

        debug!(
            provider = self.provider.name(),
            model = %self.model,
            prompt_chars = prompt.len(),
            "Calling model"
        );

        let response = tokio::time::timeout(self.timeout, self.provider.complete(request))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout.as_secs()))??;

        if let Some(usage) = response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Model responded"
            );
        }

        Ok(response.content)
    }

    /// Complete `prompt`. Never fails: a failed call yields
    /// `"Error calling model: <reason>"` as the completion text.
    pub async fn complete(&self, prompt: &str) -> String {
        match self.try_complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "Model call failed");
                format!("{MODEL_ERROR_PREFIX}{e}")
            }
        }
    }
}

fn serves(id: &str, model: &str) -> bool {
    id == model || id.strip_suffix(":latest") == Some(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scout_core::provider::ProviderResponse;
    use std::sync::Mutex;

    struct RecordingProvider {
        reply: Result<String, ProviderError>,
        seen: Mutex<Vec<ProviderRequest>>,
    }

    impl RecordingProvider {
        fn new(reply: Result<String, ProviderError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Provider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        async fn complete(
            &self,
            request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply.clone().map(|content| ProviderResponse {
                content,
                usage: None,
                model: request.model,
            })
        }
    }

    struct ListingProvider(Vec<&'static str>);

    #[async_trait]
    impl Provider for ListingProvider {
        fn name(&self) -> &str {
            "listing"
        }

        async fn complete(&self, _: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            Err(ProviderError::Network("not used".into()))
        }

        async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
            Ok(self.0.iter().map(|m| m.to_string()).collect())
        }
    }

    struct StalledProvider;

    #[async_trait]
    impl Provider for StalledProvider {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn complete(&self, _: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(ProviderError::Network("unreachable".into()))
        }
    }

    #[tokio::test]
    async fn sends_single_prompt_at_configured_temperature() {
        let provider = Arc::new(RecordingProvider::new(Ok("Final Answer: hi".into())));
        let client = ModelClient::new(provider.clone(), "gemma");

        let text = client.complete("Question: hello").await;
        assert_eq!(text, "Final Answer: hi");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "gemma");
        assert_eq!(seen[0].temperature, 0.0);
        assert_eq!(seen[0].messages[0].content, "Question: hello");
    }

    #[tokio::test]
    async fn failure_becomes_error_text() {
        let provider = Arc::new(RecordingProvider::new(Err(ProviderError::Network(
            "connection refused".into(),
        ))));
        let client = ModelClient::new(provider, "gemma");

        let text = client.complete("anything").await;
        assert!(text.starts_with(MODEL_ERROR_PREFIX));
        assert!(text.contains("connection refused"));
    }

    #[tokio::test]
    async fn try_complete_surfaces_errors() {
        let provider = Arc::new(RecordingProvider::new(Err(
            ProviderError::AuthenticationFailed("bad key".into()),
        )));
        let client = ModelClient::new(provider, "gemma");

        let err = client.try_complete("anything").await.unwrap_err();
        assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_call_times_out() {
        let client = ModelClient::new(Arc::new(StalledProvider), "gemma")
            .with_timeout(Duration::from_secs(5));

        let err = client.try_complete("anything").await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(5)));

        let text = client.complete("anything").await;
        assert_eq!(text, "Error calling model: Request timed out after 5s");
    }

    #[tokio::test]
    async fn model_available_matches_listed_ids() {
        let provider = Arc::new(ListingProvider(vec!["gemma:latest", "llama3.1:8b"]));

        let client = ModelClient::new(provider.clone(), "gemma");
        assert!(client.model_available().await.unwrap());

        let client = ModelClient::new(provider.clone(), "llama3.1:8b");
        assert!(client.model_available().await.unwrap());

        let client = ModelClient::new(provider.clone(), "llama3.1");
        assert!(!client.model_available().await.unwrap());

        let client = ModelClient::new(provider, "mistral");
        assert!(!client.model_available().await.unwrap());
    }
}
