//! Shared test doubles for the agent loop and session tests.

use async_trait::async_trait;
use scout_core::error::{ProviderError, ToolError};
use scout_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use scout_core::tool::Tool;
use scout_providers::ModelClient;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A mock provider that returns a sequence of scripted responses.
///
/// Each call to `complete` returns the next response in the queue and
/// records the prompt it was sent. Panics if more calls are made than
/// responses provided.
pub struct SequentialMockProvider {
    responses: Vec<String>,
    prompts: Mutex<Vec<String>>,
}

impl SequentialMockProvider {
    pub fn new<S: Into<String>>(responses: impl IntoIterator<Item = S>) -> Self {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut prompts = self.prompts.lock().unwrap();
        let count = prompts.len();

        if count >= self.responses.len() {
            panic!(
                "SequentialMockProvider: no more responses (call #{}, have {})",
                count,
                self.responses.len()
            );
        }

        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        prompts.push(prompt);

        Ok(make_text_response(&self.responses[count]))
    }
}

/// A provider whose every call fails.
pub struct FailingProvider;

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::Network("connection refused".into()))
    }
}

pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        content: text.to_string(),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// Wrap a provider in a client with test-friendly settings.
pub fn client(provider: Arc<dyn Provider>) -> ModelClient {
    ModelClient::new(provider, "mock-model")
}

/// A tool with a fixed reply that records every input it receives.
pub struct MockTool {
    name: &'static str,
    reply: Result<String, ToolError>,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTool {
    pub fn returning(name: &'static str, output: &str) -> Self {
        Self {
            name,
            reply: Ok(output.to_string()),
            delay: None,
            calls: Arc::default(),
        }
    }

    pub fn failing(name: &'static str, reason: &str) -> Self {
        Self {
            name,
            reply: Err(ToolError::ExecutionFailed {
                tool_name: name.to_string(),
                reason: reason.to_string(),
            }),
            delay: None,
            calls: Arc::default(),
        }
    }

    /// Sleep before replying.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Handle to the recorded inputs; stays valid after the tool is boxed.
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }
}

#[async_trait]
impl Tool for MockTool {
    fn name(&self) -> &str {
        self.name
    }

    fn signature(&self) -> String {
        format!("{}(query: str)", self.name)
    }

    fn description(&self) -> &str {
        "A scripted test tool"
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        self.calls.lock().unwrap().push(input.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone()
    }
}
