//! ReAct loop — Thought → Action → Observation until a final answer.
//!
//! Each iteration composes a prompt from (memory, question, scratchpad),
//! calls the model, and classifies the response:
//!
//! - **Final answer**: stop and return it.
//! - **Action**: dispatch the tool, append the response and its
//!   observation to the scratchpad, and go round again.
//! - **Neither**: stop according to the [`ReplyPolicy`].
//!
//! Nothing escapes the loop as an error. Model failures arrive as text,
//! tool failures become observations, and running out of steps is a
//! regular outcome.

use scout_config::{AgentConfig, ReplyPolicy, TemplateKind};
use scout_core::error::ToolError;
use scout_core::tool::ToolRegistry;
use scout_providers::ModelClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::parser::{ActionCall, ParsedResponse, parse_response};
use crate::prompt::PromptComposer;
use crate::scratchpad::{Observation, Scratchpad};

/// Returned when the step budget runs out.
pub const EXHAUSTED_MESSAGE: &str = "Agent could not finish in the allowed number of steps.";

/// Returned under [`ReplyPolicy::Strict`] when a response has no markers.
pub const INVALID_ACTION_MESSAGE: &str = "Agent failed to produce a valid action.";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    FinalAnswer,
    Reply,
    InvalidAction,
    Exhausted,
}

/// The result of one query.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Text to show the user.
    pub answer: String,
    pub kind: OutcomeKind,
    /// Model calls made.
    pub steps: usize,
    /// Tool executions attempted (unknown tools and unparseable actions
    /// are not counted).
    pub tool_calls: usize,
    pub scratchpad: Scratchpad,
}

/// A single-stream research agent.
pub struct ResearchAgent {
    client: ModelClient,
    tools: Arc<ToolRegistry>,
    composer: PromptComposer,
    max_steps: usize,
    reply_policy: ReplyPolicy,
    tool_timeout: Duration,
}

impl ResearchAgent {
    pub fn new(client: ModelClient, tools: Arc<ToolRegistry>, template: TemplateKind) -> Self {
        let composer = PromptComposer::new(template, &tools);
        Self {
            client,
            tools,
            composer,
            max_steps: 7,
            reply_policy: ReplyPolicy::default(),
            tool_timeout: Duration::from_secs(60),
        }
    }

    pub fn from_config(client: ModelClient, tools: Arc<ToolRegistry>, config: &AgentConfig) -> Self {
        Self::new(client, tools, config.template)
            .with_max_steps(config.max_steps)
            .with_reply_policy(config.reply_policy)
            .with_tool_timeout(Duration::from_secs(config.tool_timeout_secs))
    }

    /// Set the maximum number of model calls per query.
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    /// Switch prompt template. The tool list is re-read from the registry.
    pub fn with_template(mut self, template: TemplateKind) -> Self {
        self.composer = PromptComposer::new(template, &self.tools);
        self
    }

    pub fn with_reply_policy(mut self, policy: ReplyPolicy) -> Self {
        self.reply_policy = policy;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    pub fn client(&self) -> &ModelClient {
        &self.client
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Answer `question`, with `memory` as prior context.
    pub async fn run(&self, question: &str, memory: &str) -> RunOutcome {
        let mut scratchpad = Scratchpad::new();
        let mut tool_calls = 0usize;

        info!(
            model = self.client.model(),
            max_steps = self.max_steps,
            template = ?self.composer.template(),
            "Agent loop starting"
        );

        for step in 1..=self.max_steps {
            let prompt = self.composer.compose(memory, question, &scratchpad.render());
            let response = self.client.complete(&prompt).await;
            debug!(step, response = %response, "Model responded");

            let (answer, kind) = match parse_response(&response) {
                ParsedResponse::FinalAnswer(answer) => (answer, OutcomeKind::FinalAnswer),
                ParsedResponse::Reply(text) => match self.reply_policy {
                    ReplyPolicy::Conversational => (text, OutcomeKind::Reply),
                    ReplyPolicy::Strict => {
                        warn!(step, "Model response has neither an action nor a final answer");
                        (INVALID_ACTION_MESSAGE.to_string(), OutcomeKind::InvalidAction)
                    }
                },
                ParsedResponse::Action(call) => {
                    let (observation, invoked) = self.dispatch(call).await;
                    if invoked {
                        tool_calls += 1;
                    }
                    debug!(
                        step,
                        error = observation.is_error(),
                        observation = %observation,
                        "Observation"
                    );
                    scratchpad.push(response, observation);
                    continue;
                }
            };

            info!(steps = step, tool_calls, outcome = ?kind, "Agent loop finished");
            return RunOutcome {
                answer,
                kind,
                steps: step,
                tool_calls,
                scratchpad,
            };
        }

        warn!(max_steps = self.max_steps, "Agent loop ran out of steps");
        RunOutcome {
            answer: EXHAUSTED_MESSAGE.to_string(),
            kind: OutcomeKind::Exhausted,
            steps: self.max_steps,
            tool_calls,
            scratchpad,
        }
    }

    /// Run the requested tool. The flag reports whether a tool was actually
    /// invoked.
    async fn dispatch(&self, call: ActionCall) -> (Observation, bool) {
        if !self.tools.contains(&call.name) {
            warn!(tool = %call.name, "Model requested an unknown tool");
            return (Observation::UnknownTool(call.name), false);
        }

        let input = match call.argument {
            Ok(literal) => literal.to_string(),
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Unparseable tool argument");
                return (Observation::InvalidAction(e.to_string()), false);
            }
        };

        info!(tool = %call.name, input = %input, "Calling tool");

        let result = tokio::time::timeout(self.tool_timeout, self.tools.execute(&call.name, &input))
            .await
            .unwrap_or_else(|_| {
                Err(ToolError::Timeout {
                    tool_name: call.name.clone(),
                    timeout_secs: self.tool_timeout.as_secs(),
                })
            });

        match result {
            Ok(output) => (Observation::ToolOutput(output), true),
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool failed");
                (Observation::ToolFailed(e.to_string()), true)
            }
        }
    }
}
