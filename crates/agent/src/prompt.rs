//! Prompt templates.
//!
//! The model only ever sees text. Everything it needs to act (the tools, the
//! output format, prior context and the trail so far) is rendered here, and
//! the format markers come from [`crate::parser`] so the two cannot drift.

use scout_config::TemplateKind;
use scout_core::tool::ToolRegistry;

use crate::parser::{ACTION_MARKER, FINAL_ANSWER_MARKER};

/// Renders prompts for one template and one fixed tool list.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    template: TemplateKind,
    tools: String,
}

impl PromptComposer {
    /// The tool list is captured here; later registry changes are not seen.
    pub fn new(template: TemplateKind, registry: &ToolRegistry) -> Self {
        Self {
            template,
            tools: registry.describe(),
        }
    }

    pub fn template(&self) -> TemplateKind {
        self.template
    }

    /// Render the prompt for one model call. Pure: equal inputs give equal
    /// output.
    pub fn compose(&self, memory: &str, question: &str, scratchpad: &str) -> String {
        match self.template {
            TemplateKind::Research => research(&self.tools, question, scratchpad),
            TemplateKind::Conversational => conversational(&self.tools, memory, question, scratchpad),
        }
    }
}

fn research(tools: &str, question: &str, scratchpad: &str) -> String {
    format!(
        "\
You are a diligent AI research assistant. Your goal is to answer the user's question by finding relevant, up-to-date information on the internet.

You have access to the following tools:
{tools}

To use a tool, you MUST use the following format:
Thought: [Your reasoning. Analyze the question and decide what to look up.]
{ACTION_MARKER} tool_name(\"your concise input\")

The tool will return an Observation.
- If the Observation contains the answer, synthesize it into the final answer.
- If the Observation is not sufficient, you may use a tool again.

When you have the final answer, you MUST use this format:
Thought: I have gathered enough information to answer the question.
{FINAL_ANSWER_MARKER} [A comprehensive answer based on what you found.]

Let's begin!

User's Question: {question}
{scratchpad}"
    )
}

fn conversational(tools: &str, memory: &str, question: &str, scratchpad: &str) -> String {
    let memory = if memory.trim().is_empty() {
        "(nothing yet)"
    } else {
        memory.trim()
    };

    format!(
        "\
You are Scout, a friendly research assistant that can look things up on the web.

Tools:
{tools}

Research strategy:
1. Decide whether the message needs fresh information. Greetings and small talk do not.
2. If it does, start with a short, specific search.
3. If a result looks promising but its snippet is thin, read the page.
4. Stop as soon as you can answer. Do not repeat a lookup that already worked.

To use a tool, reply with:
Thought: [your reasoning]
{ACTION_MARKER} tool_name(\"input\")

To answer after research, reply with:
Thought: [your reasoning]
{FINAL_ANSWER_MARKER} [your answer]

If no tool is needed, reply to the user directly without either marker.

What you remember from earlier conversations with this user:
{memory}

User: {question}
{scratchpad}"
    )
}

/// Prompt asking the model to fold a finished session into the running
/// summary.
pub fn summarization_prompt(previous: &str, transcript: &str) -> String {
    let previous = if previous.trim().is_empty() {
        "(none)"
    } else {
        previous.trim()
    };

    format!(
        "\
You keep a short memory of your conversations with a user.

Previous summary:
{previous}

Latest conversation:
{transcript}

Write an updated summary in a few sentences. Keep what you learned about the user, the topics they care about and any open questions. Reply with the summary only."
    )
}
