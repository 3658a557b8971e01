//! Session driver — one interactive conversation.
//!
//! Every turn reads the stored summary, runs the agent, and records both
//! sides in the transcript. When the session ends the transcript is folded
//! into a new summary and saved.

use scout_core::memory::MemoryStore;
use scout_core::message::{Speaker, Transcript};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::prompt::summarization_prompt;
use crate::react::{ResearchAgent, RunOutcome};

/// Whether `input` ends the session (`quit` or `exit`, any case).
pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit")
}

pub struct Session {
    agent: ResearchAgent,
    memory: Arc<dyn MemoryStore>,
    transcript: Transcript,
}

impl Session {
    pub fn new(agent: ResearchAgent, memory: Arc<dyn MemoryStore>) -> Self {
        Self {
            agent,
            memory,
            transcript: Transcript::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run one user turn through the agent.
    pub async fn handle_turn(&mut self, input: &str) -> RunOutcome {
        let memory = self.load_memory().await;
        let outcome = self.agent.run(input, &memory).await;

        self.transcript.push(Speaker::User, input);
        self.transcript.push(Speaker::Agent, &outcome.answer);
        outcome
    }

    /// End the session: summarize the transcript and overwrite the stored
    /// summary.
    ///
    /// Returns the new summary, or `None` when there was nothing to
    /// summarize. A failed model call leaves the stored summary untouched.
    pub async fn finish(self) -> scout_core::Result<Option<String>> {
        if self.transcript.is_empty() {
            debug!("Empty session, keeping existing memory");
            return Ok(None);
        }

        let previous = self.load_memory().await;
        let prompt = summarization_prompt(&previous, &self.transcript.render());

        let summary = self.agent.client().try_complete(&prompt).await?;
        let summary = summary.trim();
        if summary.is_empty() {
            warn!("Model returned an empty summary, keeping existing memory");
            return Ok(None);
        }

        self.memory.save(summary).await?;
        info!(
            session = %self.transcript.id,
            turns = self.transcript.len() / 2,
            elapsed_secs = self.transcript.elapsed_secs(),
            store = self.memory.name(),
            "Session summary saved"
        );
        Ok(Some(summary.to_string()))
    }

    async fn load_memory(&self) -> String {
        match self.memory.load().await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Failed to load memory, continuing without it");
                String::new()
            }
        }
    }
}
