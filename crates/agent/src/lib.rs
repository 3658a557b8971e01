//! The Scout agent — the heart of the system.
//!
//! The agent follows a **Thought → Action → Observation** cycle:
//!
//! 1. **Compose** a prompt from memory, the question and the scratchpad
//! 2. **Ask** the model for the next step
//! 3. **Parse** the response into a final answer, an action or a reply
//! 4. **If action**: run the tool, record the observation, loop back to 1
//! 5. **Otherwise**: return the answer to the user
//!
//! The loop continues until the model gives a final answer or the step
//! budget is used up. A [`Session`] wraps the loop with a transcript and
//! the persisted memory summary.

pub mod literal;
pub mod parser;
pub mod prompt;
pub mod react;
pub mod scratchpad;
pub mod session;

pub use literal::{Literal, LiteralError, parse_literal};
pub use parser::{ActionCall, ActionError, ParsedResponse, parse_response};
pub use prompt::PromptComposer;
pub use react::{
    EXHAUSTED_MESSAGE, INVALID_ACTION_MESSAGE, OutcomeKind, ResearchAgent, RunOutcome,
};
pub use scratchpad::{Observation, Scratchpad};
pub use session::{Session, is_exit_command};

#[cfg(test)]
pub(crate) mod test_helpers;
