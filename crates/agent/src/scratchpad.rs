//! Scratchpad — the observation trail of a single query.
//!
//! Each step pairs the raw model response with the observation the loop
//! produced for it. The scratchpad is created empty per query, only ever
//! appended to, and rendered back into the next prompt verbatim.

use std::fmt;

use crate::parser::OBSERVATION_MARKER;

/// What the loop observed after acting on a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// The tool ran and returned this text.
    ToolOutput(String),
    /// The model asked for a tool that is not registered.
    UnknownTool(String),
    /// The action could not be parsed.
    InvalidAction(String),
    /// The tool ran and failed, or timed out.
    ToolFailed(String),
}

impl Observation {
    pub fn is_error(&self) -> bool {
        !matches!(self, Observation::ToolOutput(_))
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observation::ToolOutput(text) => f.write_str(text),
            Observation::UnknownTool(name) => write!(f, "Error: Unknown tool '{name}'."),
            Observation::InvalidAction(reason) | Observation::ToolFailed(reason) => {
                write!(f, "Error parsing or executing tool: {reason}")
            }
        }
    }
}

/// One model response and the observation it led to.
#[derive(Debug, Clone)]
pub struct Step {
    pub response: String,
    pub observation: Observation,
}

#[derive(Debug, Clone, Default)]
pub struct Scratchpad {
    steps: Vec<Step>,
}

impl Scratchpad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, response: impl Into<String>, observation: Observation) {
        self.steps.push(Step {
            response: response.into(),
            observation,
        });
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// `<response>\nObservation: <observation>\n` for every step, in order.
    pub fn render(&self) -> String {
        self.steps
            .iter()
            .map(|s| format!("{}\n{OBSERVATION_MARKER} {}\n", s.response, s.observation))
            .collect()
    }
}
