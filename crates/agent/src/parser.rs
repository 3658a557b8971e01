//! Response parser — turns raw model text into a [`ParsedResponse`].
//!
//! The model is steered purely by the prompt, so the marker strings here
//! are shared with the templates in [`crate::prompt`].

use crate::literal::{Literal, LiteralError, parse_literal};

/// Introduces a tool call.
pub const ACTION_MARKER: &str = "Action:";
/// Introduces the final answer.
pub const FINAL_ANSWER_MARKER: &str = "Final Answer:";
/// Introduces a tool result in the scratchpad.
pub const OBSERVATION_MARKER: &str = "Observation:";

/// One model response, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// Text after the last final-answer marker, trimmed.
    FinalAnswer(String),
    /// A tool call, possibly malformed.
    Action(ActionCall),
    /// Neither marker present; the whole response.
    Reply(String),
}

/// A requested tool call. The name is always available so an unknown tool
/// can be reported even when the argument is broken.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCall {
    pub name: String,
    pub argument: Result<Literal, ActionError>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("expected a call of the form name(argument), got '{0}'")]
    NotACall(String),

    #[error(transparent)]
    Literal(#[from] LiteralError),
}

/// Classify a model response.
///
/// A final answer wins over an action anywhere in the text.
pub fn parse_response(text: &str) -> ParsedResponse {
    if let Some(idx) = text.rfind(FINAL_ANSWER_MARKER) {
        let answer = &text[idx + FINAL_ANSWER_MARKER.len()..];
        return ParsedResponse::FinalAnswer(answer.trim().to_string());
    }

    if let Some(idx) = text.find(ACTION_MARKER) {
        let rest = &text[idx + ACTION_MARKER.len()..];
        let expression = rest
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default();
        return ParsedResponse::Action(parse_call(expression));
    }

    ParsedResponse::Reply(text.to_string())
}

/// Split `name(argument)` and evaluate the argument.
fn parse_call(expression: &str) -> ActionCall {
    let Some((name, rest)) = expression.split_once('(') else {
        return ActionCall {
            name: expression.to_string(),
            argument: Err(ActionError::NotACall(expression.to_string())),
        };
    };

    let rest = rest.trim_end();
    let raw = rest.strip_suffix(')').unwrap_or(rest);

    ActionCall {
        name: name.trim().to_string(),
        argument: parse_literal(raw).map_err(ActionError::from),
    }
}
