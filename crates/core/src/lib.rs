//! # Scout Core
//!
//! Domain types, traits, and error definitions for the Scout research agent.
//! This crate has **no I/O** — it defines the model that every other crate
//! implements against.
//!
//! ## Design Philosophy
//!
//! Each external collaborator of the agent loop is a trait here:
//! - [`Provider`] — the language model backend
//! - [`Tool`] — a string-in, string-out capability (search, page fetch)
//! - [`MemoryStore`] — load/save of the single session summary
//!
//! Implementations live in their own crates, so the loop can be driven by
//! scripted doubles in tests.

pub mod error;
pub mod memory;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use message::{Message, Role, SessionId, Speaker, Transcript, TranscriptEntry};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use tool::{Tool, ToolRegistry};
