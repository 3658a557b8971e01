//! Session summary storage for Scout.
//!
//! Backends:
//! - **File** — plain text at `~/.scout/memory/summary.md` (default)
//! - **InMemory** — for tests and `--no-memory` runs

pub mod file_backend;
pub mod in_memory;

pub use file_backend::FileMemoryStore;
pub use in_memory::InMemoryStore;
