//! Storage layer for session logs.
//!
//! Session logs are read as JSON Lines, one event per line.

pub mod jsonl;

// Re-export key types
pub use jsonl::{EventStream, ReadStats, SessionReader};
