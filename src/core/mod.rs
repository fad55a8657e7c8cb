//! Core types for session-render.
//!
//! This module contains the event model every session log line is classified into.

pub mod event;

// Re-export key types for convenience
pub use event::{
    Event, EventKind, GitInfo, ParsedLine, Role, SessionMeta, classify_line, classify_value,
    parse_line,
};
