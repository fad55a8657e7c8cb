//! Rendering of session events into HTML.
//!
//! This module provides:
//! - Markdown rendering for free text (`markdown`)
//! - Per-event HTML blocks (`block`)
//! - Standalone document assembly with inline CSS and JS (`document`)

pub mod block;
pub mod document;
pub mod escape;
pub mod markdown;

// Re-export key types
pub use block::{RenderedBlock, render_event};
pub use document::{DocumentMeta, RenderedSession, render_document, render_session};
pub use escape::html_escape;
pub use markdown::render_markdown;
