//! Batch conversion of a sessions tree.
//!
//! Every session log under a root is converted into a mirrored HTML page, and
//! an index (`index.html`, `index.json`) links all pages that converted.

pub mod discover;
pub mod index;

pub use discover::{OUTPUT_EXTENSION, SESSION_EXTENSION, SessionFile, discover_sessions, href_for};
pub use index::{IndexEntry, render_index_html, write_index_html, write_index_json};
