//! Single-file HTML document assembly.
//!
//! Produces a standalone HTML file with one embedded stylesheet and one
//! embedded script. The script wires the per-panel toggles, the
//! collapse/expand-all toolbar and the code highlighter. Nothing is fetched
//! at view time.

use crate::core::event::Event;

use super::block::{RenderedBlock, render_event};
use super::escape::html_escape;

pub(crate) const STYLE: &str = include_str!("assets/viewer.css");
const SCRIPT: &str = include_str!("assets/viewer.js");

/// Page-level information shown around the blocks.
#[derive(Debug, Clone, Default)]
pub struct DocumentMeta {
    pub title: String,
    /// Source path shown under the toolbar.
    pub source: Option<String>,
}

impl DocumentMeta {
    pub fn new(title: impl Into<String>) -> Self {
        DocumentMeta {
            title: title.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Result of rendering one session.
#[derive(Debug, Clone)]
pub struct RenderedSession {
    pub html: String,
    /// Events consumed from the input.
    pub events: usize,
    /// Blocks with visible content.
    pub blocks: usize,
    pub session_id: Option<String>,
}

/// Assemble rendered blocks into a complete HTML document.
///
/// Empty blocks are skipped. Same input always produces identical output.
pub fn render_document(meta: &DocumentMeta, blocks: &[RenderedBlock]) -> String {
    let visible: Vec<&RenderedBlock> = blocks.iter().filter(|b| !b.is_empty()).collect();
    let body_len: usize = visible.iter().map(|b| b.html.len()).sum();
    let title = html_escape(&meta.title);

    let mut html = String::with_capacity(STYLE.len() + SCRIPT.len() + body_len + 2048);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<div class=\"toolbar\">\n");
    html.push_str(&format!("<span class=\"title\">{title}</span>\n"));
    html.push_str(&format!(
        "<span class=\"count\">{} block{}</span>\n",
        visible.len(),
        if visible.len() == 1 { "" } else { "s" }
    ));
    html.push_str("<button type=\"button\" id=\"collapse-all\">Collapse all</button>\n");
    html.push_str("<button type=\"button\" id=\"expand-all\">Expand all</button>\n");
    html.push_str("</div>\n");

    html.push_str("<main class=\"container\">\n");
    if let Some(source) = &meta.source {
        html.push_str(&format!(
            "<div class=\"subtitle\">{}</div>\n",
            html_escape(source)
        ));
    }
    for block in &visible {
        html.push_str(&block.html);
    }
    html.push_str("<div class=\"footer\">Generated by session-render</div>\n");
    html.push_str("</main>\n");

    html.push_str("<script>\n");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    html
}

/// Render a stream of events into a complete document.
pub fn render_session<I>(meta: &DocumentMeta, events: I) -> RenderedSession
where
    I: IntoIterator<Item = Event>,
{
    let mut blocks = Vec::new();
    let mut count = 0;
    let mut session_id = None;

    for event in events {
        count += 1;
        if let Event::SessionMeta(session) = &event {
            if session_id.is_none() {
                session_id = session.id.clone();
            }
        }
        blocks.push(render_event(&event));
    }

    RenderedSession {
        html: render_document(meta, &blocks),
        events: count,
        blocks: blocks.iter().filter(|b| !b.is_empty()).count(),
        session_id,
    }
}
