//! Index page for batch output.
//!
//! `index.html` is static: every link is written at generation time and all
//! strings are HTML-escaped. `index.json` carries the same entries for tools.

use std::path::Path;
use std::time::SystemTime;

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::render::document::STYLE;
use crate::render::html_escape;
use crate::{RenderError, RenderResult, write_output};

/// One converted session as listed in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Session id when the log carries one, else the relative path.
    pub title: String,
    /// Link relative to the index page.
    pub href: String,
    /// Source path relative to the sessions root.
    pub source: String,
    pub session_id: Option<String>,
    pub events: usize,
    /// Source modification time (RFC 3339, UTC).
    pub modified: Option<String>,
}

/// Format a file modification time for display.
pub fn format_modified(time: SystemTime) -> Option<String> {
    OffsetDateTime::from(time).format(&Rfc3339).ok()
}

pub fn render_index_html(title: &str, entries: &[IndexEntry]) -> String {
    let title = html_escape(title);
    let mut html = String::with_capacity(STYLE.len() + entries.len() * 256 + 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!(
        "<div class=\"toolbar\"><span class=\"title\">{title}</span><span class=\"count\">{} session{}</span></div>\n",
        entries.len(),
        if entries.len() == 1 { "" } else { "s" }
    ));
    html.push_str("<main class=\"container\">\n");

    if entries.is_empty() {
        html.push_str("<p>No sessions were converted.</p>\n");
    } else {
        html.push_str("<table class=\"index\">\n<thead>\n<tr><th>Session</th><th>File</th><th class=\"num\">Events</th><th>Modified</th></tr>\n</thead>\n<tbody>\n");
        for entry in entries {
            html.push_str(&format!(
                "<tr><td><a href=\"{}\">{}</a></td><td><code>{}</code></td><td class=\"num\">{}</td><td>{}</td></tr>\n",
                html_escape(&entry.href),
                html_escape(&entry.title),
                html_escape(&entry.source),
                entry.events,
                html_escape(entry.modified.as_deref().unwrap_or("")),
            ));
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("<div class=\"footer\">Generated by session-render</div>\n");
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

pub fn write_index_html(title: &str, entries: &[IndexEntry], path: &Path) -> RenderResult<()> {
    write_output(path, &render_index_html(title, entries))
}

/// Write index entries as compact JSON.
pub fn write_index_json(entries: &[IndexEntry], path: &Path) -> RenderResult<()> {
    let json = serde_json::to_string(entries)
        .map_err(|e| RenderError::Message(format!("failed to serialize index: {e}")))?;
    write_output(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, href: &str) -> IndexEntry {
        IndexEntry {
            title: title.to_string(),
            href: href.to_string(),
            source: href.replace(".html", ".jsonl"),
            session_id: None,
            events: 3,
            modified: None,
        }
    }

    #[test]
    fn test_index_lists_links() {
        let html = render_index_html(
            "Sessions",
            &[entry("a/x.jsonl", "a/x.html"), entry("b/y.jsonl", "b/y.html")],
        );
        assert!(html.contains("<a href=\"a/x.html\">a/x.jsonl</a>"));
        assert!(html.contains("<a href=\"b/y.html\">b/y.jsonl</a>"));
        assert!(html.contains("2 sessions"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_index_escapes_titles() {
        let html = render_index_html("<t>", &[entry("<img>", "x\".html")]);
        assert!(html.contains("<title>&lt;t&gt;</title>"));
        assert!(html.contains("href=\"x&quot;.html\""));
        assert!(html.contains("&lt;img&gt;"));
    }

    #[test]
    fn test_empty_index() {
        let html = render_index_html("Sessions", &[]);
        assert!(html.contains("No sessions were converted."));
    }

    #[test]
    fn test_write_index_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        write_index_json(&[entry("a", "a.html")], &path).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed[0]["href"], "a.html");
        assert_eq!(parsed[0]["events"], 3);
    }

    #[test]
    fn test_format_modified() {
        assert_eq!(
            format_modified(SystemTime::UNIX_EPOCH).as_deref(),
            Some("1970-01-01T00:00:00Z")
        );
    }
}
