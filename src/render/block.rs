//! Per-event HTML blocks.
//!
//! Free text (messages, reasoning summaries) goes through Markdown; tool
//! calls, tool output and unknown records are shown as escaped fixed-width
//! text. Reasoning and tool output are wrapped in collapsible panels that
//! start collapsed.

use serde_json::Value;

use crate::core::event::{Event, EventKind, SessionMeta, pretty};

use super::escape::html_escape;
use super::markdown::render_markdown;

/// HTML fragment produced from one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub kind: EventKind,
    pub html: String,
    pub collapsible: bool,
    pub collapsed: bool,
}

impl RenderedBlock {
    fn empty(kind: EventKind) -> Self {
        RenderedBlock {
            kind,
            html: String::new(),
            collapsible: kind.is_collapsible(),
            collapsed: kind.is_collapsible(),
        }
    }

    /// Events such as encrypted-only reasoning contribute nothing visible.
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// Render one event. Never fails.
pub fn render_event(event: &Event) -> RenderedBlock {
    match event {
        Event::SessionMeta(meta) => render_session_meta(meta),
        Event::Message { role, text } => wrap(
            EventKind::Message,
            role.css_class(),
            &html_escape(role.label()),
            &format!("<div class=\"text\">{}</div>", render_markdown(text)),
        ),
        Event::Reasoning { summary, .. } => {
            if summary.is_empty() {
                return RenderedBlock::empty(EventKind::Reasoning);
            }
            wrap(
                EventKind::Reasoning,
                "reasoning",
                "Reasoning (summary)",
                &format!(
                    "<div class=\"text\">{}</div>",
                    render_markdown(&summary.join("\n\n"))
                ),
            )
        }
        Event::FunctionCall {
            name,
            call_id,
            arguments,
        } => {
            let (language, body) = format_arguments(arguments);
            wrap(
                EventKind::FunctionCall,
                "func-call",
                &format!(
                    "Function Call: {}{}",
                    html_escape(name),
                    call_id_badge(call_id.as_deref())
                ),
                &code_block(language, &body),
            )
        }
        Event::FunctionCallOutput {
            call_id,
            output,
            exit_code,
            duration_seconds,
        } => {
            let mut label = String::from("Function Output");
            if let Some(code) = exit_code {
                label.push_str(&format!(" (exit {code})"));
            }
            if let Some(secs) = duration_seconds {
                label.push_str(&format!(" {secs:.2}s"));
            }
            label.push_str(&call_id_badge(call_id.as_deref()));
            wrap(
                EventKind::FunctionCallOutput,
                "func-output",
                &label,
                &code_block(None, output),
            )
        }
        Event::State => RenderedBlock::empty(EventKind::State),
        Event::Unknown { type_name, raw } => wrap(
            EventKind::Unknown,
            "unknown",
            &format!(
                "Event: {}",
                html_escape(type_name.as_deref().unwrap_or("unknown"))
            ),
            &code_block(Some("json"), &pretty(raw)),
        ),
    }
}

/// Wrap a label and body into a block. Collapsibility comes from the kind.
fn wrap(kind: EventKind, class: &str, label_html: &str, body_html: &str) -> RenderedBlock {
    let collapsible = kind.is_collapsible();
    let html = if collapsible {
        format!(
            "<section class=\"block {class} collapsed\" data-collapsible=\"true\">\n\
             <button type=\"button\" class=\"label toggle\" aria-expanded=\"false\">{label_html}</button>\n\
             <div class=\"body\">{body_html}</div>\n\
             </section>\n"
        )
    } else {
        format!(
            "<section class=\"block {class}\">\n\
             <div class=\"label\">{label_html}</div>\n\
             {body_html}\n\
             </section>\n"
        )
    };

    RenderedBlock {
        kind,
        html,
        collapsible,
        collapsed: collapsible,
    }
}

fn code_block(language: Option<&str>, text: &str) -> String {
    match language {
        Some(lang) => format!(
            "<pre class=\"code\"><code class=\"language-{lang}\">{}</code></pre>",
            html_escape(text)
        ),
        None => format!("<pre class=\"code\"><code>{}</code></pre>", html_escape(text)),
    }
}

fn call_id_badge(call_id: Option<&str>) -> String {
    match call_id {
        Some(id) => format!(" <span class=\"call-id\">{}</span>", html_escape(id)),
        None => String::new(),
    }
}

/// Choose how to display function call arguments.
///
/// A `command` array is shown as a shell line, other JSON is pretty-printed,
/// and anything else is shown verbatim.
fn format_arguments(arguments: &str) -> (Option<&'static str>, String) {
    match serde_json::from_str::<Value>(arguments) {
        Ok(Value::Object(map)) => {
            if let Some(Value::Array(parts)) = map.get("command") {
                let line = parts
                    .iter()
                    .map(|part| match part {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                return (Some("bash"), format!("$ {line}"));
            }
            (Some("json"), pretty(&Value::Object(map)))
        }
        Ok(value @ Value::Array(_)) => (Some("json"), pretty(&value)),
        _ => (None, arguments.to_string()),
    }
}

fn render_session_meta(meta: &SessionMeta) -> RenderedBlock {
    let mut rows: Vec<(&str, String)> = Vec::new();
    if let Some(id) = &meta.id {
        rows.push(("Session", html_escape(id)));
    }
    if let Some(ts) = &meta.timestamp {
        rows.push(("Started", html_escape(ts)));
    }
    if let Some(cwd) = &meta.cwd {
        rows.push(("Directory", format!("<code>{}</code>", html_escape(cwd))));
    }
    if let Some(originator) = &meta.originator {
        rows.push(("Originator", html_escape(originator)));
    }
    if let Some(version) = &meta.cli_version {
        rows.push(("CLI version", html_escape(version)));
    }
    if let Some(git) = &meta.git {
        if let Some(url) = &git.repository_url {
            rows.push(("Repo", html_escape(url)));
        }
        if let Some(branch) = &git.branch {
            rows.push(("Branch", html_escape(branch)));
        }
        if let Some(commit) = &git.commit_hash {
            rows.push(("Commit", format!("<code>{}</code>", html_escape(commit))));
        }
    }

    if rows.is_empty() {
        return RenderedBlock::empty(EventKind::SessionMeta);
    }

    let mut body = String::from("<dl class=\"meta\">\n");
    for (name, value) in rows {
        body.push_str(&format!("<dt>{name}</dt><dd>{value}</dd>\n"));
    }
    body.push_str("</dl>");

    wrap(EventKind::SessionMeta, "session", "Session", &body)
}
