//! Markdown to HTML conversion for free-text fields.
//!
//! Raw HTML in the input is never passed through: block and inline HTML
//! events are re-emitted as text, so the HTML writer escapes them. Images
//! are reduced to their alt text so a page never fetches anything, and link
//! targets outside a small scheme allow-list are replaced with `#`.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts
}

/// Whether a link target may be kept as-is.
///
/// Relative paths and fragments have no scheme and are kept. Browsers ignore
/// whitespace and control characters inside a scheme, so those are dropped
/// before the check.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    if cleaned[..colon].contains(['/', '?', '#']) {
        return true;
    }
    let scheme = cleaned[..colon].to_ascii_lowercase();
    SAFE_SCHEMES.contains(&scheme.as_str())
}

/// Render Markdown text as safe HTML.
///
/// Fenced code blocks keep their language as `class="language-<tag>"`.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, options()).filter_map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
        // alt text events between the two tags render as plain text
        Event::Start(Tag::Image { .. }) | Event::End(TagEnd::Image) => None,
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Some(Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        })),
        other => Some(other),
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
