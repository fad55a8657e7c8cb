//! End-to-end rendering tests.
//!
//! These tests run raw JSONL text through the reader, block renderer and
//! document assembler and check the properties of the final HTML:
//! - Injection safety for free-text fields
//! - Collapsible panel counts and default state
//! - Encrypted reasoning never reaching the output
//! - Unicode passing through while markup is escaped
//! - Determinism

use session_render::render::{DocumentMeta, render_markdown, render_session};
use session_render::storage::EventStream;

fn render(jsonl: &str) -> String {
    let stream = EventStream::new(jsonl.as_bytes());
    render_session(&DocumentMeta::new("test"), stream).html
}

/// Body of the document between the toolbar and the inline script.
fn body(html: &str) -> &str {
    let start = html.find("<main").expect("main element");
    let end = html.find("<script>").expect("script element");
    &html[start..end]
}

#[test]
fn test_hello_world_is_a_bare_paragraph() {
    assert_eq!(render_markdown("hello world").trim(), "<p>hello world</p>");
}

#[test]
fn test_script_in_message_is_escaped() {
    let html = render(
        r#"{"type":"message","role":"user","content":[{"type":"input_text","text":"<script>alert(1)</script>"}]}"#,
    );
    assert_eq!(html.matches("<script").count(), 1, "only the viewer script");
    assert!(!html.contains("<script>alert(1)"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn test_script_in_reasoning_is_escaped() {
    let html = render(
        r#"{"type":"reasoning","summary":[{"type":"summary_text","text":"before <script>alert(1)</script> after"}]}"#,
    );
    assert_eq!(html.matches("<script").count(), 1);
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn test_collapsible_panels() {
    let jsonl = concat!(
        r#"{"type":"message","role":"assistant","content":[{"type":"output_text","text":"Done."}]}"#,
        "\n",
        r#"{"type":"reasoning","summary":[{"type":"summary_text","text":"Considering options"}]}"#,
        "\n",
        r#"{"type":"function_call_output","call_id":"c1","output":"ok"}"#,
        "\n",
    );
    let html = render(jsonl);

    assert_eq!(html.matches("data-collapsible=\"true\"").count(), 2);
    assert_eq!(
        html.matches("collapsed\" data-collapsible=\"true\"").count(),
        2,
        "both panels start collapsed"
    );
    assert!(html.contains("id=\"collapse-all\""));
    assert!(html.contains("id=\"expand-all\""));
}

#[test]
fn test_message_only_has_no_panels() {
    let html = render(r#"{"type":"message","role":"user","content":"just a message"}"#);
    assert_eq!(html.matches("data-collapsible=\"true\"").count(), 0);
}

#[test]
fn test_encrypted_reasoning_is_hidden() {
    let html = render(
        r#"{"type":"reasoning","summary":[],"encrypted_content":"gAAAAB-SECRET-PAYLOAD"}"#,
    );
    assert!(!html.contains("gAAAAB-SECRET-PAYLOAD"));
    assert!(!body(&html).contains("class=\"block"));
    assert!(html.contains("0 blocks"));
}

#[test]
fn test_encrypted_content_never_leaks_through_fallback() {
    let html = render(
        r#"{"type":"reasoning","summary":"oops","encrypted_content":"gAAAAB-SECRET-PAYLOAD"}"#,
    );
    assert!(html.contains("Event: reasoning"));
    assert!(!html.contains("gAAAAB-SECRET-PAYLOAD"));
}

#[test]
fn test_emoji_passes_through_and_tags_are_escaped() {
    let html = render(
        r#"{"type":"message","role":"user","content":[{"type":"input_text","text":"hi 👍 <b>bold</b>"}]}"#,
    );
    assert!(html.contains("hi 👍 &lt;b&gt;bold&lt;/b&gt;"));
    assert!(!body(&html).contains("<b>"));
}

#[test]
fn test_function_call_is_not_markdown() {
    let html = render(
        r#"{"type":"function_call","name":"shell","arguments":"{\"command\":[\"echo\",\"**not bold**\"]}"}"#,
    );
    assert!(html.contains("$ echo **not bold**"));
    assert!(!body(&html).contains("<strong>"));
}

#[test]
fn test_unknown_records_are_shown() {
    let html = render(r#"{"type":"event_msg","payload":{"type":"token_count"}}"#);
    assert!(html.contains("Event: event_msg"));
    assert!(html.contains("token_count"));
}

#[test]
fn test_code_fence_language_reaches_highlighter() {
    let html = render(
        r#"{"type":"message","role":"assistant","content":"```diff\n+added\n-removed\n```"}"#,
    );
    assert!(html.contains("<code class=\"language-diff\">"));
}

#[test]
fn test_rendering_is_deterministic() {
    let jsonl = concat!(
        r#"{"type":"session_meta","payload":{"id":"s1","timestamp":"2025-01-01T00:00:00Z"}}"#,
        "\n",
        r##"{"type":"message","role":"user","content":"# Title\n\n| a | b |\n|---|---|\n| 1 | 2 |"}"##,
        "\n",
    );
    assert_eq!(render(jsonl), render(jsonl));
}

#[test]
fn test_markdown_images_do_not_reference_remote_resources() {
    let html = render(
        r#"{"type":"message","role":"user","content":"see ![x](https://evil.example/track.png)"}"#,
    );
    let body = body(&html);
    assert!(!body.contains("<img"));
    assert!(!body.contains("src=\"http"));
    assert!(!body.contains("evil.example"));
}

#[test]
fn test_script_links_in_messages_are_neutralized() {
    let html = render(concat!(
        r#"{"type":"message","role":"user","content":"[click](javascript:alert(1))"}"#,
        "\n",
        r#"{"type":"message","role":"assistant","content":"[data](data:text/html;base64,PHNjcmlwdD4=)"}"#,
        "\n",
    ));
    let body = body(&html);
    assert!(!body.contains("javascript:"));
    assert!(!body.contains("data:text/html"));
    assert_eq!(body.matches(r##"<a href="#">"##).count(), 2);
}
