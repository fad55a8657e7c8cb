//! Session log event model.
//!
//! Each non-blank line of a session log is one JSON object. Objects are
//! classified by their `type` discriminator into an [`Event`]; anything that
//! is not recognized (or is recognized but malformed) becomes
//! [`Event::Unknown`] so no record is silently dropped.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Discriminant of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SessionMeta,
    Message,
    Reasoning,
    FunctionCall,
    FunctionCallOutput,
    State,
    Unknown,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::SessionMeta => "session_meta",
            EventKind::Message => "message",
            EventKind::Reasoning => "reasoning",
            EventKind::FunctionCall => "function_call",
            EventKind::FunctionCallOutput => "function_call_output",
            EventKind::State => "state",
            EventKind::Unknown => "unknown",
        }
    }

    /// Only reasoning summaries and tool output are rendered as collapsible panels.
    pub fn is_collapsible(self) -> bool {
        matches!(self, EventKind::Reasoning | EventKind::FunctionCallOutput)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    Other(String),
}

impl Role {
    fn parse(role: Option<&str>) -> Self {
        match role {
            Some("user") => Role::User,
            Some("assistant") | None => Role::Assistant,
            Some(other) => Role::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
            Role::Other(name) => name,
        }
    }

    /// CSS class of the message block. Roles other than `user` share the assistant style.
    pub fn css_class(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant | Role::Other(_) => "assistant",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GitInfo {
    #[serde(default)]
    pub commit_hash: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
}

/// Session header carried by the first record of most logs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionMeta {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub originator: Option<String>,
    #[serde(default)]
    pub cli_version: Option<String>,
    #[serde(default)]
    pub git: Option<GitInfo>,
}

/// One classified session log record.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SessionMeta(SessionMeta),
    Message {
        role: Role,
        text: String,
    },
    /// Only the readable summary is kept. `encrypted` records whether an
    /// encrypted payload was present; the payload itself is dropped.
    Reasoning {
        summary: Vec<String>,
        encrypted: bool,
    },
    FunctionCall {
        name: String,
        call_id: Option<String>,
        arguments: String,
    },
    FunctionCallOutput {
        call_id: Option<String>,
        output: String,
        exit_code: Option<i64>,
        duration_seconds: Option<f64>,
    },
    /// Bookkeeping record; renders nothing.
    State,
    Unknown {
        type_name: Option<String>,
        raw: Value,
    },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::SessionMeta(_) => EventKind::SessionMeta,
            Event::Message { .. } => EventKind::Message,
            Event::Reasoning { .. } => EventKind::Reasoning,
            Event::FunctionCall { .. } => EventKind::FunctionCall,
            Event::FunctionCallOutput { .. } => EventKind::FunctionCallOutput,
            Event::State => EventKind::State,
            Event::Unknown { .. } => EventKind::Unknown,
        }
    }
}

/// Outcome of parsing one raw line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Blank,
    /// Not a JSON object. Carries the decode error message.
    Malformed(String),
    Event(Event),
}

// ---------------------------------------------------------------------------
// Raw record shapes (private deserialization types)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawMessage {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<RawContent>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContent {
    Text(String),
    Parts(Vec<RawPart>),
}

#[derive(Deserialize)]
struct RawPart {
    #[serde(default)]
    text: Option<Value>,
}

#[derive(Deserialize)]
struct RawReasoning {
    #[serde(default)]
    summary: Option<Vec<RawSummaryPart>>,
    #[serde(default)]
    encrypted_content: Option<Value>,
}

#[derive(Deserialize)]
struct RawSummaryPart {
    #[serde(rename = "type", default)]
    part_type: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct RawFunctionCall {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    call_id: Option<String>,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Deserialize)]
struct RawFunctionOutput {
    #[serde(default)]
    call_id: Option<String>,
    #[serde(default)]
    output: Option<Value>,
}

#[derive(Deserialize)]
struct RawOutputEnvelope {
    output: String,
    #[serde(default)]
    metadata: Option<RawOutputMetadata>,
}

#[derive(Deserialize)]
struct RawOutputMetadata {
    #[serde(default)]
    exit_code: Option<i64>,
    #[serde(default)]
    duration_seconds: Option<f64>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a single line of a session log.
pub fn parse_line(line: &str) -> ParsedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ParsedLine::Blank;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) if value.is_object() => ParsedLine::Event(classify_value(value)),
        Ok(_) => ParsedLine::Malformed("not a JSON object".to_string()),
        Err(e) => ParsedLine::Malformed(e.to_string()),
    }
}

/// Parse a single line, returning `None` for blank and malformed lines.
pub fn classify_line(line: &str) -> Option<Event> {
    match parse_line(line) {
        ParsedLine::Event(event) => Some(event),
        ParsedLine::Blank | ParsedLine::Malformed(_) => None,
    }
}

/// Classify a decoded JSON object into an [`Event`].
///
/// Never fails: unrecognized or malformed records become [`Event::Unknown`].
pub fn classify_value(value: Value) -> Event {
    if value.get("record_type").and_then(Value::as_str) == Some("state") {
        return Event::State;
    }

    let type_name = value.get("type").and_then(Value::as_str).map(str::to_owned);
    let classified = match type_name.as_deref() {
        Some("response_item") => match value.get("payload") {
            Some(payload) if payload.is_object() => return classify_value(payload.clone()),
            _ => None,
        },
        Some("session_meta") => value
            .get("payload")
            .and_then(|payload| decode::<SessionMeta>(payload))
            .map(Event::SessionMeta),
        Some("message") => decode::<RawMessage>(&value).map(convert_message),
        Some("reasoning") => decode::<RawReasoning>(&value).map(convert_reasoning),
        Some("function_call") => decode::<RawFunctionCall>(&value).map(convert_function_call),
        Some("function_call_output") => {
            decode::<RawFunctionOutput>(&value).map(convert_function_output)
        }
        None if looks_like_header(&value) => decode::<SessionMeta>(&value).map(Event::SessionMeta),
        _ => None,
    };

    match classified {
        Some(event) => event,
        None => {
            if let Some(name) = type_name.as_deref() {
                if is_known_type(name) {
                    debug!(record_type = name, "malformed record, rendering as unknown");
                }
            }
            unknown(type_name, value)
        }
    }
}

// ---------------------------------------------------------------------------
// Record conversion
// ---------------------------------------------------------------------------

fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value).ok()
}

fn is_known_type(name: &str) -> bool {
    matches!(
        name,
        "response_item"
            | "session_meta"
            | "message"
            | "reasoning"
            | "function_call"
            | "function_call_output"
    )
}

fn looks_like_header(value: &Value) -> bool {
    value.get("git").is_some()
        || value.get("instructions").is_some()
        || (value.get("id").is_some() && value.get("timestamp").is_some())
}

fn convert_message(raw: RawMessage) -> Event {
    let text = match raw.content {
        Some(RawContent::Text(text)) => text,
        Some(RawContent::Parts(parts)) => parts
            .iter()
            .filter_map(|part| part.text.as_ref().and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n\n"),
        None => String::new(),
    };

    Event::Message {
        role: Role::parse(raw.role.as_deref()),
        text,
    }
}

fn convert_reasoning(raw: RawReasoning) -> Event {
    let summary = raw
        .summary
        .unwrap_or_default()
        .into_iter()
        .filter(|part| part.part_type.as_deref() == Some("summary_text"))
        .filter_map(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .collect();

    Event::Reasoning {
        summary,
        encrypted: raw.encrypted_content.is_some_and(|v| !v.is_null()),
    }
}

fn convert_function_call(raw: RawFunctionCall) -> Event {
    let arguments = match raw.arguments {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Event::FunctionCall {
        name: raw.name.unwrap_or_else(|| "function".to_string()),
        call_id: raw.call_id,
        arguments,
    }
}

fn convert_function_output(raw: RawFunctionOutput) -> Event {
    let (output, exit_code, duration_seconds) = match raw.output {
        Some(Value::String(s)) => match serde_json::from_str::<RawOutputEnvelope>(&s) {
            Ok(envelope) => unpack_envelope(envelope),
            Err(_) => (s, None, None),
        },
        Some(Value::Null) | None => (String::new(), None, None),
        Some(other) => match decode::<RawOutputEnvelope>(&other) {
            Some(envelope) => unpack_envelope(envelope),
            None => (pretty(&other), None, None),
        },
    };

    Event::FunctionCallOutput {
        call_id: raw.call_id,
        output,
        exit_code,
        duration_seconds,
    }
}

fn unpack_envelope(envelope: RawOutputEnvelope) -> (String, Option<i64>, Option<f64>) {
    let (exit_code, duration) = envelope
        .metadata
        .map(|m| (m.exit_code, m.duration_seconds))
        .unwrap_or((None, None));
    (envelope.output, exit_code, duration)
}

fn unknown(type_name: Option<String>, mut raw: Value) -> Event {
    strip_encrypted(&mut raw);
    Event::Unknown { type_name, raw }
}

/// Remove every `encrypted_content` key so opaque payloads never reach the output.
fn strip_encrypted(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("encrypted_content");
            for child in map.values_mut() {
                strip_encrypted(child);
            }
        }
        Value::Array(items) => {
            for child in items {
                strip_encrypted(child);
            }
        }
        _ => {}
    }
}

pub(crate) fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
