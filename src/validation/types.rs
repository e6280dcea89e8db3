use serde::Serialize;
use serde_json::Value;

/// The request body for `POST /validate`: `{"dax": "<expression>"}`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ValidationRequest<'a> {
    pub dax: &'a str,
}

impl<'a> ValidationRequest<'a> {
    pub fn new(dax: &'a str) -> Self {
        Self { dax }
    }
}

/// One-line summary of a server response, for the status line.
///
/// The server's schema is not constrained; this only recognizes the
/// `valid` / `error` / `errors` / `output` fields the reference service
/// emits and falls back to `Unknown` for anything else. The full JSON is
/// always displayed regardless.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Valid,
    Invalid(Option<String>),
    Unknown,
}

impl Verdict {
    pub fn from_value(value: &Value) -> Self {
        match value.get("valid").and_then(Value::as_bool) {
            Some(true) => Verdict::Valid,
            Some(false) => Verdict::Invalid(invalid_reason(value)),
            None => Verdict::Unknown,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Verdict::Valid => "✔ valid".to_string(),
            Verdict::Invalid(Some(reason)) => format!("✘ invalid: {reason}"),
            Verdict::Invalid(None) => "✘ invalid".to_string(),
            Verdict::Unknown => String::new(),
        }
    }
}

/// First human-readable reason found in an invalid response.
fn invalid_reason(value: &Value) -> Option<String> {
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return Some(error.to_string());
    }

    match value.get("errors") {
        Some(Value::Array(items)) => {
            if let Some(first) = items.first() {
                return Some(describe_error_item(first));
            }
        }
        Some(Value::String(s)) => return Some(s.clone()),
        _ => {}
    }

    value
        .get("output")
        .and_then(Value::as_str)
        .and_then(|out| out.lines().map(str::trim).find(|l| !l.is_empty()))
        .map(str::to_string)
}

/// daxformatter-style error objects carry a `message`; anything else is shown raw.
fn describe_error_item(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| item.to_string()),
        other => other.to_string(),
    }
}

/// Pretty-prints a response with two-space indentation, preserving key order.
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
