//! Pulls plain comment text out of host payloads.
//!
//! Host API versions place the comment text in different spots. The locations are tried
//! in `TEXT_SOURCES` order and the first non-empty string wins. Markup is removed with a
//! naive tag pass which is good enough for scoring and must never be used for rendering.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").expect("static tag pattern");
}

pub type TextSource = fn(&Value) -> Option<String>;

/// Extraction order, most common host shape first.
pub const TEXT_SOURCES: &[(&str, TextSource)] = &[
    ("commentBody", from_comment_body),
    ("body", from_body),
    ("comment", from_comment),
    ("text", from_text),
    ("req.body", from_request_body),
];

pub fn extract_text(payload: &Value) -> String {
    let raw = TEXT_SOURCES
        .iter()
        .find_map(|(_, source)| source(payload))
        .unwrap_or_default();
    strip_markup(raw.trim())
}

pub fn strip_markup(text: &str) -> String {
    if text.contains('<') {
        HTML_TAG.replace_all(text, "").trim().to_string()
    } else {
        text.to_string()
    }
}

/// First `max_chars` characters, for log lines.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().nth(max_chars).is_some() {
        out.push_str("...");
    }
    out
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A string, or an object carrying the string under `.text`.
fn string_or_text(value: Option<&Value>) -> Option<String> {
    let value = value?;
    non_empty_str(Some(value)).or_else(|| non_empty_str(value.get("text")))
}

fn from_comment_body(payload: &Value) -> Option<String> {
    let comment_body = payload.get("commentBody")?;
    string_or_text(Some(comment_body)).or_else(|| string_or_text(comment_body.get("body")))
}

fn from_body(payload: &Value) -> Option<String> {
    string_or_text(payload.get("body"))
}

fn from_comment(payload: &Value) -> Option<String> {
    let comment = payload.get("comment")?;
    string_or_text(Some(comment)).or_else(|| string_or_text(comment.get("body")))
}

fn from_text(payload: &Value) -> Option<String> {
    non_empty_str(payload.get("text"))
}

fn from_request_body(payload: &Value) -> Option<String> {
    let body = payload.get("req")?.get("body")?;
    string_or_text(Some(body)).or_else(|| string_or_text(body.get("commentBody")))
}
