//! Text sanitization
//!
//! Upstream responses occasionally carry control characters and broken
//! surrogate escapes that make the re-serialized payload unusable for
//! strict OpenAI clients. Everything that crosses the gateway in either
//! direction is passed through [`sanitize`] first.

use serde_json::{Value, json};
use std::borrow::Cow;
use thiserror::Error;
use tracing::warn;

/// Nesting depth past which values are not descended into
const MAX_DEPTH: usize = 128;

#[derive(Debug, Error)]
#[error("value is nested deeper than {} levels", MAX_DEPTH)]
pub struct SanitizeError;

/// Characters removed from every string
pub fn is_stripped(c: char) -> bool {
    matches!(
        c,
        '\u{00}'..='\u{08}'
            | '\u{0B}'
            | '\u{0C}'
            | '\u{0E}'..='\u{1F}'
            | '\u{7F}'..='\u{9F}'
            | '\u{FDD0}'..='\u{FDEF}'
            | '\u{FFFE}'
            | '\u{FFFF}'
    )
}

/// Remove stripped characters from a string, borrowing when it is already clean
pub fn sanitize_text(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_stripped) {
        Cow::Owned(text.chars().filter(|c| !is_stripped(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Sanitize an arbitrary JSON value.
///
/// Strings are cleaned, arrays element-wise, objects value-wise. When a
/// single object value cannot be sanitized it is replaced with `null` and a
/// warning is logged; the rest of the object is kept.
pub fn sanitize(value: Value) -> Value {
    sanitize_at(value, 0).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to sanitize value");
        Value::Null
    })
}

fn sanitize_at(value: Value, depth: usize) -> Result<Value, SanitizeError> {
    if depth > MAX_DEPTH {
        return Err(SanitizeError);
    }

    Ok(match value {
        Value::String(s) => match sanitize_text(&s) {
            Cow::Borrowed(_) => Value::String(s),
            Cow::Owned(clean) => Value::String(clean),
        },
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| sanitize_at(item, depth + 1))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| {
                    let clean = sanitize_at(v, depth + 1).unwrap_or_else(|e| {
                        warn!(key = %key, error = %e, "Failed to sanitize value for key");
                        Value::Null
                    });
                    (key, clean)
                })
                .collect(),
        ),
        other => other,
    })
}

/// Sanitize an upstream response and make sure it still serializes.
///
/// If the sanitized value does not survive a JSON round trip, only the first
/// candidate's first text part is kept. Without such a part the response is
/// returned as received.
pub fn sanitize_response(response: Value) -> Value {
    let original = response.clone();
    let cleaned = sanitize(response);

    let round_trip =
        serde_json::to_string(&cleaned).and_then(|s| serde_json::from_str::<Value>(&s));
    match round_trip {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Sanitized response failed validation, keeping first text part only");
            fallback_response(&original)
        }
    }
}

/// Minimal response carrying only `candidates[0].content.parts[0].text`
pub fn fallback_response(original: &Value) -> Value {
    match original
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
    {
        Some(text) => json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": sanitize_text(text) }]
                }
            }]
        }),
        None => original.clone(),
    }
}

/// Drop `\uXXXX` escapes for unpaired UTF-16 surrogates from a raw JSON body.
///
/// A JSON decoder rejects these escapes outright, so they have to go before
/// the body is parsed. Well-formed surrogate pairs are left alone.
pub fn strip_lone_surrogate_escapes(raw: &str) -> Cow<'_, str> {
    if !raw.contains("\\u") {
        return Cow::Borrowed(raw);
    }

    let bytes = raw.as_bytes();
    let mut out = String::new();
    let mut copied_from = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        match parse_escape(bytes, i) {
            Some(unit) if is_high_surrogate(unit) => {
                if parse_escape(bytes, i + 6).is_some_and(is_low_surrogate) {
                    i += 12;
                } else {
                    out.push_str(&raw[copied_from..i]);
                    i += 6;
                    copied_from = i;
                }
            }
            Some(unit) if is_low_surrogate(unit) => {
                out.push_str(&raw[copied_from..i]);
                i += 6;
                copied_from = i;
            }
            Some(_) => i += 6,
            // `\\`, `\"` and friends: skip the escaped character too
            None => i += 2,
        }
    }

    if copied_from == 0 {
        return Cow::Borrowed(raw);
    }
    out.push_str(&raw[copied_from..]);
    Cow::Owned(out)
}

fn parse_escape(bytes: &[u8], at: usize) -> Option<u16> {
    if bytes.get(at) != Some(&b'\\') || bytes.get(at + 1) != Some(&b'u') {
        return None;
    }
    let hex = bytes.get(at + 2..at + 6)?;
    if !hex.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    u16::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}
