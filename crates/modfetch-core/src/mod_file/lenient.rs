//! Field decoders that never fail on a well-formed JSON value.
//!
//! Saves written by different TTS versions and mod tools disagree on field types
//! (numeric GUIDs, `null` flags, float widths). Each helper takes the raw value and
//! maps anything unusable to "absent", warning when the value was neither absent
//! nor `null`, so one odd field never costs a node its siblings or children.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Short single-line rendering of a value for log messages.
pub(crate) fn preview(value: &Value) -> String {
    const MAX: usize = 80;
    let s = value.to_string();
    match s.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s,
    }
}

fn mistyped(value: &Value, expected: &str) {
    tracing::warn!("expected {}, found {}; using default", expected, preview(value));
}

/// Non-negative integer from an int, an integral float or a numeric string.
pub(crate) fn integer(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(super) fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => {
            mistyped(&other, "a string");
            None
        }
    })
}

pub(super) fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(string(d)?.unwrap_or_default())
}

pub(super) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        other => {
            if let Some(b) = other.as_str().and_then(|s| s.trim().parse().ok()) {
                b
            } else {
                mistyped(&other, "a boolean");
                false
            }
        }
    })
}

/// Grid dimension; `None` means "use the default".
pub(super) fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(d)?;
    if value.is_null() {
        return Ok(None);
    }
    let n = integer(&value).and_then(|n| u32::try_from(n).ok());
    if n.is_none() {
        mistyped(&value, "a non-negative integer");
    }
    Ok(n)
}

/// A nested object decoded as `T`, or `None` when it is not an object.
pub(super) fn object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a>,
{
    let value = Value::deserialize(d)?;
    Ok(decode_object(value, "an object"))
}

/// Decodes an object value as `T`, warning and returning `None` otherwise.
pub(super) fn decode_object<T>(value: Value, expected: &str) -> Option<T>
where
    T: for<'a> Deserialize<'a>,
{
    match value {
        Value::Null => None,
        Value::Object(_) => match T::deserialize(&value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("undecodable {} ({}): {}", expected, e, preview(&value));
                None
            }
        },
        other => {
            mistyped(&other, expected);
            None
        }
    }
}
