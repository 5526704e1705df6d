//! Canonical JSON bytes for exported artifacts.
//!
//! Every byte-stable artifact (graph exports, report files, fingerprints of
//! documents) is produced here, so two runs that explore the same graph emit
//! identical bytes.
//!
//! # Rules
//!
//! 1. Object keys sorted by byte order.
//! 2. Compact form, no whitespace.
//! 3. Strings escaped per RFC 8259 §7; non-ASCII passes through as UTF-8.
//! 4. Integers only. Floats are rejected.
//! 5. `null`, `true`, `false` literal.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Failure to produce canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },
    #[error("value does not serialize to JSON: {detail}")]
    Serialize { detail: String },
}

/// Serialize any `Serialize` value to canonical bytes.
///
/// # Errors
///
/// Returns [`CanonError::Serialize`] if serde cannot represent the value as
/// JSON, or [`CanonError::NonIntegerNumber`] if it contains a float.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CanonError> {
    let value = serde_json::to_value(value).map_err(|e| CanonError::Serialize {
        detail: e.to_string(),
    })?;
    canonical_json_bytes(&value)
}

/// Canonical bytes of an already-built JSON value.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not an integer.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    let mut out = String::new();
    emit(&mut out, value)?;
    Ok(out.into_bytes())
}

fn emit(out: &mut String, value: &Value) -> Result<(), CanonError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => emit_number(out, n)?,
        Value::String(s) => emit_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => emit_object(out, map)?,
    }
    Ok(())
}

fn emit_object(out: &mut String, map: &Map<String, Value>) -> Result<(), CanonError> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    out.push('{');
    for (i, (key, val)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        emit_string(out, key);
        out.push(':');
        emit(out, val)?;
    }
    out.push('}');
    Ok(())
}

fn emit_number(out: &mut String, n: &Number) -> Result<(), CanonError> {
    if let Some(i) = n.as_i64() {
        let _ = write!(out, "{i}");
    } else if let Some(u) = n.as_u64() {
        let _ = write!(out, "{u}");
    } else {
        return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
    }
    Ok(())
}

fn emit_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{0020}' => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
