//! Lenient field deserializers for financial documents.
//!
//! Client forms send amounts as strings, leave fields blank, or send `null`.
//! These helpers coerce such values to the stored representation instead of
//! rejecting the whole document:
//!
//! | input                          | number | text         | sequence | record    |
//! |--------------------------------|--------|--------------|----------|-----------|
//! | absent (with `serde(default)`) | `0`    | `""`         | `[]`     | default   |
//! | `null`                         | `0`    | `""`         | `[]`     | default   |
//! | numeric string `" 12.5 "`      | `12.5` | as given     | error    | error     |
//! | other string                   | `0`    | as given     | error    | error     |
//! | number                         | value  | decimal form | error    | error     |
//! | NaN / infinity                 | `0`    | n/a          | n/a      | n/a       |
//! | array                          | `0`    | `""`         | elements | error     |
//! | object                         | `0`    | `""`         | error    | fields    |
//!
//! Booleans become `0` or `""` and are rejected where a sequence or record is
//! expected. A record is an object such as an income entry or `expenses`;
//! sequence elements are records, so `[null]` holds one default entry while
//! `[["Job", 5000]]` is rejected.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Coerces a JSON value to a finite number, falling back to `0`.
pub fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Coerces a JSON value to text, falling back to `""`.
pub fn coerce_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_text(Value::deserialize(deserializer)?))
}

/// Like [`text`], but keeps the difference between "missing" and "given".
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value @ (Value::String(_) | Value::Number(_)) => Ok(Some(coerce_text(value))),
        _ => Ok(None),
    }
}

/// `null` becomes an empty sequence; any non-array value is rejected.
/// Each element is read as a [`record`].
pub fn sequence<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.into_iter().map(record).collect(),
        other => Err(de::Error::custom(format!(
            "expected a sequence, found {}",
            kind_of(&other)
        ))),
    }
}

/// `null` becomes `T::default()`; see [`record`].
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    record(Value::deserialize(deserializer)?)
}

/// Only an object (or `null`, for the default) can describe a record.
/// serde would otherwise accept an array as a positional struct.
fn record<T, E>(value: Value) -> Result<T, E>
where
    T: DeserializeOwned + Default,
    E: de::Error,
{
    match value {
        Value::Null => Ok(T::default()),
        value @ Value::Object(_) => serde_json::from_value(value).map_err(E::custom),
        other => Err(E::custom(format!(
            "expected an object, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}
