// src/core/serialize.rs
//! Payload model and its byte form
//!
//! Text payloads are stored as their UTF-8 bytes. Structured payloads are
//! JSON-encoded, keeping mapping keys in insertion order. On the way back
//! the bytes are parsed as JSON when possible and kept as text otherwise.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::Result;
use crate::error::CoreError;

/// Data to protect
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Structured(Value),
}

impl Payload {
    pub fn text(text: impl Into<String>) -> Self {
        Payload::Text(text.into())
    }

    pub fn mapping(map: Map<String, Value>) -> Self {
        Payload::Structured(Value::Object(map))
    }

    /// Convert any serde-serializable value into a structured payload.
    ///
    /// Fails with [`CoreError::Encoding`] when serde_json cannot represent
    /// the value (for example a map keyed by non-strings).
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Payload::Structured(serde_json::to_value(value)?))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Text(_) => "text",
            Payload::Structured(Value::Object(_)) => "mapping",
            Payload::Structured(_) => "json",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Structured(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Structured(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_owned())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::mapping(map)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Structured(value)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Text(text) => f.write_str(text),
            Payload::Structured(value) => write!(f, "{value}"),
        }
    }
}

/// Payload → bytes fed to the cipher
pub fn serialize(payload: &Payload) -> Result<Vec<u8>> {
    match payload {
        Payload::Text(text) => Ok(text.as_bytes().to_vec()),
        Payload::Structured(value) => Ok(serde_json::to_vec(value)?),
    }
}

/// Decrypted bytes → payload
///
/// Invalid UTF-8 is an [`CoreError::Encoding`] error. Text that is not
/// JSON comes back unchanged as [`Payload::Text`]; a JSON string literal
/// is unwrapped to its text.
pub fn deserialize(bytes: &[u8]) -> Result<Payload> {
    let text = std::str::from_utf8(bytes).map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(match parse_json(text) {
        Some(Value::String(inner)) => Payload::Text(inner),
        Some(value) => Payload::Structured(value),
        None => Payload::Text(text.to_owned()),
    })
}

/// `None` means "not JSON, treat as text"
pub fn parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}
