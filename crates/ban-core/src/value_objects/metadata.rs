//! Free-form ban metadata and its canonical text encoding
//!
//! `comments` and `params` may arrive either as already-encoded JSON text or
//! as structured JSON (a mapping or a sequence). Storage always receives the
//! canonical text form. Reads never decode automatically; call
//! [`Metadata::decode`] when the structure is needed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;

/// Metadata field value, either canonical text or structured data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metadata {
    /// Canonical serialized form, as stored
    Encoded(String),
    /// Structured value that still has to be encoded
    Structured(Value),
}

impl Metadata {
    /// Empty sequence, the initial value of a comment log
    pub fn empty_sequence() -> Self {
        Self::Encoded("[]".to_string())
    }

    /// Encode into the canonical text form.
    ///
    /// Already-encoded input is returned unchanged once it has been checked to
    /// decode into a mapping or sequence, so encoding twice is a no-op.
    pub fn encode(&self, field: &'static str) -> Result<String, DomainError> {
        match self {
            Self::Encoded(text) => {
                decode(field, text)?;
                Ok(text.clone())
            }
            Self::Structured(value) => {
                ensure_container(field, value)?;
                serde_json::to_string(value).map_err(|e| malformed(field, e.to_string()))
            }
        }
    }

    /// Normalize into `Metadata::Encoded`
    pub fn normalize(self, field: &'static str) -> Result<Self, DomainError> {
        match self {
            Self::Encoded(_) => {
                self.encode(field)?;
                Ok(self)
            }
            Self::Structured(_) => self.encode(field).map(Self::Encoded),
        }
    }

    /// Decode into structured data
    pub fn decode(&self, field: &'static str) -> Result<Value, DomainError> {
        match self {
            Self::Encoded(text) => decode(field, text),
            Self::Structured(value) => {
                ensure_container(field, value)?;
                Ok(value.clone())
            }
        }
    }

    /// Canonical text if this value is already encoded
    pub fn as_encoded(&self) -> Option<&str> {
        match self {
            Self::Encoded(text) => Some(text),
            Self::Structured(_) => None,
        }
    }

    /// Append an entry to a sequence-shaped value, producing encoded output.
    ///
    /// A mapping already in place becomes the first element of the sequence.
    pub fn append(
        current: Option<&Self>,
        field: &'static str,
        entry: Value,
    ) -> Result<Self, DomainError> {
        let mut items = match current.map(|m| m.decode(field)).transpose()? {
            None => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => vec![other],
        };
        items.push(entry);
        Self::Structured(Value::Array(items)).normalize(field)
    }
}

/// A JSON string is taken as already-encoded text
impl From<Value> for Metadata {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Encoded(text),
            other => Self::Structured(other),
        }
    }
}

impl From<String> for Metadata {
    fn from(text: String) -> Self {
        Self::Encoded(text)
    }
}

/// Decode canonical text into structured data
pub fn decode(field: &'static str, text: &str) -> Result<Value, DomainError> {
    let value: Value = serde_json::from_str(text).map_err(|e| malformed(field, e.to_string()))?;
    ensure_container(field, &value)?;
    Ok(value)
}

fn ensure_container(field: &'static str, value: &Value) -> Result<(), DomainError> {
    match value {
        Value::Object(_) | Value::Array(_) => Ok(()),
        _ => Err(malformed(field, "expected a mapping or a sequence")),
    }
}

fn malformed(field: &'static str, reason: impl Into<String>) -> DomainError {
    DomainError::MalformedMetadata {
        field,
        reason: reason.into(),
    }
}
