//! Frame codec for the live quiz wire format.
//!
//! Every frame is a single JSON object with exactly two top-level fields:
//! `type` (a string tag) and `payload` (arbitrary JSON). A frame without a
//! `payload` field decodes with a `null` payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::messages::ClientMessage;

/// A decoded frame: its tag and its untyped payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl Frame {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Whether this frame carries the given tag.
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Encode a frame from a tag and a payload.
///
/// The payload shape is not validated; the server interprets it.
pub fn encode(kind: &str, payload: Value) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&Frame::new(kind, payload))?)
}

/// Encode a typed outbound command.
pub fn encode_message(message: &ClientMessage) -> Result<String, CodecError> {
    Ok(serde_json::to_string(message)?)
}

/// Decode raw frame text.
///
/// Fails with [`CodecError::MalformedFrame`] when the text is not JSON, is not
/// a JSON object, or has no string `type` field.
pub fn decode(raw: &str) -> Result<Frame, CodecError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| CodecError::MalformedFrame(e.to_string()))?;

    let Value::Object(mut fields) = value else {
        return Err(CodecError::MalformedFrame(
            "frame is not a JSON object".to_string(),
        ));
    };

    let kind = match fields.remove("type") {
        Some(Value::String(kind)) => kind,
        Some(other) => {
            return Err(CodecError::MalformedFrame(format!(
                "`type` must be a string, found {other}"
            )))
        }
        None => {
            return Err(CodecError::MalformedFrame(
                "missing `type` field".to_string(),
            ))
        }
    };

    let payload = fields.remove("payload").unwrap_or(Value::Null);

    Ok(Frame { kind, payload })
}
