//! Typed message types for host/player ↔ server communication
//!
//! Inbound frames are decoded in two steps: [`crate::codec::decode`] yields an
//! untyped [`Frame`], then [`ServerMessage::try_from`] lifts it into a typed
//! message. Keeping the steps apart lets the session remember every decoded
//! frame, including ones whose tag it does not understand.
//!
//! Outbound commands are adjacently tagged so they serialize straight into the
//! `{type, payload}` frame shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::Frame;
use crate::views::{BuzzAction, BuzzState, PlayerInfo, ViewKind, ViewPayload};

/// Wire tags used by the live quiz protocol.
pub mod tags {
    pub const SET_VIEW: &str = "set view";
    pub const BUZZ_EVENT: &str = "buzz event";
    pub const PLAYER_UPDATE: &str = "player update";
    pub const INFO: &str = "info";
    pub const ERROR: &str = "error";
    pub const TERMINATED: &str = "terminated";

    pub const MANAGE_BUZZ: &str = "manage buzz";
    pub const BUZZ_IN: &str = "buzz in";
    pub const SET_PLAYER_NAME: &str = "set player name";
}

// =============================================================================
// Server Messages (Server → Client)
// =============================================================================

/// Messages from the server to a host or player client
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    /// Switch the main view (board, question or answer)
    SetView(ViewPayload),
    /// Buzz window opened, closed or won
    BuzzEvent(BuzzState),
    /// The player's identity changed
    PlayerUpdate(PlayerInfo),
    /// Informational text, logged only
    Info(Value),
    /// Reasons the server is about to refuse or drop the connection
    Error(Vec<String>),
    /// The quiz was destroyed
    Terminated,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Unmatched message type: {0}")]
    UnmatchedMessageType(String),

    #[error("Invalid payload for `{kind}`: {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ServerMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::SetView(_) => tags::SET_VIEW,
            ServerMessage::BuzzEvent(_) => tags::BUZZ_EVENT,
            ServerMessage::PlayerUpdate(_) => tags::PLAYER_UPDATE,
            ServerMessage::Info(_) => tags::INFO,
            ServerMessage::Error(_) => tags::ERROR,
            ServerMessage::Terminated => tags::TERMINATED,
        }
    }
}

impl TryFrom<&Frame> for ServerMessage {
    type Error = TranslateError;

    fn try_from(frame: &Frame) -> Result<Self, TranslateError> {
        let invalid = |source| TranslateError::InvalidPayload {
            kind: frame.kind.clone(),
            source,
        };

        match frame.kind.as_str() {
            tags::SET_VIEW => ViewPayload::deserialize(&frame.payload)
                .map(ServerMessage::SetView)
                .map_err(invalid),
            tags::BUZZ_EVENT => BuzzState::deserialize(&frame.payload)
                .map(ServerMessage::BuzzEvent)
                .map_err(invalid),
            tags::PLAYER_UPDATE => PlayerInfo::deserialize(&frame.payload)
                .map(ServerMessage::PlayerUpdate)
                .map_err(invalid),
            tags::INFO => Ok(ServerMessage::Info(frame.payload.clone())),
            tags::ERROR => Ok(ServerMessage::Error(error_lines(&frame.payload))),
            tags::TERMINATED => Ok(ServerMessage::Terminated),
            other => Err(TranslateError::UnmatchedMessageType(other.to_string())),
        }
    }
}

/// Reason lines carried by an `error` payload.
///
/// The server sends an ordered list of strings. A bare string is treated as a
/// single line and `null` as no lines; anything else is kept as its JSON text.
pub fn error_lines(payload: &Value) -> Vec<String> {
    match payload {
        Value::Null => Vec::new(),
        Value::String(line) => vec![line.clone()],
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(line) => line.clone(),
                other => other.to_string(),
            })
            .collect(),
        other => vec![other.to_string()],
    }
}

// =============================================================================
// Client Messages (Client → Server)
// =============================================================================

/// Commands from a host or player client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Host moves every display to another view
    #[serde(rename = "set view")]
    SetView {
        view: ViewKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question_id: Option<i64>,
    },
    /// Host opens or closes the buzz window
    #[serde(rename = "manage buzz")]
    ManageBuzz { action: BuzzAction },
    /// Player buzzes in
    #[serde(rename = "buzz in")]
    BuzzIn {},
    /// Player asks for a new display name
    #[serde(rename = "set player name")]
    SetPlayerName { name: String },
}

impl ClientMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::SetView { .. } => tags::SET_VIEW,
            ClientMessage::ManageBuzz { .. } => tags::MANAGE_BUZZ,
            ClientMessage::BuzzIn {} => tags::BUZZ_IN,
            ClientMessage::SetPlayerName { .. } => tags::SET_PLAYER_NAME,
        }
    }
}
