//! Live Quiz Protocol - wire types shared by the host and player clients
//!
//! This crate contains everything that crosses the realtime connection:
//! - The frame codec (`{type, payload}` JSON text frames)
//! - Typed inbound messages (`ServerMessage`) and outbound commands (`ClientMessage`)
//! - View payloads (quiz board, question, answer), buzz state and player info
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and thiserror
//! 2. **No presentation logic** - Pure data types and serialization
//! 3. **Lenient on input** - Unknown fields are ignored, unknown tags are reported, never fatal

pub mod codec;
pub mod messages;
pub mod views;

pub use codec::{decode, encode, encode_message, CodecError, Frame};
pub use messages::{error_lines, tags, ClientMessage, ServerMessage, TranslateError};
pub use views::{
    AnswerData, Board, BoardCategory, BuzzAction, BuzzState, BuzzStatus, PlayerInfo,
    QuestionData, QuestionSummary, View, ViewError, ViewKind, ViewPayload,
};
