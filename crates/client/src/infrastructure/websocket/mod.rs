//! Realtime session over WebSocket
//!
//! - `core`: runtime-free state machine and message dispatch
//! - `session`: the tokio loop driving a core over a transport
//! - `desktop`: tokio-tungstenite transport

mod core;
mod desktop;
mod session;
mod shared;

pub use self::core::{CloseOutcome, DisconnectCause, SessionCore};
pub use desktop::{WebSocketLink, WebSocketTransport};
pub use session::Session;
pub use shared::{reconnect_delay, COMMAND_CHANNEL_CAPACITY, RECONNECT_DELAY_MS};
