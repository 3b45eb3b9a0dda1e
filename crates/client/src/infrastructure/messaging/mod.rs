//! Command Bus and session state messaging infrastructure.
//!
//! - `CommandBus`: Send commands and UI actions into the session loop
//! - `SessionState` / `SessionStateObserver`: Observe the connection lifecycle

pub mod command_bus;
pub mod connection;

pub use command_bus::{BusMessage, CommandBus};
pub use connection::{set_session_state, SessionState, SessionStateObserver};
