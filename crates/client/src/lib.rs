//! Live Quiz client crate.
//!
//! This crate contains the realtime session, the presentation model with its
//! host and player renderers, and the desktop websocket transport.

pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod ui;

// Re-export commonly used entrypoints
pub use config::{ClientConfig, Role};
pub use infrastructure::websocket::{DisconnectCause, Session};
pub use ui::presentation::{HostRenderer, Page, PlayerRenderer, Renderer};
