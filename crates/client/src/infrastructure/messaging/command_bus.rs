//! Command Bus for sending commands to the quiz server.
//!
//! The CommandBus is the only way code outside the session loop reaches the
//! connection. It queues either a ready-made command or a UI action that the
//! session's renderer turns into a command.

use anyhow::Result;
use livequiz_protocol::ClientMessage;
use tokio::sync::mpsc;

use crate::ui::presentation::UiAction;

/// Message types sent through the command bus to the session loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusMessage {
    /// Fire-and-forget command
    Send(ClientMessage),
    /// A UI action activated by the user, with optional typed input
    Interact {
        action: UiAction,
        input: Option<String>,
    },
}

/// Command bus for sending messages to the quiz server.
///
/// This is a concrete struct (not a trait) that can be cloned and shared.
#[derive(Clone)]
pub struct CommandBus {
    tx: mpsc::Sender<BusMessage>,
}

impl CommandBus {
    /// Create a new CommandBus with the given channel sender.
    pub fn new(tx: mpsc::Sender<BusMessage>) -> Self {
        Self { tx }
    }

    /// Send a fire-and-forget command.
    ///
    /// Returns immediately after queueing the message. Commands queued while
    /// the session is not open are dropped by the session.
    pub fn send(&self, message: ClientMessage) -> Result<()> {
        self.tx
            .try_send(BusMessage::Send(message))
            .map_err(|e| anyhow::anyhow!("CommandBus send failed: {}", e))
    }

    /// Queue a UI action for the session's renderer.
    pub fn interact(&self, action: UiAction, input: Option<String>) -> Result<()> {
        self.tx
            .try_send(BusMessage::Interact { action, input })
            .map_err(|e| anyhow::anyhow!("CommandBus interact failed: {}", e))
    }
}
