//! Transport Port - the duplex realtime channel a session talks through
//!
//! A [`Transport`] opens one [`TransportLink`] per connection attempt. The link
//! yields inbound text frames and finally exactly one close event saying
//! whether the close was orderly.

use async_trait::async_trait;
use url::Url;

/// How a link ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseKind {
    /// Orderly close handshake initiated by the server
    Clean,
    /// Network failure, abrupt drop or a handshake that never completed
    Unclean,
}

/// Something that happened on an open link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Frame(String),
    Closed(CloseKind),
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("Failed to send frame: {0}")]
    Send(String),
}

/// Port for opening realtime connections
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a link to `url`. An error means the handshake never completed.
    async fn connect(&self, url: &Url) -> Result<Box<dyn TransportLink>, TransportError>;
}

/// One live connection
#[async_trait]
pub trait TransportLink: Send {
    /// Send a text frame
    async fn send(&mut self, frame: String) -> Result<(), TransportError>;

    /// Wait for the next inbound frame or the close of the link
    async fn next_event(&mut self) -> TransportEvent;

    /// Close the link, ignoring failures
    async fn close(&mut self);
}
