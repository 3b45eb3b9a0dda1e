//! Outbound ports - capabilities the session needs from infrastructure.

pub mod transport_port;

pub use transport_port::{CloseKind, Transport, TransportError, TransportEvent, TransportLink};

#[cfg(any(test, feature = "testing"))]
pub use transport_port::MockTransport;
