//! Infrastructure: location resolution, messaging and the websocket session.

pub mod location;
pub mod messaging;
pub mod websocket;

#[cfg(test)]
pub(crate) mod testing;
