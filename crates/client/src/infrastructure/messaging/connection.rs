//! Session lifecycle state.
//!
//! The session state machine is explicit: every state is a variant and the
//! allowed moves are listed in [`SessionState::can_transition_to`]. The state
//! is mirrored into an `AtomicU8` so observers can read it without owning the
//! session.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Connection state of a live quiz session.
///
/// ```text
/// Connecting -> Open -> ClosedClean
///      |          |
///      +----------+--> ClosedUnclean -> ReconnectPending -> Connecting
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Attempting to establish a connection
    Connecting,
    /// Handshake completed, frames flowing
    Open,
    /// Server closed the connection in an orderly way (terminal)
    ClosedClean,
    /// Connection dropped or never opened
    ClosedUnclean,
    /// Waiting out the reconnect delay
    ReconnectPending,
}

impl SessionState {
    /// Convert to u8 for atomic storage.
    pub fn to_u8(self) -> u8 {
        match self {
            SessionState::Connecting => 0,
            SessionState::Open => 1,
            SessionState::ClosedClean => 2,
            SessionState::ClosedUnclean => 3,
            SessionState::ReconnectPending => 4,
        }
    }

    /// Convert from u8 (atomic storage).
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => SessionState::Open,
            2 => SessionState::ClosedClean,
            3 => SessionState::ClosedUnclean,
            4 => SessionState::ReconnectPending,
            _ => SessionState::Connecting,
        }
    }

    /// Transition table of the session state machine.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;

        matches!(
            (self, next),
            (Connecting, Open)
                | (Connecting, ClosedUnclean)
                | (Open, ClosedClean)
                | (Open, ClosedUnclean)
                | (ClosedUnclean, ReconnectPending)
                | (ReconnectPending, Connecting)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == SessionState::ClosedClean
    }
}

/// Observable session state for UI binding.
///
/// Multiple observers can share the same underlying state.
#[derive(Clone)]
pub struct SessionStateObserver {
    state: Arc<AtomicU8>,
}

impl SessionStateObserver {
    /// Create a new observer from a shared state Arc.
    pub fn new(state: Arc<AtomicU8>) -> Self {
        Self { state }
    }

    /// Get the current session state.
    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Check if currently connected.
    pub fn is_open(&self) -> bool {
        self.state() == SessionState::Open
    }
}

/// Internal helper to publish the session state (used by the session loop).
pub fn set_session_state(state_ref: &AtomicU8, new_state: SessionState) {
    state_ref.store(new_state.to_u8(), Ordering::SeqCst);
}
