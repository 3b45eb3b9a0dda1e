//! Constants shared by the session loop and its transports.

use std::time::Duration;

/// Fixed delay between an unclean close and the next connection attempt.
/// There is no attempt limit.
pub const RECONNECT_DELAY_MS: u64 = 5_000;

/// Capacity of the command bus feeding the session loop.
pub const COMMAND_CHANNEL_CAPACITY: usize = 32;

pub fn reconnect_delay() -> Duration {
    Duration::from_millis(RECONNECT_DELAY_MS)
}
