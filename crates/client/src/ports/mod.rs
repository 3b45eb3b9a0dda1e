//! Ports - the seams between the session and the outside world.

pub mod outbound;
