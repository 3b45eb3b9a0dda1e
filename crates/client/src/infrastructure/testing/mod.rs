//! Test doubles for the session.

mod fake_transport;

pub use fake_transport::{LinkScript, ScriptedTransport};

/// Raw frames the quiz server sends.
pub mod frames {
    pub const BOARD: &str = r#"{"type":"set view","payload":{"view":"quiz_board","data":{"Cat1":[{"id":1,"value":"Q1"},null]}}}"#;
    pub const QUESTION: &str =
        r#"{"type":"set view","payload":{"view":"question","data":{"id":1,"text":"Q1?"}}}"#;
    pub const BUZZED_ALICE: &str =
        r#"{"type":"buzz event","payload":{"status":"buzzed","name":"Alice"}}"#;
    pub const BUZZ_OPEN: &str = r#"{"type":"buzz event","payload":{"status":"open"}}"#;
    pub const PLAYER_ADA: &str = r#"{"type":"player update","payload":{"name":"Ada","socket":"abc"}}"#;
    pub const INFO: &str = r#"{"type":"info","payload":"Host connected"}"#;
    pub const REFUSED: &str = r#"{"type":"error","payload":["Quiz code invalid"]}"#;
    pub const TERMINATED: &str = r#"{"type":"terminated"}"#;
    pub const UNKNOWN: &str = r#"{"type":"scoreboard","payload":{}}"#;
    pub const MALFORMED: &str = "{not json";
}
