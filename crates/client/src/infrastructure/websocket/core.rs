//! Runtime-free core of the quiz session.
//!
//! [`SessionCore`] owns the lifecycle state machine and the message dispatch.
//! It never touches a socket or a timer: the session loop feeds it transport
//! events and acts on the [`CloseOutcome`] it returns. This keeps every
//! state transition testable without a runtime.

use std::sync::atomic::AtomicU8;
use std::sync::Arc;
use std::time::Duration;

use livequiz_protocol::{decode, error_lines, tags, Frame, ServerMessage, TranslateError};

use crate::infrastructure::messaging::{set_session_state, SessionState};
use crate::ports::outbound::CloseKind;
use crate::ui::presentation::{Renderer, TemplateKey};

use super::shared::reconnect_delay;

/// Why a session ended for good.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectCause {
    /// Clean close before any frame was decoded
    NoContext,
    /// Clean close right after an `error` frame, with its reason lines
    Refused(Vec<String>),
    /// Clean close after `terminated`
    Expected,
    /// Clean close after any other frame; carries its tag
    Unclassified(String),
}

impl DisconnectCause {
    /// Classify a clean close by the last decoded frame.
    pub fn classify(last_message: Option<&Frame>) -> Self {
        match last_message {
            None => DisconnectCause::NoContext,
            Some(frame) if frame.is(tags::ERROR) => {
                DisconnectCause::Refused(error_lines(&frame.payload))
            }
            Some(frame) if frame.is(tags::TERMINATED) => DisconnectCause::Expected,
            Some(frame) => DisconnectCause::Unclassified(frame.kind.clone()),
        }
    }

    /// Status screen to show for this cause, if any.
    pub fn template(&self) -> Option<TemplateKey> {
        match self {
            DisconnectCause::NoContext | DisconnectCause::Unclassified(_) => {
                Some(TemplateKey::UnknownError)
            }
            DisconnectCause::Refused(_) => Some(TemplateKey::ConnectionRefused),
            DisconnectCause::Expected => None,
        }
    }
}

/// What the session loop does after a link is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    Reconnect { delay: Duration },
    Ended(DisconnectCause),
}

pub struct SessionCore {
    endpoint: String,
    state: SessionState,
    shared_state: Arc<AtomicU8>,
    last_message: Option<Frame>,
    attempts: u32,
}

impl SessionCore {
    pub fn new(endpoint: impl Into<String>, shared_state: Arc<AtomicU8>) -> Self {
        set_session_state(&shared_state, SessionState::Connecting);
        Self {
            endpoint: endpoint.into(),
            state: SessionState::Connecting,
            shared_state,
            last_message: None,
            attempts: 0,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn last_message(&self) -> Option<&Frame> {
        self.last_message.as_ref()
    }

    /// Number of connection attempts started so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    fn transition(&mut self, next: SessionState) {
        if !self.state.can_transition_to(next) {
            tracing::error!(from = ?self.state, to = ?next, "Invalid session state transition");
            return;
        }
        tracing::debug!(from = ?self.state, to = ?next, "Session state changed");
        self.state = next;
        set_session_state(&self.shared_state, next);
    }

    /// Start a new connection attempt.
    pub fn begin_attempt(&mut self) {
        if self.state != SessionState::Connecting {
            self.transition(SessionState::Connecting);
        }
        self.attempts += 1;
    }

    pub fn on_open(&mut self) {
        self.transition(SessionState::Open);
        tracing::info!(attempt = self.attempts, "Session open");
    }

    /// The handshake never completed.
    pub fn on_connect_failed(&mut self, renderer: &mut dyn Renderer) -> CloseOutcome {
        self.transition(SessionState::ClosedUnclean);
        renderer.render_template(TemplateKey::ConnectionError.as_str(), None);
        self.schedule_reconnect()
    }

    fn schedule_reconnect(&mut self) -> CloseOutcome {
        self.transition(SessionState::ReconnectPending);
        let delay = reconnect_delay();
        tracing::info!(
            attempt = self.attempts,
            delay_ms = delay.as_millis() as u64,
            "Reconnect scheduled"
        );
        CloseOutcome::Reconnect { delay }
    }

    /// Handle one raw inbound frame. Returns whether the page changed.
    pub fn on_message(&mut self, raw: &str, renderer: &mut dyn Renderer) -> bool {
        let frame = match decode(raw) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "Dropping malformed frame");
                return false;
            }
        };

        let message = ServerMessage::try_from(&frame);
        self.last_message = Some(frame);

        match message {
            Ok(ServerMessage::SetView(payload)) => {
                renderer.render_view(&payload);
                true
            }
            Ok(ServerMessage::BuzzEvent(state)) => {
                renderer.render_buzz_area(&state);
                true
            }
            Ok(ServerMessage::PlayerUpdate(info)) => {
                renderer.render_player_info(&info);
                true
            }
            Ok(ServerMessage::Info(payload)) => {
                tracing::info!(payload = %payload, "Server info");
                false
            }
            Ok(ServerMessage::Error(lines)) => {
                for line in &lines {
                    tracing::error!(reason = %line, "Server reported an error");
                }
                false
            }
            Ok(ServerMessage::Terminated) => {
                tracing::info!("Quiz terminated");
                renderer.render_template(TemplateKey::TerminatedQuiz.as_str(), None);
                true
            }
            Err(TranslateError::UnmatchedMessageType(kind)) => {
                tracing::error!(kind = %kind, "Unmatched message");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring message with invalid payload");
                false
            }
        }
    }

    /// Handle the end of an open link.
    pub fn on_close(&mut self, kind: CloseKind, renderer: &mut dyn Renderer) -> CloseOutcome {
        match kind {
            CloseKind::Unclean => {
                tracing::warn!("Connection dropped");
                self.transition(SessionState::ClosedUnclean);
                self.schedule_reconnect()
            }
            CloseKind::Clean => {
                self.transition(SessionState::ClosedClean);

                let cause = DisconnectCause::classify(self.last_message.as_ref());
                tracing::info!(cause = ?cause, "Connection closed by server");

                if let Some(template) = cause.template() {
                    let lines = match &cause {
                        DisconnectCause::Refused(lines) => Some(lines.as_slice()),
                        _ => None,
                    };
                    renderer.render_template(template.as_str(), lines);
                }

                CloseOutcome::Ended(cause)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::frames;
    use crate::ui::presentation::{HostRenderer, Page, PlayerRenderer, REFUSAL_REASONS_ID};

    fn open_core() -> SessionCore {
        let mut core = SessionCore::new("/ws/live/play/ABC", Arc::new(AtomicU8::new(0)));
        core.begin_attempt();
        core.on_open();
        core
    }

    fn shows(page: &Page, key: TemplateKey) -> bool {
        page.template(key.as_str()) == Some(page.content.child())
    }

    #[test]
    fn test_board_frame_renders_categories() {
        let mut core = open_core();
        let mut host = HostRenderer::new();

        assert!(core.on_message(frames::BOARD, &mut host));

        let board = host.page().content.child();
        assert_eq!(board.children.len(), 1);
        let group = &board.children[0];
        assert_eq!(group.children[0].text.as_deref(), Some("Cat1"));
        assert_eq!(group.children.len(), 3);
        assert!(group.children[2].is_placeholder());
    }

    #[test]
    fn test_buzzed_frame_names_winner_for_player() {
        let mut core = open_core();
        let mut player = PlayerRenderer::new();

        core.on_message(frames::BUZZ_OPEN, &mut player);
        core.on_message(frames::BUZZED_ALICE, &mut player);

        let area = player.page().buzz.child();
        assert_eq!(area.texts(), ["Alice was the first to buzz in."]);
        assert!(area.actions().is_empty());
    }

    #[test]
    fn test_player_update_ignores_extra_fields() {
        let mut core = open_core();
        let mut player = PlayerRenderer::new();

        assert!(core.on_message(frames::PLAYER_ADA, &mut player));

        let region = player.page().player_info.as_ref().expect("player region");
        assert_eq!(region.child().texts()[0], "Playing as Ada");
    }

    #[test]
    fn test_last_message_skips_malformed_frames() {
        let mut core = open_core();
        let mut host = HostRenderer::new();
        assert!(core.last_message().is_none());

        core.on_message(frames::QUESTION, &mut host);
        assert!(!core.on_message(frames::MALFORMED, &mut host));
        assert!(!core.on_message(r#"{"payload":1}"#, &mut host));

        assert_eq!(core.last_message().map(|f| f.kind.as_str()), Some(tags::SET_VIEW));
        assert_eq!(core.state(), SessionState::Open);
    }

    #[test]
    fn test_unknown_tag_is_recorded_but_not_rendered() {
        let mut core = open_core();
        let mut host = HostRenderer::new();
        let before = host.page().content.child().clone();

        assert!(!core.on_message(frames::UNKNOWN, &mut host));

        assert_eq!(host.page().content.child(), &before);
        assert_eq!(core.last_message().map(|f| f.kind.as_str()), Some("scoreboard"));
        assert_eq!(core.state(), SessionState::Open);
    }

    #[test]
    fn test_info_and_error_frames_do_not_render() {
        let mut core = open_core();
        let mut host = HostRenderer::new();
        let before = host.page().content.child().clone();

        assert!(!core.on_message(frames::INFO, &mut host));
        assert!(!core.on_message(frames::REFUSED, &mut host));

        assert_eq!(host.page().content.child(), &before);
        assert_eq!(core.state(), SessionState::Open);
    }

    #[test]
    fn test_invalid_payload_is_ignored() {
        let mut core = open_core();
        let mut player = PlayerRenderer::new();
        let before = player.page().buzz.child().clone();

        assert!(!core.on_message(
            r#"{"type":"buzz event","payload":{"status":"sideways"}}"#,
            &mut player
        ));
        assert_eq!(player.page().buzz.child(), &before);
    }

    #[test]
    fn test_refusal_shows_reason_lines() {
        let mut core = open_core();
        let mut player = PlayerRenderer::new();

        core.on_message(frames::REFUSED, &mut player);
        let outcome = core.on_close(CloseKind::Clean, &mut player);

        assert_eq!(
            outcome,
            CloseOutcome::Ended(DisconnectCause::Refused(vec!["Quiz code invalid".to_string()]))
        );
        let reasons = player
            .page()
            .content
            .child()
            .find(REFUSAL_REASONS_ID)
            .expect("reason list");
        assert_eq!(reasons.texts(), ["Quiz code invalid"]);
        assert_eq!(core.state(), SessionState::ClosedClean);
    }

    #[test]
    fn test_terminated_renders_immediately_and_close_adds_nothing() {
        let mut core = open_core();
        let mut host = HostRenderer::new();

        assert!(core.on_message(frames::TERMINATED, &mut host));
        assert!(shows(host.page(), TemplateKey::TerminatedQuiz));

        let outcome = core.on_close(CloseKind::Clean, &mut host);
        assert_eq!(outcome, CloseOutcome::Ended(DisconnectCause::Expected));
        assert!(shows(host.page(), TemplateKey::TerminatedQuiz));
    }

    #[test]
    fn test_terminated_screen_stays_through_unclean_close() {
        let mut core = open_core();
        let mut host = HostRenderer::new();

        core.on_message(frames::TERMINATED, &mut host);
        core.on_close(CloseKind::Unclean, &mut host);

        assert!(shows(host.page(), TemplateKey::TerminatedQuiz));
    }

    #[test]
    fn test_clean_close_without_context_is_unknown_error() {
        let mut core = open_core();
        let mut host = HostRenderer::new();

        let outcome = core.on_close(CloseKind::Clean, &mut host);

        assert_eq!(outcome, CloseOutcome::Ended(DisconnectCause::NoContext));
        assert!(shows(host.page(), TemplateKey::UnknownError));
    }

    #[test]
    fn test_clean_close_after_other_frame_is_unclassified() {
        let mut core = open_core();
        let mut host = HostRenderer::new();

        core.on_message(frames::BOARD, &mut host);
        let outcome = core.on_close(CloseKind::Clean, &mut host);

        assert_eq!(
            outcome,
            CloseOutcome::Ended(DisconnectCause::Unclassified(tags::SET_VIEW.to_string()))
        );
        assert!(shows(host.page(), TemplateKey::UnknownError));
    }

    #[test]
    fn test_unclean_close_schedules_single_reconnect() {
        let mut core = open_core();
        let mut host = HostRenderer::new();
        core.on_message(frames::BOARD, &mut host);
        let before = host.page().content.child().clone();

        let outcome = core.on_close(CloseKind::Unclean, &mut host);

        assert_eq!(
            outcome,
            CloseOutcome::Reconnect {
                delay: Duration::from_millis(5_000)
            }
        );
        assert_eq!(core.state(), SessionState::ReconnectPending);
        assert_eq!(host.page().content.child(), &before);

        core.begin_attempt();
        assert_eq!(core.state(), SessionState::Connecting);
        assert_eq!(core.attempts(), 2);
    }

    #[test]
    fn test_failed_handshake_shows_connection_error() {
        let state = Arc::new(AtomicU8::new(0));
        let mut core = SessionCore::new("/ws/live/host/ABC", Arc::clone(&state));
        let mut host = HostRenderer::new();
        core.begin_attempt();

        let outcome = core.on_connect_failed(&mut host);

        assert!(matches!(outcome, CloseOutcome::Reconnect { .. }));
        assert!(shows(host.page(), TemplateKey::ConnectionError));
        assert_eq!(
            SessionState::from_u8(state.load(std::sync::atomic::Ordering::SeqCst)),
            SessionState::ReconnectPending
        );
    }

    #[test]
    fn test_invalid_transition_is_ignored() {
        let mut core = SessionCore::new("/ws/live/host/ABC", Arc::new(AtomicU8::new(0)));
        let mut host = HostRenderer::new();

        core.on_close(CloseKind::Clean, &mut host);

        assert_eq!(core.state(), SessionState::Connecting);
    }

    #[test]
    fn test_classify_error_payload_shapes() {
        let single = Frame::new(tags::ERROR, serde_json::json!("Quiz full"));
        assert_eq!(
            DisconnectCause::classify(Some(&single)),
            DisconnectCause::Refused(vec!["Quiz full".to_string()])
        );

        let empty = Frame::new(tags::ERROR, serde_json::Value::Null);
        assert_eq!(
            DisconnectCause::classify(Some(&empty)),
            DisconnectCause::Refused(Vec::new())
        );
    }
}
