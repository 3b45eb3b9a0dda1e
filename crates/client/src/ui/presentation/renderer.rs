//! Renderer capability set
//!
//! [`Renderer`] has one method per kind of view state the server can push.
//! Every method has a default built from the free functions in [`base`], so a
//! role only overrides what it renders differently and can still call the
//! base behavior before extending its result.

use livequiz_protocol::{
    AnswerData, Board, BuzzState, ClientMessage, PlayerInfo, QuestionData, QuestionSummary, View,
    ViewError, ViewPayload,
};

use super::page::{Element, Page, UiAction};

/// Turns protocol messages into page state.
pub trait Renderer: Send {
    fn page(&self) -> &Page;

    fn page_mut(&mut self) -> &mut Page;

    /// Dispatch a `set view` payload to the matching view renderer.
    fn render_view(&mut self, payload: &ViewPayload) {
        match payload.parse() {
            Ok(View::QuizBoard(board)) => self.render_board(&board),
            Ok(View::Question(question)) => self.render_question(&question),
            Ok(View::Answer(answer)) => self.render_answer(&answer),
            Err(ViewError::UnknownView(view)) => {
                tracing::error!(view = %view, "Cannot render view");
            }
            Err(e) => tracing::warn!(error = %e, "Ignoring view with invalid data"),
        }
    }

    fn render_board(&mut self, board: &Board) {
        let element = base::board(board, |question| self.render_board_question(question));
        self.page_mut().content.replace(element);
    }

    fn render_board_question(&mut self, question: &QuestionSummary) -> Element {
        base::board_question(question)
    }

    fn render_question(&mut self, question: &QuestionData) {
        base::render_question(self.page_mut(), question);
    }

    fn render_answer(&mut self, answer: &AnswerData) {
        base::render_answer(self.page_mut(), answer);
    }

    fn render_buzz_area(&mut self, state: &BuzzState) {
        tracing::debug!(status = ?state.status, "Buzz area not rendered for this role");
    }

    fn render_player_info(&mut self, info: &PlayerInfo) {
        tracing::debug!(name = %info.name, "Player info not rendered for this role");
    }

    /// Swap the content region for a named status template.
    fn render_template(&mut self, key: &str, lines: Option<&[String]>) {
        base::render_template(self.page_mut(), key, lines);
    }

    /// Turn an activated UI action into the command to send, if any.
    fn perform(&mut self, action: UiAction, _input: Option<&str>) -> Option<ClientMessage> {
        match action {
            UiAction::Send(message) => Some(message),
            UiAction::ChangeName => {
                tracing::warn!("This role cannot change player names");
                None
            }
        }
    }
}

/// Base rendering shared by every role.
pub mod base {
    use super::*;
    use crate::ui::presentation::templates::REFUSAL_REASONS_ID;

    pub const BOARD_ID: &str = "livequiz_board";
    pub const QUESTION_ID: &str = "livequiz_question";
    pub const ANSWER_ID: &str = "livequiz_answer";

    /// Build the board: one labelled group per category, one element per slot.
    pub fn board(
        board: &Board,
        mut question: impl FnMut(&QuestionSummary) -> Element,
    ) -> Element {
        let mut root = Element::div().with_id(BOARD_ID);

        for category in &board.categories {
            let mut group = Element::div()
                .with_class("category")
                .with_child(Element::heading(category.name.clone()));

            for slot in &category.slots {
                group.push(match slot {
                    Some(summary) => question(summary),
                    None => Element::placeholder(),
                });
            }

            root.push(group);
        }

        root
    }

    pub fn board_question(question: &QuestionSummary) -> Element {
        Element::paragraph(question.value.clone()).with_class("question")
    }

    pub fn render_question(page: &mut Page, question: &QuestionData) {
        page.content.replace(
            Element::div()
                .with_id(QUESTION_ID)
                .with_child(Element::paragraph(question.text.clone())),
        );
    }

    pub fn render_answer(page: &mut Page, answer: &AnswerData) {
        page.content.replace(
            Element::div()
                .with_id(ANSWER_ID)
                .with_child(Element::paragraph(answer.text.clone()))
                .with_child(Element::paragraph(answer.answer.clone()).with_class("answer")),
        );
    }

    pub fn render_template(page: &mut Page, key: &str, lines: Option<&[String]>) {
        let Some(template) = page.template(key) else {
            tracing::error!(template = key, "Missing template id");
            return;
        };

        let mut fragment = template.clone();
        if let Some(lines) = lines {
            if let Some(list) = fragment.find_mut(REFUSAL_REASONS_ID) {
                list.children = lines.iter().map(Element::list_item).collect();
            }
        }

        page.content.replace(fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::base::{ANSWER_ID, BOARD_ID, QUESTION_ID};
    use super::*;
    use crate::ui::presentation::templates::{TemplateKey, REFUSAL_REASONS_ID};
    use livequiz_protocol::{BuzzStatus, ViewKind};
    use serde_json::json;

    /// A role that overrides nothing.
    struct BareRenderer {
        page: Page,
    }

    impl Renderer for BareRenderer {
        fn page(&self) -> &Page {
            &self.page
        }

        fn page_mut(&mut self) -> &mut Page {
            &mut self.page
        }
    }

    fn bare() -> BareRenderer {
        BareRenderer { page: Page::new() }
    }

    #[test]
    fn test_render_board_groups_and_placeholders() {
        let mut renderer = bare();
        renderer.render_view(&ViewPayload::new(
            ViewKind::QuizBoard,
            json!({"Cat1": [{"id": 1, "value": "Q1"}, null]}),
        ));

        let board = renderer.page().content.child();
        assert_eq!(board.id.as_deref(), Some(BOARD_ID));
        assert_eq!(board.children.len(), 1);

        let group = &board.children[0];
        assert_eq!(group.children[0].text.as_deref(), Some("Cat1"));
        let slots = &group.children[1..];
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].text.as_deref(), Some("Q1"));
        assert!(slots[1].is_placeholder());
    }

    #[test]
    fn test_base_board_has_no_actions() {
        let mut renderer = bare();
        renderer.render_view(&ViewPayload::new(
            ViewKind::QuizBoard,
            json!({"A": [{"id": 1, "value": 100}]}),
        ));
        assert!(renderer.page().actions().is_empty());
    }

    #[test]
    fn test_render_twice_leaves_single_child() {
        let mut renderer = bare();
        let first = QuestionData {
            id: 1,
            text: "First?".to_string(),
        };
        let second = QuestionData {
            id: 2,
            text: "Second?".to_string(),
        };

        renderer.render_question(&first);
        renderer.render_question(&second);

        let content = renderer.page().content.child();
        assert_eq!(content.id.as_deref(), Some(QUESTION_ID));
        assert_eq!(content.texts(), ["Second?"]);
    }

    #[test]
    fn test_render_answer_shows_question_and_answer() {
        let mut renderer = bare();
        renderer.render_answer(&AnswerData {
            id: Some(4),
            text: "4*9".to_string(),
            answer: "36".to_string(),
        });

        let content = renderer.page().content.child();
        assert_eq!(content.id.as_deref(), Some(ANSWER_ID));
        assert_eq!(content.texts(), ["4*9", "36"]);
    }

    #[test]
    fn test_unknown_view_leaves_page_untouched() {
        let mut renderer = bare();
        let before = renderer.page().content.child().clone();

        renderer.render_view(&ViewPayload {
            view: "scoreboard".to_string(),
            data: json!({}),
        });
        renderer.render_view(&ViewPayload::new(ViewKind::Question, json!("garbage")));

        assert_eq!(renderer.page().content.child(), &before);
    }

    #[test]
    fn test_default_buzz_and_player_info_are_no_ops() {
        let mut renderer = bare();
        let before = renderer.page().buzz.child().clone();

        renderer.render_buzz_area(&BuzzState {
            status: BuzzStatus::Open,
            name: None,
        });
        renderer.render_player_info(&PlayerInfo {
            name: "Nobody".to_string(),
        });

        assert_eq!(renderer.page().buzz.child(), &before);
        assert!(renderer.page().player_info.is_none());
    }

    #[test]
    fn test_refusal_template_lists_reasons() {
        let mut renderer = bare();
        let lines = vec!["Quiz code invalid".to_string()];

        renderer.render_template(TemplateKey::ConnectionRefused.as_str(), Some(&lines));

        let reasons = renderer
            .page()
            .content
            .child()
            .find(REFUSAL_REASONS_ID)
            .expect("reason list");
        assert_eq!(reasons.children.len(), 1);
        assert_eq!(reasons.children[0].tag, "li");
        assert_eq!(reasons.children[0].text.as_deref(), Some("Quiz code invalid"));
    }

    #[test]
    fn test_template_render_is_idempotent() {
        let mut renderer = bare();
        let lines = vec!["a".to_string(), "b".to_string()];

        renderer.render_template(TemplateKey::ConnectionRefused.as_str(), Some(&lines));
        renderer.render_template(TemplateKey::ConnectionRefused.as_str(), Some(&lines));

        let reasons = renderer
            .page()
            .content
            .child()
            .find(REFUSAL_REASONS_ID)
            .expect("reason list");
        assert_eq!(reasons.children.len(), 2);
    }

    #[test]
    fn test_missing_template_is_skipped() {
        let mut renderer = bare();
        renderer
            .page_mut()
            .remove_template(TemplateKey::TerminatedQuiz.as_str());
        let before = renderer.page().content.child().clone();

        renderer.render_template(TemplateKey::TerminatedQuiz.as_str(), None);
        renderer.render_template("no-such-template", None);

        assert_eq!(renderer.page().content.child(), &before);
    }

    #[test]
    fn test_default_perform_sends_fixed_commands_only() {
        let mut renderer = bare();

        assert_eq!(
            renderer.perform(UiAction::Send(ClientMessage::BuzzIn {}), None),
            Some(ClientMessage::BuzzIn {})
        );
        assert_eq!(renderer.perform(UiAction::ChangeName, Some("Zed")), None);
    }
}
