//! Host role rendering
//!
//! The host drives the quiz: board questions are clickable, question and
//! answer views carry navigation controls, and the buzz area manages the buzz
//! window.

use livequiz_protocol::{
    AnswerData, BuzzAction, BuzzState, BuzzStatus, ClientMessage, QuestionData, QuestionSummary,
    ViewKind,
};

use super::page::{Element, Page, UiAction};
use super::renderer::{base, Renderer};

#[derive(Debug, Clone, Default)]
pub struct HostRenderer {
    page: Page,
}

impl HostRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn show(view: ViewKind, question_id: Option<i64>) -> UiAction {
        UiAction::Send(ClientMessage::SetView { view, question_id })
    }

    fn manage_buzz(action: BuzzAction) -> UiAction {
        UiAction::Send(ClientMessage::ManageBuzz { action })
    }

    fn back_to_board() -> Element {
        Element::button("Back to board", Self::show(ViewKind::QuizBoard, None))
    }
}

impl Renderer for HostRenderer {
    fn page(&self) -> &Page {
        &self.page
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    fn render_board_question(&mut self, question: &QuestionSummary) -> Element {
        base::board_question(question).with_action(Self::show(ViewKind::Question, Some(question.id)))
    }

    fn render_question(&mut self, question: &QuestionData) {
        base::render_question(&mut self.page, question);

        let content = self.page.content.child_mut();
        content.push(Element::button(
            "Reveal answer",
            Self::show(ViewKind::Answer, Some(question.id)),
        ));
        content.push(Self::back_to_board());
    }

    fn render_answer(&mut self, answer: &AnswerData) {
        base::render_answer(&mut self.page, answer);
        self.page.content.child_mut().push(Self::back_to_board());
    }

    fn render_buzz_area(&mut self, state: &BuzzState) {
        let area = match state.status {
            BuzzStatus::Inactive => Element::div().with_child(Element::button(
                "Open buzzers",
                Self::manage_buzz(BuzzAction::Start),
            )),
            BuzzStatus::Open => Element::div()
                .with_child(Element::paragraph("Buzzers are open."))
                .with_child(Element::button(
                    "Close buzzers",
                    Self::manage_buzz(BuzzAction::End),
                )),
            BuzzStatus::Buzzed => {
                let name = state.name.as_deref().unwrap_or("Someone");
                Element::div()
                    .with_child(Element::paragraph(format!("{name} buzzed in first.")))
                    .with_child(Element::button(
                        "Reset buzzers",
                        Self::manage_buzz(BuzzAction::End),
                    ))
            }
        };

        self.page.buzz.replace(area);
    }
}
