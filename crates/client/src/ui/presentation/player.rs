//! Player role rendering
//!
//! Players see the same views as the host without navigation controls. On
//! top of that they get a buzz button and a player-info region with their
//! current name.

use livequiz_protocol::{BuzzState, BuzzStatus, ClientMessage, PlayerInfo};

use super::page::{Element, Page, UiAction};
use super::renderer::Renderer;

#[derive(Debug, Clone)]
pub struct PlayerRenderer {
    page: Page,
}

impl PlayerRenderer {
    pub fn new() -> Self {
        Self {
            page: Page::new().with_player_info(),
        }
    }
}

impl Default for PlayerRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlayerRenderer {
    fn page(&self) -> &Page {
        &self.page
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    fn render_buzz_area(&mut self, state: &BuzzState) {
        let area = match state.status {
            BuzzStatus::Open => Element::div().with_child(Element::button(
                "Buzz in!",
                UiAction::Send(ClientMessage::BuzzIn {}),
            )),
            BuzzStatus::Inactive => {
                Element::div().with_child(Element::paragraph("Buzzing is not open."))
            }
            BuzzStatus::Buzzed => {
                let name = state.name.as_deref().unwrap_or("Someone");
                Element::div().with_child(Element::paragraph(format!(
                    "{name} was the first to buzz in."
                )))
            }
        };

        self.page.buzz.replace(area);
    }

    fn render_player_info(&mut self, info: &PlayerInfo) {
        let Some(region) = self.page.player_info.as_mut() else {
            return;
        };

        region.replace(
            Element::div()
                .with_child(Element::paragraph(format!("Playing as {}", info.name)))
                .with_child(Element::button("Change name", UiAction::ChangeName)),
        );
    }

    fn perform(&mut self, action: UiAction, input: Option<&str>) -> Option<ClientMessage> {
        match action {
            UiAction::Send(message) => Some(message),
            UiAction::ChangeName => {
                let name = input.map(str::trim).unwrap_or_default();
                if name.is_empty() {
                    tracing::warn!("Ignoring name change without a name");
                    return None;
                }
                Some(ClientMessage::SetPlayerName {
                    name: name.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livequiz_protocol::{QuestionData, ViewKind, ViewPayload};
    use serde_json::json;

    #[test]
    fn test_open_buzz_shows_buzz_button() {
        let mut player = PlayerRenderer::new();
        player.render_buzz_area(&BuzzState {
            status: BuzzStatus::Open,
            name: None,
        });

        assert_eq!(
            player.page().buzz.child().actions(),
            vec![&UiAction::Send(ClientMessage::BuzzIn {})]
        );
    }

    #[test]
    fn test_closed_buzz_names_the_winner_without_controls() {
        let mut player = PlayerRenderer::new();
        player.render_buzz_area(&BuzzState {
            status: BuzzStatus::Open,
            name: None,
        });
        player.render_buzz_area(&BuzzState {
            status: BuzzStatus::Buzzed,
            name: Some("Ada".to_string()),
        });

        let area = player.page().buzz.child();
        assert_eq!(area.texts(), ["Ada was the first to buzz in."]);
        assert!(area.actions().is_empty());

        player.render_buzz_area(&BuzzState {
            status: BuzzStatus::Inactive,
            name: None,
        });
        assert_eq!(
            player.page().buzz.child().texts(),
            ["Buzzing is not open."]
        );
    }

    #[test]
    fn test_player_info_replaces_previous_name() {
        let mut player = PlayerRenderer::new();
        player.render_player_info(&PlayerInfo {
            name: "Ada".to_string(),
        });
        player.render_player_info(&PlayerInfo {
            name: "Grace".to_string(),
        });

        let region = player.page().player_info.as_ref().expect("player region");
        assert_eq!(region.child().texts(), ["Playing as Grace", "Change name"]);
    }

    #[test]
    fn test_player_board_is_read_only() {
        let mut player = PlayerRenderer::new();
        player.render_view(&ViewPayload::new(
            ViewKind::QuizBoard,
            json!({"Cat1": [{"id": 1, "value": "Q1"}]}),
        ));
        player.render_question(&QuestionData {
            id: 1,
            text: "Q1?".to_string(),
        });

        assert!(player.page().actions().is_empty());
        assert_eq!(player.page().content.child().texts(), ["Q1?"]);
    }

    #[test]
    fn test_change_name_requires_input() {
        let mut player = PlayerRenderer::new();

        assert_eq!(
            player.perform(UiAction::ChangeName, Some("  Grace ")),
            Some(ClientMessage::SetPlayerName {
                name: "Grace".to_string()
            })
        );
        assert_eq!(player.perform(UiAction::ChangeName, Some("   ")), None);
        assert_eq!(player.perform(UiAction::ChangeName, None), None);
    }
}
