//! Status screen templates
//!
//! Named fragments swapped into the content region when the session ends or
//! cannot be reached.

use std::collections::HashMap;

use super::page::Element;

/// Id of the list that receives the server's refusal reasons.
pub const REFUSAL_REASONS_ID: &str = "connection-refused-reasons";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    ConnectionError,
    ConnectionRefused,
    UnknownError,
    TerminatedQuiz,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 4] = [
        TemplateKey::ConnectionError,
        TemplateKey::ConnectionRefused,
        TemplateKey::UnknownError,
        TemplateKey::TerminatedQuiz,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKey::ConnectionError => "connection-error-template",
            TemplateKey::ConnectionRefused => "connection-refused-template",
            TemplateKey::UnknownError => "unknown-error-template",
            TemplateKey::TerminatedQuiz => "terminated-quiz-template",
        }
    }

    fn fragment(self) -> Element {
        match self {
            TemplateKey::ConnectionError => Element::div()
                .with_class("status")
                .with_child(Element::heading("Connection lost"))
                .with_child(Element::paragraph(
                    "Could not reach the quiz server. Trying again shortly.",
                )),
            TemplateKey::ConnectionRefused => Element::div()
                .with_class("status")
                .with_child(Element::heading("Connection refused"))
                .with_child(Element::paragraph("The quiz server turned us away:"))
                .with_child(Element::new("ul").with_id(REFUSAL_REASONS_ID)),
            TemplateKey::UnknownError => Element::div()
                .with_class("status")
                .with_child(Element::heading("Something went wrong"))
                .with_child(Element::paragraph(
                    "The quiz server closed the connection without saying why.",
                )),
            TemplateKey::TerminatedQuiz => Element::div()
                .with_class("status")
                .with_child(Element::heading("Quiz over"))
                .with_child(Element::paragraph("This quiz has been closed by its host.")),
        }
    }
}

/// The standard status templates keyed by name.
pub fn default_templates() -> HashMap<String, Element> {
    TemplateKey::ALL
        .into_iter()
        .map(|key| (key.as_str().to_string(), key.fragment()))
        .collect()
}
