//! View, buzz and player payloads
//!
//! A `set view` payload names the view and carries view-specific data. The
//! data stays untyped in [`ViewPayload`] until a renderer asks for it with
//! [`ViewPayload::parse`], so an unknown view name can be reported without
//! failing the whole message.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// =============================================================================
// Views
// =============================================================================

/// The views a live quiz can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    QuizBoard,
    Question,
    Answer,
}

impl ViewKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::QuizBoard => "quiz_board",
            ViewKind::Question => "question",
            ViewKind::Answer => "answer",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw `set view` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPayload {
    pub view: String,
    #[serde(default)]
    pub data: Value,
}

/// A parsed view with typed data
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    QuizBoard(Board),
    Question(QuestionData),
    Answer(AnswerData),
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Cannot render view: {0}")]
    UnknownView(String),

    #[error("Invalid data for view `{view}`: {source}")]
    InvalidData {
        view: ViewKind,
        #[source]
        source: serde_json::Error,
    },
}

impl ViewPayload {
    pub fn new(view: ViewKind, data: Value) -> Self {
        Self {
            view: view.as_str().to_string(),
            data,
        }
    }

    /// Parse the view name and its data.
    pub fn parse(&self) -> Result<View, ViewError> {
        let invalid = |view| move |source| ViewError::InvalidData { view, source };

        match self.view.as_str() {
            "quiz_board" => Board::deserialize(&self.data)
                .map(View::QuizBoard)
                .map_err(invalid(ViewKind::QuizBoard)),
            "question" => QuestionData::deserialize(&self.data)
                .map(View::Question)
                .map_err(invalid(ViewKind::Question)),
            "answer" => AnswerData::deserialize(&self.data)
                .map(View::Answer)
                .map_err(invalid(ViewKind::Answer)),
            other => Err(ViewError::UnknownView(other.to_string())),
        }
    }
}

// =============================================================================
// Quiz Board
// =============================================================================

/// The quiz board: categories in the order the server listed them.
///
/// On the wire this is a JSON object mapping category names to slot lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub categories: Vec<BoardCategory>,
}

/// One board column
#[derive(Debug, Clone, PartialEq)]
pub struct BoardCategory {
    pub name: String,
    /// `None` marks an empty cell (question already played)
    pub slots: Vec<Option<QuestionSummary>>,
}

/// A question as shown on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: i64,
    /// Point value or label; numbers are kept as their decimal text
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BoardVisitor;

        impl<'de> Visitor<'de> for BoardVisitor {
            type Value = Board;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to question slots")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Board, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut categories = Vec::new();
                while let Some((name, slots)) =
                    map.next_entry::<String, Vec<Option<QuestionSummary>>>()?
                {
                    categories.push(BoardCategory { name, slots });
                }
                Ok(Board { categories })
            }
        }

        deserializer.deserialize_map(BoardVisitor)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.slots)?;
        }
        map.end()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

// =============================================================================
// Question / Answer
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionData {
    pub id: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerData {
    /// Echo of the question id, when the server includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub text: String,
    pub answer: String,
}

// =============================================================================
// Buzz / Player
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuzzStatus {
    /// No buzz window
    #[serde(rename = "none")]
    Inactive,
    #[serde(rename = "open")]
    Open,
    /// Someone buzzed first; older servers call this `closed`
    #[serde(rename = "buzzed", alias = "closed")]
    Buzzed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuzzState {
    pub status: BuzzStatus,
    /// Set only when `status` is `Buzzed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuzzAction {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
}
