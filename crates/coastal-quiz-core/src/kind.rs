//! The closed set of question kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

/// Supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    MultipleSelection,
    Numeric,
    Text,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::MultipleChoice,
        QuestionKind::MultipleSelection,
        QuestionKind::Numeric,
        QuestionKind::Text,
    ];

    /// The tag used in question-set JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::MultipleSelection => "multiple_selection",
            QuestionKind::Numeric => "numeric",
            QuestionKind::Text => "text",
        }
    }

    /// Whether records of this kind carry an `options` mapping.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            QuestionKind::MultipleChoice | QuestionKind::MultipleSelection
        )
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            "multiple_selection" => Ok(QuestionKind::MultipleSelection),
            "numeric" => Ok(QuestionKind::Numeric),
            "text" => Ok(QuestionKind::Text),
            other => Err(QuizError::UnsupportedQuestionKind(other.to_string())),
        }
    }
}
