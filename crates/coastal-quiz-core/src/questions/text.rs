//! Free-text questions, matched exactly but case-insensitively.

use crate::error::QuizError;
use crate::hash::{hash_text, Digest};
use crate::kind::QuestionKind;
use crate::question::AnswerCheck;
use crate::widget::{Control, Submission};

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    answer: Digest,
}

impl Text {
    pub fn new(answer: Digest) -> Self {
        Self { answer }
    }

    pub fn from_value(answer: &str) -> Self {
        Self::new(hash_text(answer))
    }
}

impl AnswerCheck for Text {
    fn kind(&self) -> QuestionKind {
        QuestionKind::Text
    }

    fn control(&self) -> Control {
        Control::TextInput {
            placeholder: "Enter your answer here...".to_string(),
        }
    }

    fn check(&self, submission: &Submission) -> Result<bool, QuizError> {
        match submission {
            Submission::Text(input) => Ok(hash_text(input) == self.answer),
            _ => Err(QuizError::SubmissionMismatch { expected: self.kind() }),
        }
    }
}
