//! Question construction and grading errors.
//!
//! Configuration errors come from malformed question records and abort
//! building the question. Submission errors come from student input and are
//! turned into inline feedback by the widget layer.

use thiserror::Error;

use crate::kind::QuestionKind;

/// Errors raised while hashing answers, building questions or grading input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The hasher was asked for a kind it does not know.
    #[error("unsupported question kind: {0}")]
    UnsupportedQuestionKind(String),

    /// A question record carries an unrecognised `type` tag.
    #[error("unknown question type: {0}")]
    UnknownQuestionType(String),

    /// The feedback mapping lacks `correct` or `incorrect`.
    #[error("feedback is missing the `{0}` key")]
    MissingFeedbackKey(&'static str),

    /// A key required by the resolved question kind is absent.
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// A field is present but has the wrong shape.
    #[error("invalid `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Choice questions need at least two options.
    #[error("at least 2 options are required, found {found}")]
    EmptyOptionSet { found: usize },

    /// Selection questions need at least one correct option.
    #[error("the set of correct answers is empty")]
    EmptyAnswerSet,

    /// A stored answer digest matches none of the option keys.
    #[error("answer digest {0} does not match any option key")]
    AnswerNotInOptions(String),

    /// A stored digest is not 64 hexadecimal characters.
    #[error("invalid answer digest: {0:?}")]
    InvalidDigest(String),

    /// An answer value cannot be canonicalised for its kind.
    #[error("invalid {kind} answer: {reason}")]
    InvalidAnswer { kind: QuestionKind, reason: String },

    /// Student input (or an authored value) is not a finite number.
    #[error("invalid number: {0:?}")]
    InvalidNumberFormat(String),

    /// The submission shape does not fit the question's input control.
    #[error("submission does not fit a {expected} question")]
    SubmissionMismatch { expected: QuestionKind },

    /// Wraps an error with the id of the question it came from.
    #[error("question `{id}`: {source}")]
    Question {
        id: String,
        #[source]
        source: Box<QuizError>,
    },
}

impl QuizError {
    /// Attach a question id to this error.
    pub fn in_question(self, id: impl Into<String>) -> Self {
        QuizError::Question {
            id: id.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping question-id wrappers.
    pub fn root(&self) -> &QuizError {
        match self {
            QuizError::Question { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns `true` for errors caused by student input rather than by the
    /// question record. These are recovered at the UI boundary.
    pub fn is_submission_error(&self) -> bool {
        matches!(
            self.root(),
            QuizError::InvalidNumberFormat(_) | QuizError::SubmissionMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_unwraps_nested_question_context() {
        let err = QuizError::EmptyAnswerSet.in_question("q1").in_question("set");
        assert_eq!(err.root(), &QuizError::EmptyAnswerSet);
        assert!(err.to_string().contains("question `set`"));
    }

    #[test]
    fn submission_errors_are_classified() {
        assert!(QuizError::InvalidNumberFormat("abc".into()).is_submission_error());
        assert!(QuizError::SubmissionMismatch {
            expected: QuestionKind::Text
        }
        .in_question("q")
        .is_submission_error());
        assert!(!QuizError::MissingFeedbackKey("correct").is_submission_error());
        assert!(!QuizError::UnknownQuestionType("essay".into()).is_submission_error());
    }
}
