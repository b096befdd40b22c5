//! Questions answered with a number.

use tracing::debug;

use crate::error::QuizError;
use crate::hash::{hash_numeric, parse_number, Digest};
use crate::kind::QuestionKind;
use crate::question::AnswerCheck;
use crate::widget::{Control, Submission};

/// A numeric answer digest and the precision it was canonicalised with.
///
/// Submissions are rounded the same way before hashing, see
/// [`crate::hash::canonical_number`].
#[derive(Debug, Clone, PartialEq)]
pub struct Numeric {
    answer: Digest,
    precision: Option<u32>,
}

impl Numeric {
    pub fn new(answer: Digest, precision: Option<u32>) -> Self {
        Self { answer, precision }
    }

    /// Build from a plain value, hashing it at the given precision.
    pub fn from_value(value: f64, precision: Option<u32>) -> Result<Self, QuizError> {
        Ok(Self::new(hash_numeric(value, precision)?, precision))
    }

    pub fn precision(&self) -> Option<u32> {
        self.precision
    }
}

impl AnswerCheck for Numeric {
    fn kind(&self) -> QuestionKind {
        QuestionKind::Numeric
    }

    fn control(&self) -> Control {
        Control::NumberInput {
            label: "Your Answer".to_string(),
        }
    }

    fn check(&self, submission: &Submission) -> Result<bool, QuizError> {
        let Submission::Number(input) = submission else {
            return Err(QuizError::SubmissionMismatch { expected: self.kind() });
        };
        let value = parse_number(input)?;
        debug!(value, precision = ?self.precision, "grading numeric answer");
        Ok(hash_numeric(value, self.precision)? == self.answer)
    }
}
