//! Single-answer questions picked from a radio list.

use tracing::debug;

use crate::error::QuizError;
use crate::hash::{hash_choice, Digest};
use crate::kind::QuestionKind;
use crate::question::AnswerCheck;
use crate::widget::{Control, Submission};

use super::Options;

/// One correct option key, stored as a digest.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleChoice {
    options: Options,
    answer: Digest,
}

impl MultipleChoice {
    /// Fails with `AnswerNotInOptions` when the digest matches no option key,
    /// since such a question could never be answered correctly.
    pub fn new(options: Options, answer: Digest) -> Result<Self, QuizError> {
        if options.key_for(&answer).is_none() {
            return Err(QuizError::AnswerNotInOptions(answer.to_string()));
        }
        Ok(Self { options, answer })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl AnswerCheck for MultipleChoice {
    fn kind(&self) -> QuestionKind {
        QuestionKind::MultipleChoice
    }

    fn control(&self) -> Control {
        Control::RadioGroup {
            labels: self.options.labels(),
        }
    }

    fn check(&self, submission: &Submission) -> Result<bool, QuizError> {
        let selected = match submission {
            Submission::Choice(selected) => selected.as_deref(),
            _ => return Err(QuizError::SubmissionMismatch { expected: self.kind() }),
        };

        // nothing picked, or a label we do not offer: graded wrong
        let Some(key) = selected.and_then(|s| self.options.resolve(s)) else {
            debug!(?selected, "choice did not resolve to an option");
            return Ok(false);
        };

        Ok(hash_choice(key) == self.answer)
    }
}
