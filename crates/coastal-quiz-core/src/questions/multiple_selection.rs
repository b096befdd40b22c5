//! Questions where every correct option must be ticked, and nothing else.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::QuizError;
use crate::hash::{hash_selection, Digest};
use crate::kind::QuestionKind;
use crate::question::AnswerCheck;
use crate::widget::{Control, Submission};

use super::Options;

/// A set of correct option keys, each stored as its own digest.
///
/// Grading is all-or-nothing: a subset or a superset of the correct keys is
/// wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleSelection {
    options: Options,
    answers: BTreeSet<Digest>,
}

impl MultipleSelection {
    pub fn new(options: Options, answers: BTreeSet<Digest>) -> Result<Self, QuizError> {
        if answers.is_empty() {
            return Err(QuizError::EmptyAnswerSet);
        }
        if let Some(stray) = answers.iter().find(|d| options.key_for(d).is_none()) {
            return Err(QuizError::AnswerNotInOptions(stray.to_string()));
        }
        Ok(Self { options, answers })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Number of options a correct submission ticks.
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }
}

impl AnswerCheck for MultipleSelection {
    fn kind(&self) -> QuestionKind {
        QuestionKind::MultipleSelection
    }

    fn control(&self) -> Control {
        Control::CheckboxGroup {
            labels: self.options.labels(),
        }
    }

    fn check(&self, submission: &Submission) -> Result<bool, QuizError> {
        let Submission::Selection(selected) = submission else {
            return Err(QuizError::SubmissionMismatch { expected: self.kind() });
        };

        let keys: Option<Vec<&str>> = selected.iter().map(|s| self.options.resolve(s)).collect();
        let Some(keys) = keys else {
            debug!(?selected, "selection contains an unknown option");
            return Ok(false);
        };

        Ok(hash_selection(keys) == self.answers)
    }
}
