//! Building typed questions from raw records.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::QuizError;
use crate::hash::Digest;
use crate::kind::QuestionKind;
use crate::question::{Feedback, Question, QuestionBody};
use crate::questions::{MultipleChoice, MultipleSelection, Numeric, Options, Text};
use crate::record::{hash_record, QuestionRecord, QuestionSet};

/// How answers are written in the records being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerForm {
    /// Answers are digests, as in published question sets.
    #[default]
    Hashed,
    /// Answers are plain values and get hashed on construction. Meant for
    /// authoring previews and tests.
    Plain,
}

/// Turns [`QuestionRecord`]s into [`Question`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionFactory {
    answers: AnswerForm,
}

impl QuestionFactory {
    pub fn new(answers: AnswerForm) -> Self {
        Self { answers }
    }

    pub fn hashed() -> Self {
        Self::new(AnswerForm::Hashed)
    }

    pub fn plain() -> Self {
        Self::new(AnswerForm::Plain)
    }

    pub fn answer_form(&self) -> AnswerForm {
        self.answers
    }

    /// Build one question. Errors carry the question id.
    pub fn build(&self, id: &str, record: &QuestionRecord) -> Result<Question, QuizError> {
        self.build_record(id, record)
            .map_err(|e| e.in_question(id))
    }

    /// Build every question of a set, in id order. Stops at the first invalid
    /// record: a broken question set should not be served partially.
    pub fn build_set(&self, set: &QuestionSet) -> Result<Vec<Question>, QuizError> {
        set.iter()
            .map(|(id, record)| self.build(id, record))
            .collect()
    }

    fn build_record(&self, id: &str, record: &QuestionRecord) -> Result<Question, QuizError> {
        let kind = record.resolve_kind()?;

        let record = match self.answers {
            AnswerForm::Hashed => Cow::Borrowed(record),
            AnswerForm::Plain => Cow::Owned(hash_record(record)?),
        };

        let name = required(&record.name, "name")?;
        let prompt = required(&record.question, "question")?;
        let feedback = Feedback::from_value(
            record
                .feedback
                .as_ref()
                .ok_or(QuizError::MissingRequiredField("feedback"))?,
        )?;

        if !kind.has_options() && record.options.is_some() {
            warn!(id, %kind, "ignoring options on a question without choices");
        }

        let body = match kind {
            QuestionKind::MultipleChoice => {
                let options = options(&record)?;
                let answer = digest(record.answer_value(kind)?, "answer")?;
                QuestionBody::MultipleChoice(MultipleChoice::new(options, answer)?)
            }
            QuestionKind::MultipleSelection => {
                let options = options(&record)?;
                let answers = record
                    .answer_value(kind)?
                    .as_array()
                    .ok_or_else(|| QuizError::InvalidField {
                        field: "answers",
                        reason: "expected a list of digests".into(),
                    })?
                    .iter()
                    .map(|v| digest(v, "answers"))
                    .collect::<Result<BTreeSet<_>, _>>()?;
                QuestionBody::MultipleSelection(MultipleSelection::new(options, answers)?)
            }
            QuestionKind::Numeric => {
                let answer = digest(record.answer_value(kind)?, "answer")?;
                QuestionBody::Numeric(Numeric::new(answer, record.resolve_precision()?))
            }
            QuestionKind::Text => {
                let answer = digest(record.answer_value(kind)?, "answer")?;
                QuestionBody::Text(Text::new(answer))
            }
        };

        debug!(id, %kind, "built question");
        Ok(Question::new(id, name, prompt, feedback, body))
    }
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str, QuizError> {
    field
        .as_deref()
        .ok_or(QuizError::MissingRequiredField(name))
}

fn options(record: &QuestionRecord) -> Result<Options, QuizError> {
    let options = record
        .options
        .clone()
        .ok_or(QuizError::MissingRequiredField("options"))?;
    Options::new(options)
}

fn digest(value: &Value, field: &'static str) -> Result<Digest, QuizError> {
    match value {
        Value::String(s) => s.parse(),
        other => Err(QuizError::InvalidField {
            field,
            reason: format!("expected an answer digest, found {other}; hash the set first"),
        }),
    }
}
