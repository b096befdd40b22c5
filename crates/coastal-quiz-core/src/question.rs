//! The question model shared by every kind.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::QuizError;
use crate::kind::QuestionKind;
use crate::questions::{MultipleChoice, MultipleSelection, Numeric, Text};
use crate::widget::{Control, Submission};

/// What every question kind provides to the widget layer.
pub trait AnswerCheck {
    /// The kind tag of this question.
    fn kind(&self) -> QuestionKind;

    /// The input control students answer with.
    fn control(&self) -> Control;

    /// Grade a submission. `Ok(false)` is an ordinary wrong answer; errors
    /// are reserved for input that cannot be graded at all.
    fn check(&self, submission: &Submission) -> Result<bool, QuizError>;
}

/// Text shown after grading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: String,
    pub incorrect: String,
}

impl Feedback {
    pub fn new(correct: impl Into<String>, incorrect: impl Into<String>) -> Self {
        Self {
            correct: correct.into(),
            incorrect: incorrect.into(),
        }
    }

    /// Build from a loose `{"correct": ..., "incorrect": ...}` mapping.
    /// Extra keys are ignored.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, QuizError> {
        let correct = map
            .get("correct")
            .ok_or(QuizError::MissingFeedbackKey("correct"))?;
        let incorrect = map
            .get("incorrect")
            .ok_or(QuizError::MissingFeedbackKey("incorrect"))?;
        Ok(Self::new(correct.as_str(), incorrect.as_str()))
    }

    /// Build from the raw JSON value of a record's `feedback` field.
    pub fn from_value(value: &Value) -> Result<Self, QuizError> {
        let object = value.as_object().ok_or_else(|| QuizError::InvalidField {
            field: "feedback",
            reason: "expected an object with `correct` and `incorrect`".into(),
        })?;
        let text = |key: &'static str| match object.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(QuizError::InvalidField {
                field: "feedback",
                reason: format!("`{key}` must be a string"),
            }),
            None => Err(QuizError::MissingFeedbackKey(key)),
        };
        Ok(Self::new(text("correct")?, text("incorrect")?))
    }

    pub fn for_verdict(&self, correct: bool) -> &str {
        if correct {
            &self.correct
        } else {
            &self.incorrect
        }
    }
}

/// Kind-specific answer data.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionBody {
    MultipleChoice(MultipleChoice),
    MultipleSelection(MultipleSelection),
    Numeric(Numeric),
    Text(Text),
}

impl QuestionBody {
    fn as_check(&self) -> &dyn AnswerCheck {
        match self {
            QuestionBody::MultipleChoice(q) => q,
            QuestionBody::MultipleSelection(q) => q,
            QuestionBody::Numeric(q) => q,
            QuestionBody::Text(q) => q,
        }
    }
}

impl AnswerCheck for QuestionBody {
    fn kind(&self) -> QuestionKind {
        self.as_check().kind()
    }

    fn control(&self) -> Control {
        self.as_check().control()
    }

    fn check(&self, submission: &Submission) -> Result<bool, QuizError> {
        self.as_check().check(submission)
    }
}

/// A single question, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: String,
    name: String,
    prompt: String,
    feedback: Feedback,
    body: QuestionBody,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        prompt: impl Into<String>,
        feedback: Feedback,
        body: QuestionBody,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prompt: prompt.into(),
            feedback,
            body,
        }
    }

    /// Key of this question in its question set.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, e.g. "Q1-3".
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn body(&self) -> &QuestionBody {
        &self.body
    }

    pub fn kind(&self) -> QuestionKind {
        self.body.kind()
    }

    pub fn control(&self) -> Control {
        self.body.control()
    }

    pub fn check(&self, submission: &Submission) -> Result<bool, QuizError> {
        self.body.check(submission)
    }
}
