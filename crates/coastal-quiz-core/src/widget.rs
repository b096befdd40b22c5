//! UI-agnostic question widgets.
//!
//! A hosting UI (terminal, notebook bridge, web page) asks a
//! [`QuestionWidget`] for its [`QuestionView`], draws it, and hands the
//! student's input back as a [`Submission`]. Grading itself is the pure
//! function [`respond`]; the widget only keeps the feedback text currently on
//! display.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::QuizError;
use crate::question::Question;

/// Label of the submit control.
pub const SUBMIT_LABEL: &str = "Submit";

/// Shown when a numeric answer cannot be parsed.
pub const INVALID_NUMBER_MESSAGE: &str = "Please enter a valid number.";

/// Shown when the input shape does not fit the question.
pub const MISMATCH_MESSAGE: &str = "This answer cannot be graded for this question.";

/// The input control a question is answered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    /// Pick exactly one label.
    RadioGroup { labels: Vec<String> },
    /// Tick any number of labels.
    CheckboxGroup { labels: Vec<String> },
    NumberInput { label: String },
    TextInput { placeholder: String },
}

/// Student input, shaped after the [`Control`] it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "input", content = "value", rename_all = "snake_case")]
pub enum Submission {
    /// The picked label, or `None` when the student submitted without picking.
    Choice(Option<String>),
    /// All ticked labels.
    Selection(Vec<String>),
    /// Raw text typed into a number field.
    Number(String),
    Text(String),
}

/// Outcome of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The input could not be graded; the student should try again.
    Invalid,
}

/// Feedback text plus verdict for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub verdict: Verdict,
    pub feedback: String,
}

/// Everything a UI needs to draw one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub name: String,
    pub prompt: String,
    pub control: Control,
    pub submit_label: String,
    /// Feedback from the latest submission, if any.
    pub feedback: Option<String>,
}

/// Grade a submission and pick the text to display.
///
/// Never fails: input errors become [`Verdict::Invalid`] with an inline
/// message so a bad entry cannot take down the session.
pub fn respond(question: &Question, submission: &Submission) -> Response {
    match question.check(submission) {
        Ok(correct) => Response {
            verdict: if correct {
                Verdict::Correct
            } else {
                Verdict::Incorrect
            },
            feedback: question.feedback().for_verdict(correct).to_string(),
        },
        Err(err) => {
            debug!(question = question.id(), error = %err, "submission could not be graded");
            let feedback = match err.root() {
                QuizError::InvalidNumberFormat(_) => INVALID_NUMBER_MESSAGE,
                _ => MISMATCH_MESSAGE,
            };
            Response {
                verdict: Verdict::Invalid,
                feedback: feedback.to_string(),
            }
        }
    }
}

/// A question bound to its on-screen feedback state.
#[derive(Debug, Clone)]
pub struct QuestionWidget {
    question: Question,
    feedback: Option<String>,
    attempts: u32,
}

impl QuestionWidget {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            feedback: None,
            attempts: 0,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Feedback currently on display.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Number of graded submissions so far. Invalid input does not count.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Assemble the prompt, input control, submit control and feedback.
    pub fn view(&self) -> QuestionView {
        QuestionView {
            name: self.question.name().to_string(),
            prompt: self.question.prompt().to_string(),
            control: self.question.control(),
            submit_label: SUBMIT_LABEL.to_string(),
            feedback: self.feedback.clone(),
        }
    }

    /// Grade `submission` and replace the displayed feedback.
    pub fn submit(&mut self, submission: &Submission) -> Verdict {
        let response = respond(&self.question, submission);
        if response.verdict != Verdict::Invalid {
            self.attempts += 1;
        }
        self.feedback = Some(response.feedback);
        response.verdict
    }

    /// Clear the feedback display.
    pub fn reset(&mut self) {
        self.feedback = None;
    }
}
