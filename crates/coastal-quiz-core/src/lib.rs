//! coastal-quiz-core — question model, answer hashing and grading.
//!
//! This crate defines the closed set of question kinds used by the course
//! notebooks, the digest scheme that keeps answer keys out of plain sight in
//! published question sets, and a UI-agnostic controller that grades
//! submissions and tracks the feedback shown to the student.

pub mod error;
pub mod factory;
pub mod hash;
pub mod kind;
pub mod question;
pub mod questions;
pub mod record;
pub mod widget;

pub use error::QuizError;
pub use factory::{AnswerForm, QuestionFactory};
pub use hash::{hash_answer, Digest, HashedAnswer};
pub use kind::QuestionKind;
pub use question::{AnswerCheck, Feedback, Question, QuestionBody};
pub use record::{QuestionRecord, QuestionSet};
pub use widget::{respond, Control, QuestionView, QuestionWidget, Response, Submission, Verdict};
