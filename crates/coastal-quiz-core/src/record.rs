//! Raw question records and question-set JSON.
//!
//! Records are deliberately loose: they mirror the JSON authors write, keep
//! unknown keys (hints, notes) so a read/write round trip is lossless, and
//! defer all checking to [`crate::factory::QuestionFactory`].

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::QuizError;
use crate::hash::{hash_answer, precision_out_of_range, HashedAnswer, MAX_PRECISION};
use crate::kind::QuestionKind;

/// A question-set entry as stored in JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Prompt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
    /// Single answer: a digest, or the raw answer before hashing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
    /// Selection answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kwargs: Option<Map<String, Value>>,
    /// Older sets put precision at the top level instead of in `kwargs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Anything else the author wrote.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Question records keyed by question id.
pub type QuestionSet = BTreeMap<String, QuestionRecord>;

impl QuestionRecord {
    /// The record's `type`, resolved to a kind.
    pub fn resolve_kind(&self) -> Result<QuestionKind, QuizError> {
        let tag = self
            .kind
            .as_deref()
            .ok_or(QuizError::MissingRequiredField("type"))?;
        tag.parse()
            .map_err(|_| QuizError::UnknownQuestionType(tag.to_string()))
    }

    /// Numeric precision from `kwargs.precision`, falling back to a
    /// top-level `precision`. Values above [`MAX_PRECISION`] are rejected.
    pub fn resolve_precision(&self) -> Result<Option<u32>, QuizError> {
        let from_kwargs = self.kwargs.as_ref().and_then(|kw| kw.get("precision"));
        let precision = match from_kwargs {
            None | Some(Value::Null) => self.precision.map(u64::from),
            Some(value) => Some(value.as_u64().ok_or_else(|| QuizError::InvalidField {
                field: "precision",
                reason: format!("expected a non-negative integer, found {value}"),
            })?),
        };
        match precision {
            Some(p) if p > u64::from(MAX_PRECISION) => Err(precision_out_of_range(p)),
            // bounded above, so the cast is lossless
            p => Ok(p.map(|p| p as u32)),
        }
    }

    /// The value holding the correct answer(s) for this kind.
    ///
    /// Selection answers live in `answers`; sets written by earlier tooling
    /// kept the list under `answer`, which is accepted when it is an array.
    pub fn answer_value(&self, kind: QuestionKind) -> Result<&Value, QuizError> {
        match kind {
            QuestionKind::MultipleSelection => self
                .answers
                .as_ref()
                .or(self.answer.as_ref().filter(|a| a.is_array()))
                .ok_or(QuizError::MissingRequiredField("answers")),
            _ => self
                .answer
                .as_ref()
                .ok_or(QuizError::MissingRequiredField("answer")),
        }
    }
}

/// Parse question-set JSON.
pub fn parse_question_set(content: &str) -> Result<QuestionSet> {
    serde_json::from_str(content).context("failed to parse question set JSON")
}

/// Serialize a question set as pretty JSON.
pub fn question_set_to_json(set: &QuestionSet) -> Result<String> {
    serde_json::to_string_pretty(set).context("failed to serialize question set")
}

/// Read a question set from a local JSON file.
pub fn read_question_set(path: &Path) -> Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question set: {}", path.display()))?;
    parse_question_set(&content)
        .with_context(|| format!("invalid question set: {}", path.display()))
}

/// Write a question set to a local JSON file, creating parent directories.
pub fn write_question_set(set: &QuestionSet, path: &Path) -> Result<()> {
    let json = question_set_to_json(set)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write question set to {}", path.display()))?;
    Ok(())
}

/// Replace the plain answer of one record with its digest(s).
pub fn hash_record(record: &QuestionRecord) -> Result<QuestionRecord, QuizError> {
    let kind = record.resolve_kind()?;
    let precision = record.resolve_precision()?;
    let hashed = hash_answer(record.answer_value(kind)?, kind.as_str(), precision)?;

    let mut out = record.clone();
    match hashed {
        HashedAnswer::Set(_) => {
            out.answers = Some(hashed.to_value());
            if out.answer.as_ref().is_some_and(Value::is_array) {
                out.answer = None;
            }
        }
        HashedAnswer::Single(_) => out.answer = Some(hashed.to_value()),
    }
    Ok(out)
}

/// Hash the answers of every record, as done before publishing a set.
pub fn hash_question_set(set: &QuestionSet) -> Result<QuestionSet, QuizError> {
    set.iter()
        .map(|(id, record)| {
            hash_record(record)
                .map(|hashed| (id.clone(), hashed))
                .map_err(|e| e.in_question(id.as_str()))
        })
        .collect()
}

/// A warning from question-set validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    pub message: String,
}

/// Check a question set for issues that do not stop it from loading.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |id: &str, message: String| {
        warnings.push(ValidationWarning {
            question_id: Some(id.to_string()),
            message,
        })
    };

    // Display names double as widget titles
    let mut seen_names = HashSet::new();
    for (id, record) in set {
        if let Some(name) = &record.name {
            if !seen_names.insert(name.as_str()) {
                warn(id, format!("duplicate question name: {name}"));
            }
        }
    }

    for (id, record) in set {
        if record.question.as_deref().is_some_and(|q| q.trim().is_empty()) {
            warn(id, "question text is empty".into());
        }

        if let Some(options) = &record.options {
            let mut labels = HashSet::new();
            for label in options.values() {
                if !labels.insert(label.as_str()) {
                    warn(id, format!("duplicate option label: {label}"));
                }
            }
        }

        let Ok(kind) = record.resolve_kind() else {
            continue;
        };

        if !kind.has_options() && record.options.is_some() {
            warn(id, format!("options are ignored for {kind} questions"));
        }

        if kind == QuestionKind::Numeric && record.answer.as_ref().is_some_and(Value::is_number) {
            warn(id, "numeric answer is stored in plain text".into());
        }
    }

    warnings
}
