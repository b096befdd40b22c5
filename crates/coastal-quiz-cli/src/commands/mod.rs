//! Subcommand implementations.

pub mod check;
pub mod download;
pub mod hash;
pub mod init;
pub mod list;
pub mod take;
pub mod upload;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use coastal_quiz_core::{AnswerForm, Control, QuestionFactory, QuestionSet, Submission};
use coastal_quiz_storage::{load_config_from, open_store, Location, QuestionStore};

/// Open the store behind a location string, loading storage config.
pub fn store_for(location: &str, config_path: Option<&PathBuf>) -> Result<Box<dyn QuestionStore>> {
    store_at(&Location::parse(location)?, config_path)
}

pub fn store_at(location: &Location, config_path: Option<&PathBuf>) -> Result<Box<dyn QuestionStore>> {
    let config = load_config_from(config_path.map(PathBuf::as_path))?;
    open_store(location, &config.storage)
}

/// Fetch a question set.
pub async fn read_set(location: &str, config_path: Option<&PathBuf>) -> Result<QuestionSet> {
    store_for(location, config_path)?.read_set().await
}

pub fn factory(plain: bool) -> QuestionFactory {
    QuestionFactory::new(if plain {
        AnswerForm::Plain
    } else {
        AnswerForm::Hashed
    })
}

/// Turn typed answers into a submission for `control`.
///
/// For option controls each entry may be a label, a 1-based option number or
/// an option key.
pub fn submission_for(control: &Control, answers: &[String]) -> Submission {
    let first = || answers.first().cloned().unwrap_or_default();
    match control {
        Control::RadioGroup { labels } => Submission::Choice(
            answers
                .first()
                .filter(|a| !a.trim().is_empty())
                .map(|a| resolve_label(labels, a)),
        ),
        Control::CheckboxGroup { labels } => Submission::Selection(
            answers
                .iter()
                .filter(|a| !a.trim().is_empty())
                .map(|a| resolve_label(labels, a))
                .collect(),
        ),
        Control::NumberInput { .. } => Submission::Number(first()),
        Control::TextInput { .. } => Submission::Text(first()),
    }
}

fn resolve_label(labels: &[String], entry: &str) -> String {
    let entry = entry.trim();
    if labels.iter().any(|l| l == entry) {
        return entry.to_string();
    }
    entry
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| labels.get(i))
        .cloned()
        .unwrap_or_else(|| entry.to_string())
}
