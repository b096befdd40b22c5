//! The `coastal-quiz check` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use coastal_quiz_core::{respond, Verdict};

use super::{factory, store_for, submission_for};

pub async fn execute(
    source: String,
    id: String,
    answers: Vec<String>,
    plain: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let store = store_for(&source, config.as_ref())?;
    let set = store.read_set().await?;
    let record = set
        .get(&id)
        .with_context(|| format!("no question `{id}` in {}", store.location()))?;
    let question = factory(plain).build(&id, record)?;

    let submission = submission_for(&question.control(), &answers);
    let response = respond(&question, &submission);

    println!("{}", response.feedback);
    let verdict = match response.verdict {
        Verdict::Correct => "correct",
        Verdict::Incorrect => "incorrect",
        Verdict::Invalid => "invalid",
    };
    println!("Verdict: {verdict}");

    Ok(())
}
