//! The `coastal-quiz upload` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use coastal_quiz_core::record::parse_question_set;

use super::store_for;

pub async fn execute(file: PathBuf, destination: String, config: Option<PathBuf>) -> Result<()> {
    let bytes = std::fs::read(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    // refuse to publish something notebooks cannot load
    let content = std::str::from_utf8(&bytes)
        .with_context(|| format!("{} is not valid UTF-8", file.display()))?;
    let set = parse_question_set(content)
        .with_context(|| format!("invalid question set: {}", file.display()))?;

    let store = store_for(&destination, config.as_ref())?;
    store.write_bytes(bytes).await?;

    println!(
        "Uploaded {} ({} questions) to {}",
        file.display(),
        set.len(),
        store.location()
    );
    Ok(())
}
