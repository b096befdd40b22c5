//! The `coastal-quiz download` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use coastal_quiz_core::record::parse_question_set;

use super::store_for;

pub async fn execute(source: String, file: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let store = store_for(&source, config.as_ref())?;
    let bytes = store.read_bytes().await?;

    let content = std::str::from_utf8(&bytes)
        .with_context(|| format!("{} is not valid UTF-8", store.location()))?;
    let set = parse_question_set(content)
        .with_context(|| format!("invalid question set: {}", store.location()))?;

    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file, &bytes)
        .with_context(|| format!("failed to write {}", file.display()))?;

    println!(
        "Downloaded {} ({} questions) to {}",
        store.location(),
        set.len(),
        file.display()
    );
    Ok(())
}
