//! The `coastal-quiz hash` command.

use std::path::PathBuf;

use anyhow::Result;

use coastal_quiz_core::record::hash_question_set;
use coastal_quiz_storage::Location;

use super::{store_at, store_for};

pub async fn execute(source: String, output: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let source_store = store_for(&source, config.as_ref())?;
    let target = match output {
        Some(output) => Location::parse(&output)?,
        None => source_store.location().hashed_sibling(),
    };

    let set = source_store.read_set().await?;
    let hashed = hash_question_set(&set)?;

    let target_store = store_at(&target, config.as_ref())?;
    target_store.write_set(&hashed).await?;

    tracing::info!(questions = hashed.len(), "questions processed and stored");
    println!(
        "Hashed {} question(s) from {} into {}",
        hashed.len(),
        source_store.location(),
        target_store.location()
    );

    Ok(())
}
