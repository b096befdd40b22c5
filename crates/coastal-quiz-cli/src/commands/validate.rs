//! The `coastal-quiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use coastal_quiz_core::record::validate_question_set;

use super::{factory, store_for};

pub async fn execute(source: String, plain: bool, config: Option<PathBuf>) -> Result<()> {
    let store = store_for(&source, config.as_ref())?;
    let set = store.read_set().await?;

    println!("Question set: {} ({} questions)", store.location(), set.len());

    let warnings = validate_question_set(&set);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    // construction errors are fatal
    let questions = factory(plain).build_set(&set)?;

    if warnings.is_empty() {
        println!("All {} questions valid.", questions.len());
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
