//! The `coastal-quiz list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::read_set;

const PROMPT_WIDTH: usize = 60;

pub async fn execute(source: String, config: Option<PathBuf>) -> Result<()> {
    let set = read_set(&source, config.as_ref()).await?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Type", "Name", "Question"]);

    for (id, record) in &set {
        table.add_row(vec![
            Cell::new(id),
            Cell::new(record.kind.as_deref().unwrap_or("?")),
            Cell::new(record.name.as_deref().unwrap_or("")),
            Cell::new(truncate(record.question.as_deref().unwrap_or(""), PROMPT_WIDTH)),
        ]);
    }

    println!("{table}");
    println!("{} question(s)", set.len());
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() <= width && !text.contains('\n') {
        return line.to_string();
    }
    let cut: String = line.chars().take(width.saturating_sub(3)).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_long_and_multiline_prompts() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 10), "abcdefg...");
        assert_eq!(truncate("first\nsecond", 10), "first...");
    }
}
