//! The `coastal-quiz take` command: a line-based quiz session.

use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use coastal_quiz_core::{Control, QuestionView, QuestionWidget, Submission, Verdict};

use super::{factory, read_set, submission_for};

pub async fn execute(source: String, plain: bool, config: Option<PathBuf>) -> Result<()> {
    let set = read_set(&source, config.as_ref()).await?;
    let questions = factory(plain).build_set(&set)?;
    let total = questions.len();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = std::io::stdout();

    let mut correct = 0usize;
    let mut answered = 0usize;

    'questions: for question in questions {
        let mut widget = QuestionWidget::new(question);
        let view = widget.view();
        print!("\n{}", render_view(&view));

        loop {
            write!(stdout, "> ")?;
            stdout.flush()?;

            let Some(line) = lines.next().transpose()? else {
                println!();
                break 'questions;
            };

            let submission = parse_line(&view.control, &line);
            let verdict = widget.submit(&submission);
            println!("{}", widget.feedback().unwrap_or_default());

            match verdict {
                Verdict::Invalid => continue,
                Verdict::Correct => correct += 1,
                Verdict::Incorrect => {}
            }
            answered += 1;
            break;
        }
    }

    println!("\nScore: {correct}/{total}");
    if answered < total {
        println!("{} question(s) left unanswered.", total - answered);
    }
    Ok(())
}

/// Plain-text rendering of a question view.
fn render_view(view: &QuestionView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", view.name, view.prompt);
    match &view.control {
        Control::RadioGroup { labels } => {
            for (i, label) in labels.iter().enumerate() {
                let _ = writeln!(out, "  {}) {label}", i + 1);
            }
            let _ = writeln!(out, "Pick one option, then press Enter to {}.", view.submit_label.to_lowercase());
        }
        Control::CheckboxGroup { labels } => {
            for (i, label) in labels.iter().enumerate() {
                let _ = writeln!(out, "  [{}] {label}", i + 1);
            }
            let _ = writeln!(out, "Pick all that apply, separated by commas.");
        }
        Control::NumberInput { label } => {
            let _ = writeln!(out, "{label}:");
        }
        Control::TextInput { placeholder } => {
            let _ = writeln!(out, "{placeholder}");
        }
    }
    out
}

/// Interpret one line of input for `control`.
fn parse_line(control: &Control, line: &str) -> Submission {
    let answers: Vec<String> = match control {
        Control::CheckboxGroup { .. } => line.split(',').map(str::to_string).collect(),
        _ => vec![line.to_string()],
    };
    submission_for(control, &answers)
}
