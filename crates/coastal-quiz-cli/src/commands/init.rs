//! The `coastal-quiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("coastal-quiz.toml").exists() {
        println!("coastal-quiz.toml already exists, skipping.");
    } else {
        std::fs::write("coastal-quiz.toml", SAMPLE_CONFIG)?;
        println!("Created coastal-quiz.toml");
    }

    std::fs::create_dir_all("questions")?;
    let example_path = std::path::Path::new("questions/example.json");
    if example_path.exists() {
        println!("questions/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTION_SET)?;
        println!("Created questions/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Set AZURE_STORAGE_ACCOUNT_NAME and AZURE_STORAGE_SAS_TOKEN (or edit coastal-quiz.toml)");
    println!("  2. Run: coastal-quiz take questions/example.json --plain");
    println!("  3. Run: coastal-quiz hash questions/example.json");
    println!("  4. Run: coastal-quiz upload questions/example_hashed.json az://<container>/example.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# coastal-quiz configuration

[storage]
account_name = "${AZURE_STORAGE_ACCOUNT_NAME}"
sas_token = "${AZURE_STORAGE_SAS_TOKEN}"
"#;

const EXAMPLE_QUESTION_SET: &str = r#"{
  "q1": {
    "type": "multiple_choice",
    "name": "Q1-1",
    "question": "Which of the following is common along the coast in the middle latitudes?",
    "options": {
      "a": "Salt marshes",
      "b": "Coral reefs",
      "c": "Tropical rainforests",
      "d": "Mangrove swamps"
    },
    "answer": "a",
    "feedback": {
      "correct": "Well done",
      "incorrect": "Unfortunately that is not correct."
    }
  },
  "q2": {
    "type": "multiple_selection",
    "name": "Q1-2",
    "question": "Select all features commonly found along a coastline",
    "options": {
      "a": "Beaches",
      "b": "Glaciers",
      "c": "Estuaries",
      "d": "Mountains"
    },
    "answers": ["a", "c"],
    "feedback": {
      "correct": "Correct!",
      "incorrect": "Incorrect, try again."
    }
  },
  "q3": {
    "type": "numeric",
    "name": "Q1-3",
    "question": "What is the relative importance of S2 vs M2 (amplitude ratio)?",
    "answer": 0.33,
    "kwargs": {"precision": 2},
    "feedback": {
      "correct": "Correct!",
      "incorrect": "Incorrect, check the tidal constituents table."
    }
  },
  "q4": {
    "type": "text",
    "name": "Q1-4",
    "question": "In which Dutch city is the TU Delft located?",
    "answer": "Delft",
    "feedback": {
      "correct": "Correct!",
      "incorrect": "Incorrect."
    }
  }
}
"#;
