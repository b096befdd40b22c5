//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn coastal_quiz() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("coastal-quiz").unwrap();
    cmd.env_remove("AZURE_STORAGE_ACCOUNT_NAME")
        .env_remove("AZURE_STORAGE_SAS_TOKEN")
        .env_remove("AZURE_STORAGE_ENDPOINT")
        .env_remove("RUST_LOG");
    cmd
}

/// A temp dir with `coastal-quiz init` already run in it.
fn initialized_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    coastal_quiz()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

fn in_dir(dir: &Path) -> Command {
    let mut cmd = coastal_quiz();
    cmd.current_dir(dir).env("HOME", dir);
    cmd
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    in_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created coastal-quiz.toml"))
        .stdout(predicate::str::contains("Created questions/example.json"));

    assert!(dir.path().join("coastal-quiz.toml").exists());
    assert!(dir.path().join("questions/example.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = initialized_dir();

    in_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}

#[test]
fn validate_plain_example() {
    let dir = initialized_dir();

    in_dir(dir.path())
        .args(["validate", "questions/example.json", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(4 questions)"))
        .stdout(predicate::str::contains("numeric answer is stored in plain text"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_unhashed_set_without_plain_fails() {
    let dir = initialized_dir();

    in_dir(dir.path())
        .args(["validate", "questions/example.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("question `q1`"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();

    in_dir(dir.path())
        .args(["validate", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn validate_malformed_json() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    in_dir(dir.path())
        .args(["validate", "broken.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid question set"));
}

#[test]
fn hash_writes_sibling_and_validates() {
    let dir = initialized_dir();

    in_dir(dir.path())
        .args(["hash", "questions/example.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hashed 4 question(s)"))
        .stdout(predicate::str::contains("example_hashed.json"));

    let hashed_path = dir.path().join("questions/example_hashed.json");
    let hashed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&hashed_path).unwrap()).unwrap();
    let text_answer = hashed["q4"]["answer"].as_str().unwrap();
    assert_eq!(text_answer.len(), 64);
    assert_ne!(text_answer, "Delft");
    assert_eq!(hashed["q2"]["answers"].as_array().unwrap().len(), 2);

    in_dir(dir.path())
        .args(["validate", "questions/example_hashed.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All 4 questions valid."));
}

#[test]
fn hash_to_explicit_output() {
    let dir = initialized_dir();

    in_dir(dir.path())
        .args(["hash", "questions/example.json", "--output", "out/published.json"])
        .assert()
        .success();

    assert!(dir.path().join("out/published.json").exists());
    assert!(!dir.path().join("questions/example_hashed.json").exists());
}

#[test]
fn check_grades_answers() {
    let dir = initialized_dir();

    let cases: [(&str, &[&str], &str); 6] = [
        ("q1", &["Salt marshes"], "Verdict: correct"),
        ("q1", &["2"], "Verdict: incorrect"),
        ("q2", &["1", "Estuaries"], "Verdict: correct"),
        ("q3", &["0.334"], "Verdict: correct"),
        ("q3", &["0.335"], "Verdict: incorrect"),
        ("q4", &["delft"], "Verdict: correct"),
    ];

    for (id, answers, expected) in cases {
        let mut cmd = in_dir(dir.path());
        cmd.args(["check", "questions/example.json", "--plain", "--id", id]);
        for answer in answers {
            cmd.arg("--answer").arg(answer);
        }
        cmd.assert()
            .success()
            .stdout(predicate::str::contains(expected));
    }
}

#[test]
fn check_invalid_number() {
    let dir = initialized_dir();

    in_dir(dir.path())
        .args(["check", "questions/example.json", "--plain", "--id", "q3", "--answer", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a valid number."))
        .stdout(predicate::str::contains("Verdict: invalid"));
}

#[test]
fn check_unknown_question() {
    let dir = initialized_dir();

    in_dir(dir.path())
        .args(["check", "questions/example.json", "--plain", "--id", "q9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no question `q9`"));
}

#[test]
fn take_full_session() {
    let dir = initialized_dir();

    in_dir(dir.path())
        .args(["take", "questions/example.json", "--plain"])
        .write_stdin("Salt marshes\n1, 3\nabc\n0.33\ndelft\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Q1-1]"))
        .stdout(predicate::str::contains("  1) Salt marshes"))
        .stdout(predicate::str::contains("Please enter a valid number."))
        .stdout(predicate::str::contains("Score: 4/4"))
        .stdout(predicate::str::contains("unanswered").not());
}

#[test]
fn take_stops_at_end_of_input() {
    let dir = initialized_dir();

    in_dir(dir.path())
        .args(["take", "questions/example.json", "--plain"])
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unfortunately that is not correct."))
        .stdout(predicate::str::contains("Score: 0/4"))
        .stdout(predicate::str::contains("3 question(s) left unanswered."));
}

#[test]
fn upload_and_download_local() {
    let dir = initialized_dir();

    in_dir(dir.path())
        .args(["upload", "questions/example.json", "published/week1.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Uploaded questions/example.json (4 questions)"));

    in_dir(dir.path())
        .args(["download", "published/week1.json", "copy/week1.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Downloaded"));

    let original = std::fs::read(dir.path().join("questions/example.json")).unwrap();
    let copy = std::fs::read(dir.path().join("copy/week1.json")).unwrap();
    assert_eq!(original, copy);
}

#[test]
fn upload_rejects_invalid_set() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("broken.json"), "[1, 2, 3]").unwrap();

    in_dir(dir.path())
        .args(["upload", "broken.json", "out.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid question set"));

    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn blob_location_needs_credentials() {
    let dir = TempDir::new().unwrap();

    in_dir(dir.path())
        .args(["list", "az://coastal-dynamics/questions/week1.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AZURE_STORAGE_SAS_TOKEN"));
}

#[test]
fn list_shows_questions() {
    let dir = initialized_dir();

    in_dir(dir.path())
        .args(["list", "questions/example.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Q1-1"))
        .stdout(predicate::str::contains("multiple_selection"))
        .stdout(predicate::str::contains("4 question(s)"));
}

const TEXT_SET: &str = r#"{"q1": {"type": "text", "name": "Q1", "question": "City?", "answer": "Delft",
    "feedback": {"correct": "yes", "incorrect": "no"}}}"#;

#[tokio::test(flavor = "multi_thread")]
async fn http_locations_hide_query_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/week1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TEXT_SET))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let url = format!("{}/week1.json?sv=1&sig=SUPERSECRET", server.uri());

    in_dir(dir.path())
        .args(["validate", url.as_str(), "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/week1.json (1 questions)"))
        .stdout(predicate::str::contains("SUPERSECRET").not());

    in_dir(dir.path())
        .args(["check", url.as_str(), "--plain", "--id", "q9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no question `q9`"))
        .stderr(predicate::str::contains("SUPERSECRET").not());
}

#[test]
fn unreachable_host_hides_query_token() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = TempDir::new().unwrap();
    in_dir(dir.path())
        .args(["list", &format!("http://{addr}/q.json?sig=SUPERSECRET")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("network error"))
        .stderr(predicate::str::contains("SUPERSECRET").not());
}
