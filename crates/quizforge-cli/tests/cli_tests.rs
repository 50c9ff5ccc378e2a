//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quizforge(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizforge").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("OPENAI_API_KEY");
    cmd
}

fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}, "index": 0}],
        "model": "gpt-3.5-turbo",
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

fn write_config(dir: &TempDir, server: &MockServer, extra: &str) -> std::path::PathBuf {
    let path = dir.path().join("quizforge.toml");
    let content = format!(
        "{extra}\n[openai]\napi_key = \"test-key\"\nbase_url = \"{}\"\n",
        server.uri()
    );
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn topics_lists_builtin_catalog() {
    let dir = TempDir::new().unwrap();
    quizforge(&dir)
        .arg("topics")
        .assert()
        .success()
        .stdout(predicate::str::contains("JavaScript quiz topics"))
        .stdout(predicate::str::contains("arrays"))
        .stdout(predicate::str::contains("dot vs bracket notation"))
        .stdout(predicate::str::contains("callback function"));
}

#[test]
fn topics_uses_configured_catalog() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("quizforge.toml"),
        "language = \"Rust\"\n\n[topics]\nownership = [\"borrowing\", \"lifetimes\"]\n",
    )
    .unwrap();

    quizforge(&dir)
        .arg("topics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust quiz topics"))
        .stdout(predicate::str::contains("lifetimes"))
        .stdout(predicate::str::contains("arrays").not());
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    quizforge(&dir)
        .args(["topics", "--config", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: config file not found"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizforge.toml"))
        .stdout(predicate::str::contains("Created .env.example"));

    assert!(dir.path().join("quizforge.toml").exists());
    assert!(dir.path().join(".env.example").exists());

    // The generated config must load.
    quizforge(&dir).arg("topics").assert().success();
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir).arg("init").assert().success();

    quizforge(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn play_rejects_unknown_category() {
    let dir = TempDir::new().unwrap();
    quizforge(&dir)
        .args(["play", "--category", "classes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category 'classes'"));
}

#[test]
fn play_rejects_bad_temperature() {
    let dir = TempDir::new().unwrap();
    quizforge(&dir)
        .args(["play", "--temperature", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("temperature"));
}

#[tokio::test(flavor = "multi_thread")]
async fn play_one_round_then_quit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("quiz question"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_reply("What does map do?\n\nIt creates a new array.")),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Given the correct answer is"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("Correct")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_config(&dir, &server, "[topics]\narrays = [\"map\"]\n");

    quizforge(&dir)
        .arg("play")
        .write_stdin("creates new array\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("What does map do?\nYour answer: "))
        .stdout(predicate::str::contains("Evaluation of your answer: Correct"))
        .stdout(predicate::str::contains(
            "Correct answer: It creates a new array.",
        ))
        .stdout(predicate::str::contains("Quitting..."))
        .stdout(predicate::str::contains("Score: 1/1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn play_reports_authentication_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server, "");

    quizforge(&dir)
        .arg("play")
        .arg("--config")
        .arg(&config)
        .write_stdin("anything\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"))
        .stderr(predicate::str::contains("authentication failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn play_stops_after_rounds_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("quiz question"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("Q?")))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Given the correct answer is"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("Incorrect")))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_config(&dir, &server, "");

    quizforge(&dir)
        .args(["play", "--rounds", "2", "--category", "strings"])
        .write_stdin("one\ntwo\nthree\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct answer: No answer provided"))
        .stdout(predicate::str::contains("Score: 0/2"))
        .stdout(predicate::str::contains("Quitting").not());
}
