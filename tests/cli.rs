use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Run from an empty directory so a developer's .env cannot supply a key.
fn fitchat(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fitchat").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GROQ_API_KEY")
        .env_remove("GROQ_API_URL")
        .env_remove("FITCHAT_MAX_TOKENS");
    cmd
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    fitchat(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: fitchat <COMMAND>"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn test_cli_serve_help() {
    let dir = TempDir::new().unwrap();
    fitchat(&dir)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: fitchat serve"))
        .stdout(predicate::str::contains("--port <PORT>"));
}

#[test]
fn test_cli_chat_help() {
    let dir = TempDir::new().unwrap();
    fitchat(&dir)
        .args(["chat", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--gender <GENDER>"))
        .stdout(predicate::str::contains("--height <HEIGHT>"))
        .stdout(predicate::str::contains("--weight <WEIGHT>"));
}

#[test]
fn test_missing_api_key_halts_serve() {
    let dir = TempDir::new().unwrap();
    fitchat(&dir)
        .args(["serve", "--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API Key for Groq is missing."));
}

#[test]
fn test_missing_api_key_halts_chat() {
    let dir = TempDir::new().unwrap();
    fitchat(&dir)
        .arg("chat")
        .write_stdin("gym?\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GROQ_API_KEY"));
}

#[test]
fn test_dotenv_key_is_honored() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "GROQ_API_KEY=gsk_from_dotenv\nGROQ_API_URL=http://127.0.0.1:1/v1/chat/completions\n",
    )
    .unwrap();

    fitchat(&dir)
        .arg("chat")
        .write_stdin("What's the capital of France?\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Only fitness-related questions are allowed!"));
}

#[test]
fn test_chat_rejects_out_of_range_height() {
    let dir = TempDir::new().unwrap();
    fitchat(&dir)
        .args(["chat", "--height", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--height"));
}

#[test]
fn test_cli_no_command() {
    let dir = TempDir::new().unwrap();
    fitchat(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: fitchat <COMMAND>"));
}

#[test]
fn test_chat_reports_provider_failure_and_continues() {
    let dir = TempDir::new().unwrap();
    fitchat(&dir)
        .arg("chat")
        .env("GROQ_API_KEY", "gsk_test")
        .env("GROQ_API_URL", "http://127.0.0.1:1/v1/chat/completions")
        .write_stdin("gym plan for beginners?\n/clear\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[error] Error in generating response:"))
        .stdout(predicate::str::contains("Chat history cleared."));
}
