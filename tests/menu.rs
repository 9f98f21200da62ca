#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn menu(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stack-menu-cli").unwrap();
    cmd.current_dir(dir.path())
        .arg("--project-dir")
        .arg(dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn with_env_file() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), "OPENAI_API_KEY=test\n").unwrap();
    dir
}

// ---------------------------------------------------------------------------
// exit paths
// ---------------------------------------------------------------------------

#[test]
fn exit_selection_ends_with_status_zero() {
    let dir = with_env_file();
    menu(&dir)
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("DOCKER MANAGEMENT MENU"))
        .stdout(predicate::str::contains("Goodbye"))
        .stdout(predicate::str::contains("Running:").not());
}

#[test]
fn closed_stdin_shuts_down_cleanly() {
    let dir = with_env_file();
    menu(&dir)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye"));
}

// ---------------------------------------------------------------------------
// invalid selections
// ---------------------------------------------------------------------------

#[test]
fn invalid_selection_keeps_the_menu_running() {
    let dir = with_env_file();
    menu(&dir)
        .write_stdin("42\n\nbanana\n\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice! Please enter a number between 0-16.").count(2))
        .stdout(predicate::str::contains("Goodbye"));
}

#[test]
fn padded_zero_is_not_exit() {
    let dir = with_env_file();
    menu(&dir)
        .write_stdin("00\n\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice").count(1));
}

// ---------------------------------------------------------------------------
// destructive action
// ---------------------------------------------------------------------------

#[test]
fn remove_all_without_confirmation_runs_nothing() {
    let dir = with_env_file();
    menu(&dir)
        .write_stdin("16\nnope\n\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING: This will remove ALL"))
        .stdout(predicate::str::contains("Operation cancelled"))
        .stdout(predicate::str::contains("Running:").not());
}

// ---------------------------------------------------------------------------
// env file advisory
// ---------------------------------------------------------------------------

#[test]
fn missing_env_file_is_only_a_warning() {
    let dir = TempDir::new().unwrap();
    menu(&dir)
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(".env file not found"));
}

#[test]
fn present_env_file_suppresses_the_warning() {
    let dir = with_env_file();
    menu(&dir)
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("file not found").not());
}

#[test]
fn env_file_location_is_configurable() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("stack.env"), "X=1\n").unwrap();
    menu(&dir)
        .args(["--env-file", "stack.env"])
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("file not found").not());
}

// ---------------------------------------------------------------------------
// configuration
// ---------------------------------------------------------------------------

#[test]
fn model_name_appears_in_menu() {
    let dir = with_env_file();
    menu(&dir)
        .args(["--model", "phi3"])
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download/Run AI model (phi3)"));
}

#[test]
fn rust_log_overrides_the_default_level() {
    let dir = with_env_file();
    menu(&dir)
        .env("RUST_LOG", "debug")
        .write_stdin("42\n\n0\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid selection"));
}

#[test]
fn default_level_hides_debug_events() {
    let dir = with_env_file();
    menu(&dir)
        .write_stdin("42\n\n0\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid selection").not());
}

#[test]
fn zero_poll_interval_is_rejected_at_startup() {
    let dir = with_env_file();
    menu(&dir)
        .args(["--poll-interval-secs", "0"])
        .write_stdin("0\n")
        .assert()
        .failure();
}
