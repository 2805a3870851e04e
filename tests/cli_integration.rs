//! Integration tests for the CredVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Interactive password prompts are bypassed by setting the
//! `CREDVAULT_PASSWORD` environment variable, which the prompt helpers
//! check before falling back to the terminal.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "integration-password";

/// Helper: get a Command pointing at the credvault binary, with the
/// vault file inside `dir` and the password preset.
fn credvault(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credvault").expect("binary should exist");
    cmd.env("CREDVAULT_VAULT", dir.path().join("vault.json"))
        .env("CREDVAULT_PASSWORD", PASSWORD)
        .current_dir(dir.path());
    cmd
}

#[test]
fn help_flag_shows_usage() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credvault").expect("binary should exist");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted credential manager"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("rotate-key"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn version_flag_shows_version() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credvault").expect("binary should exist");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("credvault"));
}

#[test]
fn no_args_shows_help() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credvault").expect("binary should exist");
    cmd.assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn list_before_init_fails() {
    let dir = TempDir::new().unwrap();

    credvault(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn init_add_get_list_delete_flow() {
    let dir = TempDir::new().unwrap();

    credvault(&dir).arg("init").assert().success();

    credvault(&dir)
        .args(["add", "example.com", "a@x.com", "s3cret-p4ss"])
        .assert()
        .success();

    credvault(&dir)
        .args(["get", "example.com", "a@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s3cret-p4ss"));

    credvault(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com"))
        .stdout(predicate::str::contains("a@x.com"));

    credvault(&dir)
        .args(["delete", "example.com", "a@x.com", "--force"])
        .assert()
        .success();

    credvault(&dir)
        .args(["get", "example.com", "a@x.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching credential"));
}

#[test]
fn init_twice_fails() {
    let dir = TempDir::new().unwrap();

    credvault(&dir).arg("init").assert().success();
    credvault(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn wrong_password_is_rejected() {
    let dir = TempDir::new().unwrap();

    credvault(&dir).arg("init").assert().success();

    let mut cmd = credvault(&dir);
    cmd.env("CREDVAULT_PASSWORD", "not-the-password");
    cmd.arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid master password"));
}

#[test]
fn find_matches_subdomains() {
    let dir = TempDir::new().unwrap();

    credvault(&dir).arg("init").assert().success();
    credvault(&dir)
        .args(["add", "example.com", "a@x.com", "pw"])
        .assert()
        .success();

    credvault(&dir)
        .args(["find", "login.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com"));
}

#[test]
fn export_then_import_into_second_vault() {
    let dir = TempDir::new().unwrap();

    credvault(&dir).arg("init").assert().success();
    credvault(&dir)
        .args(["add", "example.com", "a@x.com", "pw"])
        .assert()
        .success();

    let export_path = dir.path().join("export.json");
    credvault(&dir)
        .args(["export", "--output", export_path.to_str().unwrap()])
        .assert()
        .success();

    // A second vault in a different file.
    let second_vault = dir.path().join("second.json");
    let mut cmd = credvault(&dir);
    cmd.env("CREDVAULT_VAULT", &second_vault);
    cmd.arg("init").assert().success();

    let mut cmd = credvault(&dir);
    cmd.env("CREDVAULT_VAULT", &second_vault);
    cmd.args(["import", export_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1"));

    let mut cmd = credvault(&dir);
    cmd.env("CREDVAULT_VAULT", &second_vault);
    cmd.args(["get", "example.com", "a@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pw"));
}

#[test]
fn generate_prints_password_of_requested_length() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credvault").expect("binary should exist");
    let output = cmd
        .args(["generate", "--length", "24", "--no-symbols"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let password = String::from_utf8(output).unwrap();
    assert_eq!(password.trim_end().len(), 24);
}

#[test]
fn generate_with_no_classes_fails() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credvault").expect("binary should exist");
    cmd.args([
        "generate",
        "--no-uppercase",
        "--no-lowercase",
        "--no-digits",
        "--no-symbols",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("character class"));
}

#[test]
fn settings_show_and_set_without_password() {
    let dir = TempDir::new().unwrap();

    credvault(&dir).arg("init").assert().success();

    // No CREDVAULT_PASSWORD needed for settings.
    let mut cmd = credvault(&dir);
    cmd.env_remove("CREDVAULT_PASSWORD");
    cmd.args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("session-timeout:  30"));

    let mut cmd = credvault(&dir);
    cmd.env_remove("CREDVAULT_PASSWORD");
    cmd.args(["settings", "set", "--session-timeout", "5"])
        .assert()
        .success();

    let mut cmd = credvault(&dir);
    cmd.env_remove("CREDVAULT_PASSWORD");
    cmd.args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("session-timeout:  5"));
}
