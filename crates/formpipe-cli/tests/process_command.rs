// crates/formpipe-cli/tests/process_command.rs
// ============================================================================
// Module: CLI Process Command Tests
// Description: Integration tests for the process and inspect commands.
// Purpose: Ensure each failure family reaches the shell as its own exit code.
// Dependencies: formpipe binary, tempfile
// ============================================================================
//! ## Overview
//! Spawns the `formpipe` binary against JSON fixtures and checks the
//! exit-code contract: 0 on success, 2 for processing failures, 3 for
//! conflicts, 4 for field validation failures, and 1 for usage errors.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn formpipe_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_formpipe"))
}

/// Two-field email-mode form: a required short text and an optional one.
const FORM_JSON: &str = r#"{
    "form_id": "form-1",
    "title": "Feedback",
    "response_mode": "email",
    "fields": [
        {
            "field_id": "f1",
            "field_type": "short_text",
            "title": "Name",
            "required": true,
            "constraints": { "kind": "text", "selected": null }
        },
        {
            "field_id": "f2",
            "field_type": "short_text",
            "title": "Remarks",
            "required": false,
            "constraints": { "kind": "text", "selected": null }
        }
    ],
    "logic": []
}"#;

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn run_process(form: &Path, responses: &Path, extra: &[&str]) -> Output {
    let mut command = Command::new(formpipe_bin());
    command
        .arg("process")
        .arg("--form")
        .arg(form)
        .arg("--responses")
        .arg(responses)
        .args(["--today", "2026-08-30", "--now", "1756500000"])
        .args(extra);
    command.output().expect("run formpipe process")
}

fn exit_code(output: &Output) -> i32 {
    output.status.code().expect("exit code")
}

// ============================================================================
// SECTION: Process Tests
// ============================================================================

/// A complete valid submission succeeds and prints the processed set.
#[test]
fn valid_submission_exits_zero_with_json_output() {
    let dir = TempDir::new().expect("temp dir");
    let form = write_fixture(&dir, "form.json", FORM_JSON);
    let responses = write_fixture(
        &dir,
        "responses.json",
        r#"[
            { "field_id": "f1", "body": { "kind": "answer", "answer": "Ada" } },
            { "field_id": "f2", "body": { "kind": "answer", "answer": "" } }
        ]"#,
    );

    let output = run_process(&form, &responses, &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(exit_code(&output), 0, "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("\"f1\""), "unexpected stdout: {stdout}");
    assert!(stdout.contains("Name"), "unexpected stdout: {stdout}");
}

/// An unknown response field is a processing failure.
#[test]
fn unknown_field_exits_with_processing_code() {
    let dir = TempDir::new().expect("temp dir");
    let form = write_fixture(&dir, "form.json", FORM_JSON);
    let responses = write_fixture(
        &dir,
        "responses.json",
        r#"[
            { "field_id": "f1", "body": { "kind": "answer", "answer": "Ada" } },
            { "field_id": "f2", "body": { "kind": "answer", "answer": "" } },
            { "field_id": "ghost", "body": { "kind": "answer", "answer": "boo" } }
        ]"#,
    );

    let output = run_process(&form, &responses, &[]);
    assert_eq!(exit_code(&output), 2);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ghost"), "unexpected stderr: {stderr}");
}

/// A missing declared field is a conflict.
#[test]
fn missing_field_exits_with_conflict_code() {
    let dir = TempDir::new().expect("temp dir");
    let form = write_fixture(&dir, "form.json", FORM_JSON);
    let responses = write_fixture(
        &dir,
        "responses.json",
        r#"[
            { "field_id": "f1", "body": { "kind": "answer", "answer": "Ada" } }
        ]"#,
    );

    let output = run_process(&form, &responses, &[]);
    assert_eq!(exit_code(&output), 3);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"error\": \"conflict\""), "unexpected stderr: {stderr}");
}

/// A blank required answer is a field validation failure.
#[test]
fn blank_required_answer_exits_with_validation_code() {
    let dir = TempDir::new().expect("temp dir");
    let form = write_fixture(&dir, "form.json", FORM_JSON);
    let responses = write_fixture(
        &dir,
        "responses.json",
        r#"[
            { "field_id": "f1", "body": { "kind": "answer", "answer": "" } },
            { "field_id": "f2", "body": { "kind": "answer", "answer": "" } }
        ]"#,
    );

    let output = run_process(&form, &responses, &[]);
    assert_eq!(exit_code(&output), 4);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("f1"), "unexpected stderr: {stderr}");
}

/// Configured limits reach the pipeline.
#[test]
fn config_limits_are_enforced() {
    let dir = TempDir::new().expect("temp dir");
    let form = write_fixture(&dir, "form.json", FORM_JSON);
    let responses = write_fixture(
        &dir,
        "responses.json",
        r#"[
            { "field_id": "f1", "body": { "kind": "answer", "answer": "Ada" } },
            { "field_id": "f2", "body": { "kind": "answer", "answer": "" } }
        ]"#,
    );
    let config = write_fixture(&dir, "formpipe.toml", "[limits]\nmax_responses = 1\n");

    let output = run_process(
        &form,
        &responses,
        &["--config", config.to_string_lossy().as_ref()],
    );
    assert_eq!(exit_code(&output), 2);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("response count"), "unexpected stderr: {stderr}");
}

/// A malformed date flag is a usage error, not a pipeline failure.
#[test]
fn malformed_today_flag_exits_with_usage_code() {
    let dir = TempDir::new().expect("temp dir");
    let form = write_fixture(&dir, "form.json", FORM_JSON);
    let responses = write_fixture(&dir, "responses.json", "[]");

    let output = Command::new(formpipe_bin())
        .arg("process")
        .arg("--form")
        .arg(&form)
        .arg("--responses")
        .arg(&responses)
        .args(["--today", "30/08/2026"])
        .output()
        .expect("run formpipe process");
    assert_eq!(exit_code(&output), 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--today"), "unexpected stderr: {stderr}");
}

/// A missing form file is a usage error.
#[test]
fn missing_form_file_exits_with_usage_code() {
    let dir = TempDir::new().expect("temp dir");
    let responses = write_fixture(&dir, "responses.json", "[]");
    let absent = dir.path().join("absent.json");

    let output = run_process(&absent, &responses, &[]);
    assert_eq!(exit_code(&output), 1);
}

// ============================================================================
// SECTION: Inspect Tests
// ============================================================================

/// Inspect prints one line per declared field.
#[test]
fn inspect_lists_declared_fields() {
    let dir = TempDir::new().expect("temp dir");
    let form = write_fixture(&dir, "form.json", FORM_JSON);

    let output = Command::new(formpipe_bin())
        .arg("inspect")
        .arg("--form")
        .arg(&form)
        .output()
        .expect("run formpipe inspect");
    assert_eq!(exit_code(&output), 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("form form-1"), "unexpected stdout: {stdout}");
    assert!(stdout.contains("f1 short_text required"), "unexpected stdout: {stdout}");
    assert!(stdout.contains("f2 short_text"), "unexpected stdout: {stdout}");
}
