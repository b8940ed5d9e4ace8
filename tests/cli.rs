use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slotcount"))
        .arg("--config")
        .arg(dir.join("slotcount.toml"))
        .arg("--history")
        .arg(dir.join("history.json"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_reset_without_yes_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["reset"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--yes"));
}

#[test]
fn test_bad_data_entry_reports_once() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["data", "1=Blue"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Unknown color 'Blue'"));
    assert!(!stderr.contains("Error:"));
    assert!(!temp_dir.path().join("history.json").exists());
}

#[test]
fn test_data_entry_is_recorded() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["data", "Slot2=Gold:0", "3=White:7"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Recorded data pull #1"));

    let history = run_cli(temp_dir.path(), &["history"]);
    assert!(history.status.success());
    assert!(String::from_utf8_lossy(&history.stdout).contains("#1"));
}
