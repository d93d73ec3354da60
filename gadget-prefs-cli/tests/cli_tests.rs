use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn gadget_prefs_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gadget-prefs"))
}

const DESCRIPTION: &str = indoc! {r##"
    {
        "intro": "@clock-intro",
        "fields": [
            {"name": "seconds", "type": "boolean", "label": "@clock-seconds", "default": false},
            {"name": "zone", "type": "select", "label": "@clock-zone", "default": "utc",
             "options": {"@clock-zone-utc": "utc", "Local time": "local"}},
            {"name": "tint", "type": "color", "label": "@clock-tint", "default": "#336699"}
        ]
    }
"##};

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_validate_accepts_valid_description() {
    let temp_dir = TempDir::new().unwrap();
    let desc = write(temp_dir.path(), "clock.json", DESCRIPTION);

    let output = gadget_prefs_cmd()
        .args(["validate", "-i", desc.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("OK"), "stdout: {}", stdout);
}

#[test]
fn test_validate_reports_invalid_description() {
    let temp_dir = TempDir::new().unwrap();
    let good = write(temp_dir.path(), "good.json", DESCRIPTION);
    let bad = write(
        temp_dir.path(),
        "bad.json",
        r#"{"fields": [{"name": "a", "type": "boolean", "label": "@a", "default": "no"}]}"#,
    );

    let output = gadget_prefs_cmd()
        .args([
            "validate",
            "-i",
            good.to_str().unwrap(),
            bad.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("invalid-description"), "stdout: {}", stdout);
    assert!(stdout.contains("2 description(s) checked, 1 invalid"), "stdout: {}", stdout);
}

#[test]
fn test_validate_expands_globs() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "one.json", DESCRIPTION);
    write(temp_dir.path(), "two.json", DESCRIPTION);
    write(temp_dir.path(), "notes.txt", "not a description");

    let pattern = format!("{}/*.json", temp_dir.path().display());
    let output = gadget_prefs_cmd()
        .args(["validate", "-i", &pattern])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 description(s) checked, 0 invalid"), "stdout: {}", stdout);
}

#[test]
fn test_validate_yaml_description() {
    let temp_dir = TempDir::new().unwrap();
    let desc = write(
        temp_dir.path(),
        "clock.yaml",
        indoc! {r##"
            fields:
              - name: tint
                type: color
                label: "@tint"
                default: "#aabbcc"
        "##},
    );

    let output = gadget_prefs_cmd()
        .args(["validate", "-i", desc.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn test_check_valid_prefs() {
    let temp_dir = TempDir::new().unwrap();
    let desc = write(temp_dir.path(), "clock.json", DESCRIPTION);
    let prefs = write(
        temp_dir.path(),
        "prefs.json",
        r##"{"seconds": true, "zone": "local", "tint": "#000000"}"##,
    );

    let output = gadget_prefs_cmd()
        .args([
            "check",
            "-d",
            desc.to_str().unwrap(),
            "-p",
            prefs.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "OK");
}

#[test]
fn test_check_rejects_unknown_key() {
    let temp_dir = TempDir::new().unwrap();
    let desc = write(temp_dir.path(), "clock.json", DESCRIPTION);
    let prefs = write(
        temp_dir.path(),
        "prefs.json",
        r##"{"seconds": true, "zone": "local", "tint": "#000000", "alarm": true}"##,
    );

    let output = gadget_prefs_cmd()
        .args([
            "check",
            "-d",
            desc.to_str().unwrap(),
            "-p",
            prefs.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid-preferences: unknown key `alarm`"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_check_missing_key_needs_null_default() {
    let temp_dir = TempDir::new().unwrap();
    let desc = write(
        temp_dir.path(),
        "alarm.json",
        r#"{"fields": [
            {"name": "since", "type": "date", "label": "@since", "default": "2011-01-01T00:00:00Z"},
            {"name": "until", "type": "date", "label": "@until", "default": null}
        ]}"#,
    );
    let without_since = write(temp_dir.path(), "a.json", r#"{"until": null}"#);
    let without_until = write(temp_dir.path(), "b.json", r#"{"since": null}"#);

    let output = gadget_prefs_cmd()
        .args([
            "check",
            "-d",
            desc.to_str().unwrap(),
            "-p",
            without_since.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid-preferences: invalid value for `since`"),
        "stderr: {}",
        stderr
    );

    let output = gadget_prefs_cmd()
        .args([
            "check",
            "-d",
            desc.to_str().unwrap(),
            "-p",
            without_until.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_check_error_codes() {
    let temp_dir = TempDir::new().unwrap();
    let desc = write(temp_dir.path(), "clock.json", DESCRIPTION);
    let not_json = write(temp_dir.path(), "prefs.json", "seconds = true");
    let missing = temp_dir.path().join("missing.json");

    let output = gadget_prefs_cmd()
        .args([
            "check",
            "-d",
            desc.to_str().unwrap(),
            "-p",
            not_json.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not-json"));

    let output = gadget_prefs_cmd()
        .args([
            "check",
            "-d",
            missing.to_str().unwrap(),
            "-p",
            not_json.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not-found"));
}

#[test]
fn test_repair_writes_fixed_prefs() {
    let temp_dir = TempDir::new().unwrap();
    let desc = write(temp_dir.path(), "clock.json", DESCRIPTION);
    let prefs = write(
        temp_dir.path(),
        "prefs.json",
        r##"{"seconds": "yes", "tint": "#ABCDEF", "alarm": true}"##,
    );
    let out = temp_dir.path().join("out").join("fixed.json");

    let output = gadget_prefs_cmd()
        .args([
            "repair",
            "-d",
            desc.to_str().unwrap(),
            "-p",
            prefs.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let fixed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        fixed,
        serde_json::json!({"seconds": false, "zone": "utc", "tint": "#336699"})
    );
}

#[test]
fn test_defaults_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let desc = write(temp_dir.path(), "clock.json", DESCRIPTION);

    let output = gadget_prefs_cmd()
        .args(["defaults", "-d", desc.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let defaults: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        defaults,
        serde_json::json!({"seconds": false, "zone": "utc", "tint": "#336699"})
    );
}

#[test]
fn test_messages_json() {
    let temp_dir = TempDir::new().unwrap();
    let desc = write(temp_dir.path(), "clock.json", DESCRIPTION);

    let output = gadget_prefs_cmd()
        .args(["messages", "-d", desc.to_str().unwrap(), "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let keys: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        keys,
        vec![
            "clock-intro",
            "clock-seconds",
            "clock-tint",
            "clock-zone",
            "clock-zone-utc"
        ]
    );
}

#[test]
fn test_messages_rejects_invalid_description() {
    let temp_dir = TempDir::new().unwrap();
    let desc = write(temp_dir.path(), "broken.json", r#"{"fields": []}"#);

    let output = gadget_prefs_cmd()
        .args(["messages", "-d", desc.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid-description"), "stderr: {}", stderr);
}
