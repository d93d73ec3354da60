use gadget_prefs_cli::validation::{validate_file_path, validate_output_path};
use gadget_prefs_cli::{ErrorCode, load_description, load_prefs, validate_descriptions};
use std::fs;
use tempfile::TempDir;

const VALID: &str =
    r#"{"fields": [{"name": "on", "type": "boolean", "label": "@on", "default": true}]}"#;

#[test]
fn test_validate_file_path_exists() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("prefs.json");
    fs::write(&test_file, "{}").unwrap();

    assert!(validate_file_path(test_file.to_str().unwrap()).is_ok());
}

#[test]
fn test_validate_file_path_not_exists() {
    let error = validate_file_path("nonexistent_file.json").unwrap_err();
    assert_eq!(error.code, ErrorCode::NotFound);
    assert!(error.message.contains("File does not exist"));
}

#[test]
fn test_validate_file_path_directory() {
    let temp_dir = TempDir::new().unwrap();
    let error = validate_file_path(temp_dir.path().to_str().unwrap()).unwrap_err();
    assert!(error.message.contains("Path is not a file"));
}

#[test]
fn test_validate_output_path_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested_file = temp_dir.path().join("nested").join("prefs.json");

    assert!(validate_output_path(nested_file.to_str().unwrap()).is_ok());
    assert!(temp_dir.path().join("nested").exists());
}

#[test]
fn test_load_prefs_requires_object() {
    let temp_dir = TempDir::new().unwrap();
    let array = temp_dir.path().join("array.json");
    fs::write(&array, "[1, 2]").unwrap();

    let error = load_prefs(array.to_str().unwrap(), None).unwrap_err();
    assert_eq!(error.code, ErrorCode::NotJson);

    let object = temp_dir.path().join("object.json");
    fs::write(&object, r#"{"on": false}"#).unwrap();
    let prefs = load_prefs(object.to_str().unwrap(), None).unwrap();
    assert_eq!(prefs.get("on"), Some(&serde_json::Value::Bool(false)));
}

#[test]
fn test_load_description_error_codes() {
    let temp_dir = TempDir::new().unwrap();
    let invalid = temp_dir.path().join("invalid.json");
    fs::write(&invalid, r#"{"fields": {"1": {}}}"#).unwrap();

    let error = load_description(invalid.to_str().unwrap(), None).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidDescription);
    assert!(error.message.contains("densely indexed"), "{}", error.message);

    let garbage = temp_dir.path().join("garbage.json");
    fs::write(&garbage, "fields = []").unwrap();
    let error = load_description(garbage.to_str().unwrap(), None).unwrap_err();
    assert_eq!(error.code, ErrorCode::NotJson);

    let missing = temp_dir.path().join("missing.json");
    let error = load_description(missing.to_str().unwrap(), None).unwrap_err();
    assert_eq!(error.code, ErrorCode::NotFound);

    let valid = temp_dir.path().join("valid.json");
    fs::write(&valid, VALID).unwrap();
    let description = load_description(valid.to_str().unwrap(), None).unwrap();
    assert!(description.contains_field("on"));
}

#[test]
fn test_validate_descriptions_keeps_input_order() {
    let temp_dir = TempDir::new().unwrap();
    let mut inputs = Vec::new();
    for i in 0..6 {
        let path = temp_dir.path().join(format!("d{}.json", i));
        let body = if i % 2 == 0 { VALID } else { "{}" };
        fs::write(&path, body).unwrap();
        inputs.push(path.to_string_lossy().into_owned());
    }

    let reports = validate_descriptions(&inputs, None).unwrap();
    assert_eq!(
        reports.iter().map(|r| r.path.clone()).collect::<Vec<_>>(),
        inputs
    );
    for (i, report) in reports.iter().enumerate() {
        assert_eq!(report.error.is_none(), i % 2 == 0, "{}", report.path);
    }
}
