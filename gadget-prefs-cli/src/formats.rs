use std::{path::Path, str::FromStr};

use gadget_prefs::{
    Error, Preferences, PreferencesDescription, traits::Parser, validate_description,
};
use serde_json::Value;
use tracing::debug;

use crate::validation::{CommandError, ErrorCode, validate_file_path};

/// Serialization of description and preference files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentFormat {
    /// JSON, the native format of preference descriptions.
    Json,

    /// YAML, convenient for hand-written descriptions:
    ///
    /// ```yaml
    /// fields:
    ///   - name: tint
    ///     type: color
    ///     label: "@tint"
    ///     default: "#aabbcc"
    /// ```
    Yaml,
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            _ => Err(format!(
                "Unknown document format: '{}'. Supported formats: json, yaml",
                s
            )),
        }
    }
}

/// Picks the format from the file extension, defaulting to JSON.
pub fn infer_format_from_path(path: &str) -> DocumentFormat {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
        .unwrap_or(DocumentFormat::Json)
}

/// Reads a file and parses it as a JSON value.
pub fn load_document(path: &str, format: Option<DocumentFormat>) -> Result<Value, CommandError> {
    validate_file_path(path)?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| CommandError::new(ErrorCode::Io, format!("Error reading {}: {}", path, e)))?;

    let format = format.unwrap_or_else(|| infer_format_from_path(path));
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str::<Value>(&content).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str::<Value>(&content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|e| CommandError::new(ErrorCode::NotJson, format!("{}: {}", path, e)))
}

/// Loads and validates a preferences description.
///
/// JSON files are streamed straight into the validator; YAML goes through an
/// intermediate JSON value.
pub fn load_description(
    path: &str,
    format: Option<DocumentFormat>,
) -> Result<PreferencesDescription, CommandError> {
    match format.unwrap_or_else(|| infer_format_from_path(path)) {
        DocumentFormat::Json => {
            validate_file_path(path)?;
            debug!(%path, "reading preferences description");
            PreferencesDescription::read_from(path).map_err(|e| description_error(path, e))
        }
        DocumentFormat::Yaml => {
            let document = load_document(path, format)?;
            debug!(%path, "validating preferences description");
            validate_description(&document)
                .map_err(|e| description_error(path, Error::InvalidDescription(e)))
        }
    }
}

fn description_error(path: &str, error: Error) -> CommandError {
    match error {
        Error::Io(e) => CommandError::new(ErrorCode::Io, format!("Error reading {}: {}", path, e)),
        Error::Parse(e) => CommandError::new(ErrorCode::NotJson, format!("{}: {}", path, e)),
        Error::InvalidDescription(e) => {
            CommandError::new(ErrorCode::InvalidDescription, format!("{}: {}", path, e))
        }
        other => CommandError::new(ErrorCode::InvalidDescription, format!("{}: {}", path, other)),
    }
}

/// Loads a preference values mapping. Anything but an object is rejected.
pub fn load_prefs(path: &str, format: Option<DocumentFormat>) -> Result<Preferences, CommandError> {
    match load_document(path, format)? {
        Value::Object(prefs) => Ok(prefs),
        _ => Err(CommandError::new(
            ErrorCode::NotJson,
            format!("{}: preferences must be an object", path),
        )),
    }
}
