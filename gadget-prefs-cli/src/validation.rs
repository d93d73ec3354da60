use std::{fmt::Display, path::Path};

/// Fixed error codes reported to the caller, one per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    NotJson,
    InvalidDescription,
    InvalidPreferences,
    Io,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "not-found",
            ErrorCode::NotJson => "not-json",
            ErrorCode::InvalidDescription => "invalid-description",
            ErrorCode::InvalidPreferences => "invalid-preferences",
            ErrorCode::Io => "io-error",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A command failure: an error code and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    pub code: ErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), CommandError> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(CommandError::new(
            ErrorCode::NotFound,
            format!("File does not exist: {}", path),
        ));
    }

    if !path_obj.is_file() {
        return Err(CommandError::new(
            ErrorCode::NotFound,
            format!("Path is not a file: {}", path),
        ));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), CommandError> {
    let Some(parent) = Path::new(path).parent() else {
        return Ok(());
    };

    if !parent.as_os_str().is_empty() && !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            CommandError::new(
                ErrorCode::Io,
                format!("Cannot create output directory: {}", e),
            )
        })?;
    }

    Ok(())
}
