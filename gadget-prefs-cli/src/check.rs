use gadget_prefs::{Preferences, find_preference_violation, get_defaults, repair_prefs};

use crate::{
    formats::{DocumentFormat, load_description, load_prefs},
    validation::{CommandError, ErrorCode, validate_output_path},
};

/// Strictly checks a preferences file against a description.
pub fn run_check_command(
    description: &str,
    prefs: &str,
    format: Option<DocumentFormat>,
) -> Result<(), CommandError> {
    let description = load_description(description, format)?;
    let prefs = load_prefs(prefs, format)?;

    match find_preference_violation(&description, &prefs) {
        None => {
            println!("OK");
            Ok(())
        }
        Some(violation) => Err(CommandError::new(
            ErrorCode::InvalidPreferences,
            violation.to_string(),
        )),
    }
}

/// Repairs a preferences file and prints or writes the result as JSON.
pub fn run_repair_command(
    description: &str,
    prefs: &str,
    output: Option<&str>,
    format: Option<DocumentFormat>,
) -> Result<(), CommandError> {
    let description = load_description(description, format)?;
    let prefs = load_prefs(prefs, format)?;
    let repaired = repair_prefs(&description, prefs);
    emit_prefs(&repaired, output)
}

/// Prints the default value of every declared field.
pub fn run_defaults_command(
    description: &str,
    output: Option<&str>,
    format: Option<DocumentFormat>,
) -> Result<(), CommandError> {
    let description = load_description(description, format)?;
    emit_prefs(&get_defaults(&description), output)
}

fn emit_prefs(prefs: &Preferences, output: Option<&str>) -> Result<(), CommandError> {
    let json = serde_json::to_string_pretty(prefs).map_err(|e| {
        CommandError::new(ErrorCode::Io, format!("Error serializing to JSON: {}", e))
    })?;

    match output {
        Some(path) => {
            validate_output_path(path)?;
            std::fs::write(path, json + "\n").map_err(|e| {
                CommandError::new(ErrorCode::Io, format!("Error writing to {}: {}", path, e))
            })?;
            eprintln!("✅ Preferences written to: {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
