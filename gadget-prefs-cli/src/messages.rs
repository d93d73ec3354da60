use gadget_prefs::collect_message_keys;

use crate::{
    formats::{DocumentFormat, load_description},
    validation::{CommandError, ErrorCode},
};

/// Print the message keys a description refers to.
pub fn run_messages_command(
    description: &str,
    json_output: bool,
    format: Option<DocumentFormat>,
) -> Result<(), CommandError> {
    let description = load_description(description, format)?;
    let keys = collect_message_keys(&description);

    if json_output {
        let body = serde_json::to_string_pretty(&keys).map_err(|e| {
            CommandError::new(ErrorCode::Io, format!("Error serializing to JSON: {}", e))
        })?;
        println!("{}", body);
        return Ok(());
    }

    for key in &keys {
        println!("{}", key);
    }
    Ok(())
}
