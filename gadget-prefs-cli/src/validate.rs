use rayon::prelude::*;

use crate::{
    formats::{DocumentFormat, load_description},
    path_glob::expand_input_globs,
    validation::CommandError,
};

/// Outcome of validating one description file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    pub error: Option<CommandError>,
}

/// Validates every description matched by `inputs`, in parallel.
///
/// Reports come back in input order.
pub fn validate_descriptions(
    inputs: &[String],
    format: Option<DocumentFormat>,
) -> Result<Vec<FileReport>, CommandError> {
    let paths = expand_input_globs(inputs)?;
    Ok(paths
        .into_par_iter()
        .map(|path| {
            let error = load_description(&path, format).err();
            FileReport { path, error }
        })
        .collect())
}

/// Run the validate command. Returns `true` if every description is valid.
pub fn run_validate_command(inputs: &[String], format: Option<DocumentFormat>) -> bool {
    let reports = match validate_descriptions(inputs, format) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Error: {}", e);
            return false;
        }
    };

    let mut failures = 0usize;
    for report in &reports {
        match &report.error {
            None => println!("OK {}", report.path),
            Some(e) => {
                failures += 1;
                println!("FAIL {}", e);
            }
        }
    }

    println!(
        "{} description(s) checked, {} invalid",
        reports.len(),
        failures
    );
    failures == 0
}
