//! CLI library for testing purposes

pub mod check;
pub mod formats;
pub mod messages;
pub mod path_glob;
pub mod validate;
pub mod validation;

pub use formats::{DocumentFormat, load_description, load_prefs};
pub use validate::{FileReport, validate_descriptions};
pub use validation::{CommandError, ErrorCode};
