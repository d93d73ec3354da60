//! All error types for the gadget-prefs crate.
//!
//! Description validation is fail-closed: the first broken rule rejects the
//! whole document. [`DescriptionError`] and [`DeclarationError`] say which
//! field and which rule, so callers that only need a yes/no answer can use
//! [`crate::is_description_valid`] and ignore them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown field kind `{0}`")]
    UnknownKind(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid preferences description: {0}")]
    InvalidDescription(#[from] DescriptionError),

    #[error("invalid preferences: {0}")]
    InvalidPreferences(String),
}

impl Error {
    /// Creates a new invalid-preferences error
    pub fn invalid_preferences(message: impl Into<String>) -> Self {
        Error::InvalidPreferences(message.into())
    }
}

/// Why a preferences description document was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DescriptionError {
    #[error("document is not an object")]
    NotAnObject,

    #[error("document has no `fields` list")]
    MissingFields,

    #[error("`fields` is empty")]
    EmptyFields,

    #[error("`fields` is not a densely indexed list")]
    NotDense,

    #[error("field #{0} is not an object")]
    FieldNotObject(usize),

    #[error("field #{0} has no `name`")]
    MissingName(usize),

    #[error("field `{0}` has no `type`")]
    MissingKind(String),

    #[error("field `{0}` declares both `type` and `kind`")]
    AmbiguousKind(String),

    #[error("field `{field}` has unknown type `{kind}`")]
    UnknownKind { field: String, kind: String },

    #[error("invalid field name `{0}`")]
    InvalidName(String),

    #[error("duplicate field name `{0}`")]
    DuplicateName(String),

    #[error("`intro` is not a string")]
    InvalidIntro,

    #[error("field `{field}`: {source}")]
    Declaration {
        field: String,
        #[source]
        source: DeclarationError,
    },
}

/// Why a single field declaration was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeclarationError {
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    #[error("missing mandatory attribute `{0}`")]
    MissingMandatory(&'static str),

    #[error("attribute `{attribute}` must be {expected}")]
    BadAttributeType {
        attribute: String,
        expected: &'static str,
    },

    #[error("{0}")]
    CrossField(String),

    #[error("missing `default`")]
    MissingDefault,

    #[error("`default` is not a valid value for this field")]
    InvalidDefault,
}

impl DeclarationError {
    pub(crate) fn cross_field(message: impl Into<String>) -> Self {
        DeclarationError::CrossField(message.into())
    }
}
