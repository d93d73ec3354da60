//! Field kinds and their structural schemas.
//!
//! Every kind owns a fixed table of attributes it accepts. Each attribute is
//! either mandatory or optional and may carry an elementary [`Checker`] that
//! its value must satisfy. The tables are `static`, so they exist for the
//! whole process and can be read from any thread without locking.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// The type tag of a preference field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Boolean,
    String,
    Number,
    Select,
    Range,
    Date,
    Color,
}

impl FieldKind {
    /// All supported kinds, in declaration order.
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Boolean,
        FieldKind::String,
        FieldKind::Number,
        FieldKind::Select,
        FieldKind::Range,
        FieldKind::Date,
        FieldKind::Color,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Select => "select",
            FieldKind::Range => "range",
            FieldKind::Date => "date",
            FieldKind::Color => "color",
        }
    }

    /// The structural schema of this kind.
    pub fn schema(self) -> &'static [AttributeSpec] {
        match self {
            FieldKind::Boolean => &BOOLEAN_SCHEMA,
            FieldKind::String => &STRING_SCHEMA,
            FieldKind::Number => &NUMBER_SCHEMA,
            FieldKind::Select => &SELECT_SCHEMA,
            FieldKind::Range => &RANGE_SCHEMA,
            FieldKind::Date => &DATE_SCHEMA,
            FieldKind::Color => &COLOR_SCHEMA,
        }
    }

    /// Looks up one attribute of this kind's schema.
    pub fn attribute(self, name: &str) -> Option<&'static AttributeSpec> {
        self.schema().iter().find(|spec| spec.name == name)
    }

    /// Number of mandatory attributes a declaration of this kind must carry.
    pub fn mandatory_count(self) -> usize {
        self.schema().iter().filter(|spec| spec.mandatory).count()
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

/// Elementary predicate applied to a single attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checker {
    Boolean,
    String,
    /// A JSON integer. `1.0` does not qualify.
    Integer,
    Number,
    NumberOrNull,
    Object,
}

impl Checker {
    pub fn check(self, value: &Value) -> bool {
        match self {
            Checker::Boolean => value.is_boolean(),
            Checker::String => value.is_string(),
            Checker::Integer => value.is_i64() || value.is_u64(),
            Checker::Number => value.is_number(),
            Checker::NumberOrNull => value.is_number() || value.is_null(),
            Checker::Object => value.is_object(),
        }
    }

    /// Human-readable description used in error messages.
    pub fn expected(self) -> &'static str {
        match self {
            Checker::Boolean => "a boolean",
            Checker::String => "a string",
            Checker::Integer => "an integer",
            Checker::Number => "a number",
            Checker::NumberOrNull => "a number or null",
            Checker::Object => "an object or a list",
        }
    }
}

/// One attribute of a kind's structural schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub mandatory: bool,
    pub checker: Option<Checker>,
}

const fn mandatory(name: &'static str, checker: Option<Checker>) -> AttributeSpec {
    AttributeSpec {
        name,
        mandatory: true,
        checker,
    }
}

const fn optional(name: &'static str, checker: Checker) -> AttributeSpec {
    AttributeSpec {
        name,
        mandatory: false,
        checker: Some(checker),
    }
}

static BOOLEAN_SCHEMA: [AttributeSpec; 2] = [
    mandatory("label", Some(Checker::String)),
    mandatory("default", Some(Checker::Boolean)),
];

static STRING_SCHEMA: [AttributeSpec; 5] = [
    mandatory("label", Some(Checker::String)),
    mandatory("default", Some(Checker::String)),
    optional("required", Checker::Boolean),
    optional("minlength", Checker::Integer),
    optional("maxlength", Checker::Integer),
];

static NUMBER_SCHEMA: [AttributeSpec; 6] = [
    mandatory("label", Some(Checker::String)),
    mandatory("default", Some(Checker::NumberOrNull)),
    optional("required", Checker::Boolean),
    optional("integer", Checker::Boolean),
    optional("min", Checker::Number),
    optional("max", Checker::Number),
];

static SELECT_SCHEMA: [AttributeSpec; 3] = [
    mandatory("label", Some(Checker::String)),
    mandatory("default", None),
    mandatory("options", Some(Checker::Object)),
];

static RANGE_SCHEMA: [AttributeSpec; 5] = [
    mandatory("label", Some(Checker::String)),
    mandatory("default", Some(Checker::Number)),
    mandatory("min", Some(Checker::Number)),
    mandatory("max", Some(Checker::Number)),
    optional("step", Checker::Number),
];

static DATE_SCHEMA: [AttributeSpec; 2] = [
    mandatory("label", Some(Checker::String)),
    mandatory("default", None),
];

static COLOR_SCHEMA: [AttributeSpec; 2] = [
    mandatory("label", Some(Checker::String)),
    mandatory("default", Some(Checker::String)),
];
