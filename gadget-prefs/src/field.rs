//! Field declarations and the per-kind validation rules.
//!
//! A [`FieldDeclaration`] can be built by hand and checked on its own. It is
//! not trusted until [`FieldDeclaration::validate`] (or the description
//! validator, which calls it) has accepted it.

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::{
    error::DeclarationError,
    kinds::{Checker, FieldKind},
};

/// Upper length bound of string values when `maxlength` is not declared.
pub const DEFAULT_MAX_LENGTH: usize = 1024;

/// Slack allowed when testing whether a range value lies on `min + k * step`.
pub const LATTICE_TOLERANCE: f64 = 1e-6;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

lazy_static! {
    static ref DATE_REGEX: Regex =
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}Z$").unwrap();
    static ref COLOR_REGEX: Regex = Regex::new(r"^#[0-9a-f]{6}$").unwrap();
}

/// One configurable option of a preferences description.
///
/// `attributes` holds everything except `name` and `type`, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    pub name: String,
    pub kind: FieldKind,
    pub attributes: Map<String, Value>,
}

impl FieldDeclaration {
    /// Builds a declaration. A `select` field's `options` given as a list is
    /// turned into a mapping labelled by position (`"0"`, `"1"`, ...).
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        mut attributes: Map<String, Value>,
    ) -> Self {
        if kind == FieldKind::Select {
            if let Some(Value::Array(items)) = attributes.get_mut("options") {
                let indexed: Map<String, Value> = items
                    .drain(..)
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect();
                attributes.insert("options".to_string(), Value::Object(indexed));
            }
        }
        Self {
            name: name.into(),
            kind,
            attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn label(&self) -> Option<&str> {
        self.attribute("label").and_then(Value::as_str)
    }

    /// The declared default. Always present on a validated declaration.
    pub fn default_value(&self) -> Option<&Value> {
        self.attribute("default")
    }

    /// Display label → value mapping of a `select` field.
    pub fn options(&self) -> Option<&Map<String, Value>> {
        self.attribute("options").and_then(Value::as_object)
    }

    fn flag(&self, name: &str) -> Option<bool> {
        self.attribute(name).and_then(Value::as_bool)
    }

    fn number(&self, name: &str) -> Option<f64> {
        self.attribute(name).and_then(Value::as_f64)
    }

    fn is_required(&self) -> bool {
        self.flag("required").unwrap_or(true)
    }

    /// Checks the declaration against its kind's structural schema, the
    /// kind's cross-field rules, and finally checks that `default` is itself
    /// an acceptable value.
    pub fn validate(&self) -> Result<(), DeclarationError> {
        let kind = self.kind;

        if let Some(unknown) = self
            .attributes
            .keys()
            .find(|key| kind.attribute(key).is_none())
        {
            return Err(DeclarationError::UnknownAttribute(unknown.clone()));
        }

        let present = kind
            .schema()
            .iter()
            .filter(|spec| spec.mandatory && self.attributes.contains_key(spec.name))
            .count();
        if present != kind.mandatory_count() {
            let missing = kind
                .schema()
                .iter()
                .find(|spec| spec.mandatory && !self.attributes.contains_key(spec.name))
                .map_or("default", |spec| spec.name);
            return Err(match missing {
                "default" => DeclarationError::MissingDefault,
                other => DeclarationError::MissingMandatory(other),
            });
        }

        for (key, value) in &self.attributes {
            let checker = kind.attribute(key).and_then(|spec| spec.checker);
            if let Some(checker) = checker {
                if !checker.check(value) {
                    return Err(DeclarationError::BadAttributeType {
                        attribute: key.clone(),
                        expected: checker.expected(),
                    });
                }
            }
        }

        self.check_cross_field()?;

        match self.default_value() {
            None => Err(DeclarationError::MissingDefault),
            Some(default) if !self.is_valid_value(default) => Err(DeclarationError::InvalidDefault),
            Some(_) => Ok(()),
        }
    }

    fn check_cross_field(&self) -> Result<(), DeclarationError> {
        match self.kind {
            FieldKind::String => {
                let min = self.number("minlength");
                let max = self.number("maxlength");
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(DeclarationError::cross_field(
                            "`minlength` must not exceed `maxlength`",
                        ));
                    }
                }
                if min.is_some_and(|min| min < 0.0) {
                    return Err(DeclarationError::cross_field("`minlength` must not be negative"));
                }
                if max.is_some_and(|max| max <= 0.0) {
                    return Err(DeclarationError::cross_field("`maxlength` must be positive"));
                }
                Ok(())
            }
            FieldKind::Number => {
                if self.flag("integer") != Some(true) {
                    return Ok(());
                }
                for name in ["default", "min", "max"] {
                    match self.attribute(name) {
                        None | Some(Value::Null) => {}
                        Some(value) if Checker::Integer.check(value) => {}
                        Some(_) => {
                            return Err(DeclarationError::cross_field(format!(
                                "`{name}` must be an integer when `integer` is set"
                            )));
                        }
                    }
                }
                Ok(())
            }
            FieldKind::Select => {
                let options = self.options().into_iter().flat_map(|o| o.values());
                for value in options {
                    if value.is_array() || value.is_object() {
                        return Err(DeclarationError::cross_field(
                            "option values must be null, booleans, numbers or strings",
                        ));
                    }
                }
                Ok(())
            }
            FieldKind::Range => {
                let step = self.number("step").unwrap_or(1.0);
                if step <= 0.0 {
                    return Err(DeclarationError::cross_field("`step` must be positive"));
                }
                let (Some(min), Some(max)) = (self.number("min"), self.number("max")) else {
                    return Err(DeclarationError::MissingMandatory("min"));
                };
                if !on_lattice((max - min) / step) {
                    return Err(DeclarationError::cross_field(
                        "`max` must be reachable from `min` in whole steps",
                    ));
                }
                Ok(())
            }
            FieldKind::Boolean | FieldKind::Date | FieldKind::Color => Ok(()),
        }
    }

    /// Returns whether `value` is acceptable for this field.
    pub fn is_valid_value(&self, value: &Value) -> bool {
        match self.kind {
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::String => self.is_valid_string(value),
            FieldKind::Number => self.is_valid_number(value),
            FieldKind::Select => self
                .options()
                .is_some_and(|options| options.values().any(|option| option == value)),
            FieldKind::Range => self.is_valid_range(value),
            FieldKind::Date => match value {
                Value::Null => true,
                Value::String(s) => is_valid_date(s),
                _ => false,
            },
            FieldKind::Color => value.as_str().is_some_and(|s| COLOR_REGEX.is_match(s)),
        }
    }

    fn is_valid_string(&self, value: &Value) -> bool {
        let Some(s) = value.as_str() else {
            return false;
        };
        let len = s.chars().count();
        // An empty optional string counts as absent, so no length bounds apply.
        if len == 0 {
            return !self.is_required();
        }
        let min = self.number("minlength").unwrap_or(0.0);
        let max = self
            .number("maxlength")
            .unwrap_or(DEFAULT_MAX_LENGTH as f64);
        let len = len as f64;
        min <= len && len <= max
    }

    fn is_valid_number(&self, value: &Value) -> bool {
        let n = match value {
            Value::Null => return !self.is_required(),
            Value::Number(n) => n.as_f64(),
            _ => return false,
        };
        let Some(n) = n else {
            return false;
        };
        if self.flag("integer") == Some(true) && n.trunc() != n {
            return false;
        }
        if self.number("min").is_some_and(|min| n < min) {
            return false;
        }
        if self.number("max").is_some_and(|max| n > max) {
            return false;
        }
        true
    }

    fn is_valid_range(&self, value: &Value) -> bool {
        let Some(n) = value.as_f64() else {
            return false;
        };
        let (Some(min), Some(max)) = (self.number("min"), self.number("max")) else {
            return false;
        };
        let step = self.number("step").unwrap_or(1.0);
        if step <= 0.0 || n < min || n > max {
            return false;
        }
        on_lattice((n - min) / step)
    }
}

fn on_lattice(steps: f64) -> bool {
    (steps - steps.round()).abs() <= LATTICE_TOLERANCE
}

fn is_valid_date(s: &str) -> bool {
    DATE_REGEX.is_match(s) && NaiveDateTime::parse_from_str(s, DATE_FORMAT).is_ok()
}
