//! Checking and repairing preference values against a description.
//!
//! Both operations walk the description's fields in order. Strict checking
//! fails on the first invalid or unknown entry and never touches its input;
//! repair replaces every invalid or missing value with the field's default
//! and drops keys the description does not know.

use std::{collections::HashSet, fmt::Display};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::description::PreferencesDescription;

/// Preference values keyed by field name.
pub type Preferences = Map<String, Value>;

/// First problem found by a strict check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreferenceViolation {
    /// The value of a declared field is missing or unacceptable.
    Invalid { field: String },
    /// The key is not declared by the description.
    Unknown { key: String },
}

impl Display for PreferenceViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferenceViolation::Invalid { field } => write!(f, "invalid value for `{}`", field),
            PreferenceViolation::Unknown { key } => write!(f, "unknown key `{}`", key),
        }
    }
}

/// Finds the first reason `prefs` does not strictly match `description`.
///
/// A missing entry fails unless the field accepts `null` and `null` is also
/// its default.
pub fn find_preference_violation(
    description: &PreferencesDescription,
    prefs: &Preferences,
) -> Option<PreferenceViolation> {
    for field in description.fields() {
        let valid = match prefs.get(&field.name) {
            Some(value) => field.is_valid_value(value),
            None => {
                field.default_value() == Some(&Value::Null) && field.is_valid_value(&Value::Null)
            }
        };
        if !valid {
            return Some(PreferenceViolation::Invalid {
                field: field.name.clone(),
            });
        }
    }

    prefs
        .keys()
        .find(|key| !description.contains_field(key))
        .map(|key| PreferenceViolation::Unknown { key: key.clone() })
}

/// Returns whether every declared field has a valid value and no other keys
/// are present.
pub fn check_prefs_against_description(
    description: &PreferencesDescription,
    prefs: &Preferences,
) -> bool {
    match find_preference_violation(description, prefs) {
        None => true,
        Some(violation) => {
            debug!(%violation, "preferences rejected");
            false
        }
    }
}

/// Repairs `prefs` in place so that it strictly matches `description`.
pub fn match_prefs_with_description(description: &PreferencesDescription, prefs: &mut Preferences) {
    for field in description.fields() {
        let valid = prefs
            .get(&field.name)
            .is_some_and(|value| field.is_valid_value(value));
        if valid {
            continue;
        }
        debug!(field = %field.name, "replacing missing or invalid value with default");
        let default = field.default_value().cloned().unwrap_or(Value::Null);
        prefs.insert(field.name.clone(), default);
    }

    let declared: HashSet<&str> = description.field_names().collect();
    prefs.retain(|key, _| {
        let keep = declared.contains(key.as_str());
        if !keep {
            debug!(%key, "dropping undeclared preference");
        }
        keep
    });
}

/// Owned variant of [`match_prefs_with_description`].
pub fn repair_prefs(description: &PreferencesDescription, mut prefs: Preferences) -> Preferences {
    match_prefs_with_description(description, &mut prefs);
    prefs
}

/// The default value of every field, in declaration order.
pub fn get_defaults(description: &PreferencesDescription) -> Preferences {
    repair_prefs(description, Preferences::new())
}
