//! Whole-document validation of preferences descriptions.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    error::{DescriptionError, Error},
    field::FieldDeclaration,
    kinds::FieldKind,
    traits::Parser,
};

/// Longest accepted field name, in characters.
pub const MAX_NAME_LENGTH: usize = 40;

lazy_static! {
    static ref NAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

/// A preferences description that passed validation.
///
/// The only way to obtain one is through [`validate_description`] (or the
/// [`Parser`] impl), so every value of this type is known to be well formed
/// and every field's default is known to be valid.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesDescription {
    fields: Vec<FieldDeclaration>,
    intro: Option<String>,
}

impl PreferencesDescription {
    /// Validates a description document and keeps the parsed fields.
    pub fn from_value(document: &Value) -> Result<Self, DescriptionError> {
        let Value::Object(document) = document else {
            return Err(DescriptionError::NotAnObject);
        };

        let intro = match document.get("intro") {
            None | Some(Value::Null) => None,
            Some(Value::String(intro)) => Some(intro.clone()),
            Some(_) => return Err(DescriptionError::InvalidIntro),
        };

        let items = dense_fields(document)?;
        let mut seen = HashSet::with_capacity(items.len());
        let fields = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_declaration(index, item, &mut seen))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { fields, intro })
    }

    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    pub fn intro(&self) -> Option<&str> {
        self.intro.as_deref()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}

impl Parser for PreferencesDescription {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        let document: Value = serde_json::from_reader(reader)?;
        Ok(validate_description(&document)?)
    }
}

/// Validates a description document, reporting the first broken rule.
pub fn validate_description(document: &Value) -> Result<PreferencesDescription, DescriptionError> {
    PreferencesDescription::from_value(document).inspect_err(|err| {
        debug!(error = %err, "rejected preferences description");
    })
}

/// Returns whether `document` is a well-formed preferences description.
pub fn is_description_valid(document: &Value) -> bool {
    validate_description(document).is_ok()
}

/// Parses JSON text and validates it as a description.
pub fn validate_description_str(json: &str) -> Result<PreferencesDescription, Error> {
    PreferencesDescription::from_str(json)
}

/// Returns whether `name` may be used as a field name.
pub fn is_valid_field_name(name: &str) -> bool {
    name.chars().count() <= MAX_NAME_LENGTH && NAME_REGEX.is_match(name)
}

fn dense_fields(document: &Map<String, Value>) -> Result<Vec<&Value>, DescriptionError> {
    let items: Vec<&Value> = match document.get("fields") {
        None | Some(Value::Null) => return Err(DescriptionError::MissingFields),
        Some(Value::Array(items)) => items.iter().collect(),
        // A list serialized as a map keyed "0", "1", ... in order.
        Some(Value::Object(map)) => {
            let dense = map
                .keys()
                .enumerate()
                .all(|(index, key)| *key == index.to_string());
            if !dense {
                return Err(DescriptionError::NotDense);
            }
            map.values().collect()
        }
        Some(_) => return Err(DescriptionError::NotDense),
    };

    if items.is_empty() {
        return Err(DescriptionError::EmptyFields);
    }
    Ok(items)
}

fn parse_declaration(
    index: usize,
    item: &Value,
    seen: &mut HashSet<String>,
) -> Result<FieldDeclaration, DescriptionError> {
    let Value::Object(object) = item else {
        return Err(DescriptionError::FieldNotObject(index));
    };

    let name = match object.get("name") {
        None => return Err(DescriptionError::MissingName(index)),
        Some(Value::String(name)) => name.clone(),
        Some(other) => return Err(DescriptionError::InvalidName(other.to_string())),
    };

    let kind = match (object.get("type"), object.get("kind")) {
        (Some(_), Some(_)) => return Err(DescriptionError::AmbiguousKind(name)),
        (Some(kind), None) | (None, Some(kind)) => kind,
        (None, None) => return Err(DescriptionError::MissingKind(name)),
    };
    let kind = kind
        .as_str()
        .and_then(|kind| kind.parse::<FieldKind>().ok())
        .ok_or_else(|| DescriptionError::UnknownKind {
            field: name.clone(),
            kind: kind.as_str().map_or_else(|| kind.to_string(), str::to_string),
        })?;

    if !seen.insert(name.clone()) {
        return Err(DescriptionError::DuplicateName(name));
    }
    if !is_valid_field_name(&name) {
        return Err(DescriptionError::InvalidName(name));
    }

    let attributes = object
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "name" | "type" | "kind"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let field = FieldDeclaration::new(name, kind, attributes);

    field
        .validate()
        .map_err(|source| DescriptionError::Declaration {
            field: field.name.clone(),
            source,
        })?;
    Ok(field)
}
