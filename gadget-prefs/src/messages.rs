//! Message references used by a description.
//!
//! A string starting with a single `@` names a message in an external
//! localization store. `@@` escapes the sigil and marks a literal string.

use std::collections::BTreeSet;

use crate::{description::PreferencesDescription, kinds::FieldKind};

/// Sigil that marks a string as a message reference.
pub const MESSAGE_PREFIX: char = '@';

pub fn is_message_reference(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next() == Some(MESSAGE_PREFIX) && chars.next().is_some_and(|c| c != MESSAGE_PREFIX)
}

/// The message key named by `s`, without its sigil.
pub fn message_key(s: &str) -> Option<&str> {
    if is_message_reference(s) {
        Some(&s[MESSAGE_PREFIX.len_utf8()..])
    } else {
        None
    }
}

/// Collects every message key a description refers to: its intro, each
/// field label, and the option labels of `select` fields.
pub fn collect_message_keys(description: &PreferencesDescription) -> BTreeSet<String> {
    let mut candidates: Vec<&str> = description.intro().into_iter().collect();

    for field in description.fields() {
        candidates.extend(field.label());
        if field.kind == FieldKind::Select {
            candidates.extend(field.options().into_iter().flat_map(|o| o.keys().map(String::as_str)));
        }
    }

    candidates
        .into_iter()
        .filter_map(message_key)
        .map(str::to_string)
        .collect()
}
