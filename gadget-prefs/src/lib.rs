#![forbid(unsafe_code)]
//! Validation engine for gadget preference descriptions.
//!
//! A preferences description declares the options a gadget exposes to its
//! users. This crate validates such descriptions, checks or repairs a set of
//! preference values against them, and lists the message keys they use.
//!
//! # Quick Start
//!
//! ```rust
//! use gadget_prefs::{
//!     check_prefs_against_description, collect_message_keys, get_defaults,
//!     repair_prefs, validate_description,
//! };
//! use serde_json::json;
//!
//! let description = validate_description(&json!({
//!     "fields": [
//!         {"name": "size", "type": "range", "label": "@size", "default": 2, "min": 0, "max": 8, "step": 2},
//!         {"name": "tint", "type": "color", "label": "@tint", "default": "#aabbcc"}
//!     ]
//! }))?;
//!
//! let defaults = get_defaults(&description);
//! assert!(check_prefs_against_description(&description, &defaults));
//!
//! let submitted = json!({"size": 3, "tint": "#000000", "junk": true});
//! let repaired = repair_prefs(&description, submitted.as_object().cloned().unwrap_or_default());
//! assert_eq!(serde_json::Value::Object(repaired), json!({"size": 2, "tint": "#000000"}));
//!
//! assert_eq!(collect_message_keys(&description).len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Field kinds
//!
//! - **boolean**: `true`/`false`
//! - **string**: optional `required`, `minlength`, `maxlength`
//! - **number**: optional `required`, `integer`, `min`, `max`
//! - **select**: value must equal one of the `options` values
//! - **range**: `min`, `max`, optional `step`; values sit on `min + k * step`
//! - **date**: `null` or `YYYY-MM-DDThh:mm:ssZ`
//! - **color**: `#rrggbb`, lowercase hex

pub mod description;
pub mod error;
pub mod field;
pub mod gadget;
pub mod kinds;
pub mod messages;
pub mod prefs;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{
    description::{
        MAX_NAME_LENGTH, PreferencesDescription, is_description_valid, is_valid_field_name,
        validate_description, validate_description_str,
    },
    error::{DeclarationError, DescriptionError, Error},
    field::{DEFAULT_MAX_LENGTH, FieldDeclaration, LATTICE_TOLERANCE},
    gadget::Gadget,
    kinds::{AttributeSpec, Checker, FieldKind},
    messages::{MESSAGE_PREFIX, collect_message_keys, is_message_reference, message_key},
    prefs::{
        PreferenceViolation, Preferences, check_prefs_against_description,
        find_preference_violation, get_defaults, match_prefs_with_description, repair_prefs,
    },
};
