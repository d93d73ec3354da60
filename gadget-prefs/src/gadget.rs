//! A gadget that declares preferences and stores a user's values for them.

use serde_json::Value;
use tracing::debug;

use crate::{
    description::{PreferencesDescription, validate_description},
    error::Error,
    prefs::{Preferences, find_preference_violation, repair_prefs},
};

/// Minimal gadget: a name, an optional declared description, and the values
/// last accepted by [`Gadget::set_prefs`]. Nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gadget {
    name: String,
    prefs_description: Option<Value>,
    prefs: Option<Preferences>,
}

impl Gadget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_prefs_description(mut self, description: Value) -> Self {
        self.prefs_description = Some(description);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description document as declared, unvalidated.
    pub fn prefs_description(&self) -> Option<&Value> {
        self.prefs_description.as_ref()
    }

    /// The validated description, or `None` if the gadget declares none.
    pub fn description(&self) -> Result<Option<PreferencesDescription>, Error> {
        self.prefs_description
            .as_ref()
            .map(|document| validate_description(document).map_err(Error::from))
            .transpose()
    }

    fn usable_description(&self) -> Option<PreferencesDescription> {
        match self.description() {
            Ok(description) => description,
            Err(err) => {
                debug!(gadget = %self.name, error = %err, "ignoring invalid preferences description");
                None
            }
        }
    }

    /// Stores `prefs` if they strictly match the gadget's description.
    pub fn try_set_prefs(&mut self, prefs: Preferences) -> Result<(), Error> {
        let description = self.description()?.ok_or_else(|| {
            Error::invalid_preferences(format!("gadget `{}` declares no preferences", self.name))
        })?;
        if let Some(violation) = find_preference_violation(&description, &prefs) {
            return Err(Error::invalid_preferences(violation.to_string()));
        }
        self.prefs = Some(prefs);
        Ok(())
    }

    /// Boolean form of [`Gadget::try_set_prefs`].
    ///
    /// Returns `false`, leaving the stored values alone, when the gadget has
    /// no valid description or the values do not match it.
    pub fn set_prefs(&mut self, prefs: Preferences) -> bool {
        match self.try_set_prefs(prefs) {
            Ok(()) => true,
            Err(err) => {
                debug!(gadget = %self.name, error = %err, "preferences not stored");
                false
            }
        }
    }

    /// Stored values repaired against the description; defaults when nothing
    /// was stored yet.
    pub fn prefs(&self) -> Option<Preferences> {
        let description = self.usable_description()?;
        let stored = self.prefs.clone().unwrap_or_default();
        Some(repair_prefs(&description, stored))
    }
}
