//! Feature toggles.
//!
//! A [`FeatureToggleSet`] is what the caller asks for. [`NormalizedToggles`]
//! is what the resolver works with after platform defaults and removals
//! have been applied: a toggle that does not exist on the target OS is
//! absent, and reading it is an error rather than a silent `false`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::platform::Os;
use crate::core::value::parse_bool;
use crate::resolver::errors::ResolveError;

/// Toggles requested by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureToggleSet {
    values: BTreeMap<String, bool>,
}

impl FeatureToggleSet {
    pub fn new() -> Self {
        FeatureToggleSet::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set(name, value);
        self
    }

    /// Set a toggle, replacing any earlier request for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Layer `other` on top of this set.
    pub fn merge(&mut self, other: &FeatureToggleSet) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for FeatureToggleSet {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut set = FeatureToggleSet::new();
        for (name, value) in iter {
            set.set(name, value);
        }
        set
    }
}

/// Parse a `NAME=VALUE` toggle assignment. A bare `NAME` enables it.
pub fn parse_toggle_assignment(text: &str) -> Result<(String, bool), ResolveError> {
    let (name, value) = match text.split_once('=') {
        Some((name, value)) => (name.trim(), value.trim()),
        None => (text.trim(), "true"),
    };

    if name.is_empty() {
        return Err(ResolveError::InvalidAssignment {
            text: text.to_string(),
            expected: "NAME=true|false",
        });
    }

    let value = match value {
        "1" => Some(true),
        "0" => Some(false),
        other => parse_bool(other),
    };

    match value {
        Some(value) => Ok((name.to_string(), value)),
        None => Err(ResolveError::InvalidAssignment {
            text: text.to_string(),
            expected: "NAME=true|false",
        }),
    }
}

/// Toggles after platform normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedToggles {
    os: Os,
    values: BTreeMap<String, bool>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    removed: BTreeSet<String>,
}

impl NormalizedToggles {
    pub(crate) fn new(os: Os, values: BTreeMap<String, bool>, removed: BTreeSet<String>) -> Self {
        NormalizedToggles {
            os,
            values,
            removed,
        }
    }

    /// Read a toggle.
    ///
    /// Fails with `InapplicableToggleReference` for toggles removed on this
    /// platform and `UnknownToggle` for names the rule table never declared.
    pub fn get(&self, name: &str) -> Result<bool, ResolveError> {
        if let Some(value) = self.values.get(name) {
            return Ok(*value);
        }

        if self.removed.contains(name) {
            Err(ResolveError::InapplicableToggleReference {
                toggle: name.to_string(),
                os: self.os,
            })
        } else {
            Err(ResolveError::UnknownToggle {
                toggle: name.to_string(),
            })
        }
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_removed(&self, name: &str) -> bool {
        self.removed.contains(name)
    }

    /// Present toggles, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Toggles removed for this platform, in name order.
    pub fn removed(&self) -> impl Iterator<Item = &str> {
        self.removed.iter().map(String::as_str)
    }

    pub fn os(&self) -> Os {
        self.os
    }
}
