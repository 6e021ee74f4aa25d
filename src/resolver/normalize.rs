//! Toggle and dependency-option normalization.
//!
//! Normalization runs before anything else. It fills in per-platform
//! defaults for missing toggles, drops toggles that do not exist on the
//! target OS, and computes the option overlay of every dependency: first the
//! OS default table, then caller overrides on top.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::platform::PlatformDescriptor;
use crate::core::requirement::LinkageOverlay;
use crate::core::toggle::{FeatureToggleSet, NormalizedToggles};
use crate::core::value::Value;
use crate::resolver::errors::ResolveError;
use crate::resolver::schema::RuleTable;

/// A caller override of a dependency option, written `dep:option=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyOptionOverride {
    pub dependency: String,
    pub option: String,
    pub value: Value,
}

impl DependencyOptionOverride {
    pub fn new(dependency: &str, option: &str, value: impl Into<Value>) -> Self {
        DependencyOptionOverride {
            dependency: dependency.to_string(),
            option: option.to_string(),
            value: value.into(),
        }
    }
}

impl FromStr for DependencyOptionOverride {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ResolveError::InvalidAssignment {
            text: s.to_string(),
            expected: "dependency:option=value",
        };

        let (target, value) = s.split_once('=').ok_or_else(invalid)?;
        let (dependency, option) = target.split_once(':').ok_or_else(invalid)?;
        let (dependency, option) = (dependency.trim(), option.trim());
        if dependency.is_empty() || option.is_empty() {
            return Err(invalid());
        }

        let value = match value.trim().parse::<Value>() {
            Ok(value) => value,
            Err(never) => match never {},
        };

        Ok(DependencyOptionOverride::new(dependency, option, value))
    }
}

impl fmt::Display for DependencyOptionOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}={}", self.dependency, self.option, self.value)
    }
}

/// Normalized inputs shared by every builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedOptions {
    pub toggles: NormalizedToggles,
    pub dependency_options: BTreeMap<String, LinkageOverlay>,
}

impl NormalizedOptions {
    /// Overlay for a dependency; empty when nothing applies to it.
    pub fn overlay_for(&self, dependency: &str) -> LinkageOverlay {
        self.dependency_options
            .get(dependency)
            .cloned()
            .unwrap_or_default()
    }
}

/// Normalize a request against a rule table.
pub fn normalize(
    table: &RuleTable,
    platform: &PlatformDescriptor,
    requested: &FeatureToggleSet,
    overrides: &[DependencyOptionOverride],
) -> Result<NormalizedOptions, ResolveError> {
    let os = platform.os();

    for name in requested.names() {
        if table.toggle_spec(name).is_none() {
            return Err(ResolveError::UnknownToggle {
                toggle: name.to_string(),
            });
        }
    }

    let mut values = BTreeMap::new();
    let mut removed = BTreeSet::new();

    for spec in &table.toggles {
        if !spec.applies_to(os) {
            if let Some(value) = requested.get(&spec.name) {
                tracing::warn!(
                    "ignoring {}={}: toggle does not exist on {}",
                    spec.name,
                    value,
                    os
                );
            }
            removed.insert(spec.name.clone());
            continue;
        }

        let value = requested
            .get(&spec.name)
            .unwrap_or_else(|| spec.default_for(os));
        values.insert(spec.name.clone(), value);
    }

    let toggles = NormalizedToggles::new(os, values, removed);

    let mut dependency_options: BTreeMap<String, LinkageOverlay> = BTreeMap::new();

    for rule in &table.option_defaults {
        if rule.condition.evaluate(platform, &toggles)? {
            dependency_options
                .entry(rule.dependency.clone())
                .or_default()
                .insert(rule.option.clone(), rule.value.clone());
        }
    }

    for o in overrides {
        tracing::debug!("dependency option override {}", o);
        dependency_options
            .entry(o.dependency.clone())
            .or_default()
            .insert(o.option.clone(), o.value.clone());
    }

    Ok(NormalizedOptions {
        toggles,
        dependency_options,
    })
}
