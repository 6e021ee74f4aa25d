//! Binary-compatibility fingerprinting.
//!
//! Two resolutions with equal fingerprints are assumed to produce
//! interchangeable packages, so every input that can change the binary must
//! be hashed. Dependencies are hashed in name order, which makes the digest
//! independent of the order rules contributed them in.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::platform::PlatformDescriptor;
use crate::core::requirement::DependencyRequirement;
use crate::core::toggle::NormalizedToggles;
use crate::resolver::schema::RuleTable;
use crate::util::hash::Fingerprint;

const UNRESOLVED: &str = "<unresolved>";

/// Opaque digest identifying a binary-compatible package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompatibilityFingerprint(String);

impl CompatibilityFingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex digits, for display.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl fmt::Display for CompatibilityFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Package identifiers of already-resolved dependencies, as reported by the
/// package store. Only consulted for full-package-mode dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageStates {
    states: BTreeMap<String, String>,
}

impl PackageStates {
    pub fn new() -> Self {
        PackageStates::default()
    }

    pub fn with(mut self, dependency: impl Into<String>, state: impl Into<String>) -> Self {
        self.insert(dependency, state);
        self
    }

    pub fn insert(&mut self, dependency: impl Into<String>, state: impl Into<String>) {
        self.states.insert(dependency.into(), state.into());
    }

    pub fn get(&self, dependency: &str) -> Option<&str> {
        self.states.get(dependency).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Compute the compatibility fingerprint of a resolution.
pub fn compute(
    table: &RuleTable,
    platform: &PlatformDescriptor,
    toggles: &NormalizedToggles,
    dependencies: &[DependencyRequirement],
    states: &PackageStates,
) -> CompatibilityFingerprint {
    let mut fp = Fingerprint::new();

    fp.begin_section("schema").update_str(&table.name);

    let compiler = platform.compiler();
    fp.begin_section("platform")
        .update_field("os", platform.os().as_str())
        .update_field("arch", platform.arch().as_str())
        .update_field("compiler", &compiler.family)
        .update_opt(compiler.version.as_deref())
        .update_field("build_type", platform.build_type().as_str());

    fp.begin_section("toggles");
    for (name, value) in toggles.iter() {
        fp.update_str(name).update_bool(value);
    }

    let mut sorted: Vec<&DependencyRequirement> = dependencies.iter().collect();
    sorted.sort_by(|a, b| a.name().cmp(b.name()));

    fp.begin_section("dependencies");
    for dep in sorted {
        fp.update_field("name", dep.name())
            .update_field("kind", dep.kind().as_str())
            .update_field("constraint", &dep.constraint().canonical());

        for (option, value) in dep.overlay() {
            fp.update_field(option, &value.tagged());
        }

        if table.is_full_package_mode(dep.name()) {
            let state = states.get(dep.name());
            if state.is_none() {
                tracing::debug!("no package state for {}, fingerprinting as unresolved", dep.name());
            }
            fp.update_field("state", state.unwrap_or(UNRESOLVED));
        }

        fp.update_str("");
    }

    CompatibilityFingerprint(fp.finish())
}
