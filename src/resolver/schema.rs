//! Declarative rule tables.
//!
//! Each recipe release is described by one [`RuleTable`]: the toggles it
//! knows, the dependencies it pins, the definitions it passes to CMake and
//! the component libraries it packages. The resolver itself has no
//! release-specific logic; [`SchemaVersion`] only selects a table.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::core::definition::Precedence;
use crate::core::platform::Os;
use crate::core::requirement::{RequirementKind, VersionConstraint};
use crate::core::value::Value;
use crate::resolver::errors::ResolveError;
use crate::resolver::rules::Condition;
use crate::resolver::tables;

/// A known recipe release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaVersion {
    #[serde(rename = "2.1.0")]
    V2_1,
    #[serde(rename = "3.0.0")]
    V3_0,
    #[serde(rename = "3.4.0")]
    V3_4,
}

static V2_1_TABLE: LazyLock<RuleTable> = LazyLock::new(tables::v2_1);
static V3_0_TABLE: LazyLock<RuleTable> = LazyLock::new(tables::v3_0);
static V3_4_TABLE: LazyLock<RuleTable> = LazyLock::new(tables::v3_4);

impl SchemaVersion {
    pub const ALL: [SchemaVersion; 3] = [SchemaVersion::V2_1, SchemaVersion::V3_0, SchemaVersion::V3_4];

    pub const LATEST: SchemaVersion = SchemaVersion::V3_4;

    pub const fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::V2_1 => "2.1.0",
            SchemaVersion::V3_0 => "3.0.0",
            SchemaVersion::V3_4 => "3.4.0",
        }
    }

    /// The rule table for this release.
    pub fn rules(&self) -> &'static RuleTable {
        match self {
            SchemaVersion::V2_1 => &V2_1_TABLE,
            SchemaVersion::V3_0 => &V3_0_TABLE,
            SchemaVersion::V3_4 => &V3_4_TABLE,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        SchemaVersion::LATEST
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('v') {
            "2.1" | "2.1.0" => Ok(SchemaVersion::V2_1),
            "3.0" | "3.0.0" => Ok(SchemaVersion::V3_0),
            "3.4" | "3.4.0" | "latest" => Ok(SchemaVersion::V3_4),
            _ => Err(ResolveError::UnknownSchema { name: s.to_string() }),
        }
    }
}

/// A feature toggle declared by a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSpec {
    pub name: String,
    pub description: String,
    pub default: bool,
    /// Per-OS default overriding `default`.
    pub os_defaults: Vec<(Os, bool)>,
    /// Operating systems the toggle exists on; `None` means all.
    pub only_on: Option<Vec<Os>>,
}

impl ToggleSpec {
    pub fn new(name: impl Into<String>, default: bool) -> Self {
        ToggleSpec {
            name: name.into(),
            description: String::new(),
            default,
            os_defaults: Vec::new(),
            only_on: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn default_on(mut self, os: Os, default: bool) -> Self {
        self.os_defaults.push((os, default));
        self
    }

    pub fn only_on(mut self, os: &[Os]) -> Self {
        self.only_on = Some(os.to_vec());
        self
    }

    pub fn applies_to(&self, os: Os) -> bool {
        match &self.only_on {
            Some(list) => list.contains(&os),
            None => true,
        }
    }

    pub fn default_for(&self, os: Os) -> bool {
        self.os_defaults
            .iter()
            .find(|(candidate, _)| *candidate == os)
            .map(|(_, value)| *value)
            .unwrap_or(self.default)
    }
}

/// A dependency contributed when `condition` holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementRule {
    pub condition: Condition,
    pub name: String,
    pub constraint: String,
    pub kind: RequirementKind,
}

/// Default value of a dependency option, applied when `condition` holds.
/// Later matching rules replace earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDefaultRule {
    pub condition: Condition,
    pub dependency: String,
    pub option: String,
    pub value: Value,
}

/// What a definition rule writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionContribution {
    /// A fixed key/value pair.
    Fixed { key: String, value: Value },
    /// The package version string.
    VersionString { key: String },
    /// The package version in 4-part comma form for OS resource metadata.
    ResourceVersion { key: String },
    /// The target architecture name.
    TargetArch { key: String },
    /// The requested build type, e.g. `Release`.
    BuildType { key: String },
    /// One boolean definition per applicable toggle.
    Toggles,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionRule {
    pub condition: Condition,
    pub precedence: Precedence,
    pub contribution: DefinitionContribution,
}

/// Artifacts appended when `condition` holds. A matching terminal rule
/// ends manifest evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRule {
    pub condition: Condition,
    pub artifacts: Vec<String>,
    pub terminal: bool,
}

/// Everything the resolver needs to know about one recipe release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    pub name: String,
    pub package_version: String,
    pub toggles: Vec<ToggleSpec>,
    pub requirements: Vec<RequirementRule>,
    pub option_defaults: Vec<OptionDefaultRule>,
    pub definitions: Vec<DefinitionRule>,
    pub manifest: Vec<ManifestRule>,
    /// Dependencies whose complete package state feeds the fingerprint.
    pub full_package_mode: Vec<String>,
}

impl RuleTable {
    pub fn new(name: impl Into<String>, package_version: impl Into<String>) -> Self {
        RuleTable {
            name: name.into(),
            package_version: package_version.into(),
            toggles: Vec::new(),
            requirements: Vec::new(),
            option_defaults: Vec::new(),
            definitions: Vec::new(),
            manifest: Vec::new(),
            full_package_mode: Vec::new(),
        }
    }

    pub fn toggle(mut self, spec: ToggleSpec) -> Self {
        self.toggles.push(spec);
        self
    }

    /// Declare a dependency needed when `condition` holds.
    pub fn require(mut self, condition: Condition, name: &str, constraint: &str) -> Self {
        self.requirements.push(RequirementRule {
            condition,
            name: name.to_string(),
            constraint: constraint.to_string(),
            kind: RequirementKind::Host,
        });
        self
    }

    /// Declare a dependency only the test suite needs.
    pub fn test_require(mut self, condition: Condition, name: &str, constraint: &str) -> Self {
        self.requirements.push(RequirementRule {
            condition,
            name: name.to_string(),
            constraint: constraint.to_string(),
            kind: RequirementKind::Test,
        });
        self
    }

    pub fn option_default(
        mut self,
        condition: Condition,
        dependency: &str,
        option: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.option_defaults.push(OptionDefaultRule {
            condition,
            dependency: dependency.to_string(),
            option: option.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn define(
        mut self,
        condition: Condition,
        precedence: Precedence,
        contribution: DefinitionContribution,
    ) -> Self {
        self.definitions.push(DefinitionRule {
            condition,
            precedence,
            contribution,
        });
        self
    }

    pub fn artifacts(mut self, condition: Condition, artifacts: &[&str]) -> Self {
        self.manifest.push(ManifestRule {
            condition,
            artifacts: artifacts.iter().map(|a| a.to_string()).collect(),
            terminal: false,
        });
        self
    }

    pub fn terminal_artifacts(mut self, condition: Condition, artifacts: &[&str]) -> Self {
        self.manifest.push(ManifestRule {
            condition,
            artifacts: artifacts.iter().map(|a| a.to_string()).collect(),
            terminal: true,
        });
        self
    }

    pub fn full_package_mode(mut self, dependency: &str) -> Self {
        self.full_package_mode.push(dependency.to_string());
        self
    }

    pub fn toggle_spec(&self, name: &str) -> Option<&ToggleSpec> {
        self.toggles.iter().find(|t| t.name == name)
    }

    pub fn is_full_package_mode(&self, dependency: &str) -> bool {
        self.full_package_mode.iter().any(|d| d == dependency)
    }

    /// Check the table for defects the resolver cannot recover from:
    /// conditions reading undeclared toggles and unparsable constraints.
    pub fn validate(&self) -> Result<(), ResolveError> {
        let conditions = self
            .requirements
            .iter()
            .map(|r| &r.condition)
            .chain(self.option_defaults.iter().map(|r| &r.condition))
            .chain(self.definitions.iter().map(|r| &r.condition))
            .chain(self.manifest.iter().map(|r| &r.condition));

        for condition in conditions {
            for name in condition.toggle_refs() {
                if self.toggle_spec(name).is_none() {
                    return Err(ResolveError::UnknownToggle {
                        toggle: name.to_string(),
                    });
                }
            }
        }

        for rule in &self.requirements {
            if VersionConstraint::parse(&rule.constraint).is_none() {
                return Err(ResolveError::InvalidConstraint {
                    dependency: rule.name.clone(),
                    constraint: rule.constraint.clone(),
                });
            }
        }

        Ok(())
    }
}
