//! External dependency requirements.
//!
//! A [`DependencyRequirement`] names an external package, the version it is
//! pinned to, and the option overlay forced onto it (for example whether it
//! is linked shared or static).

use std::collections::BTreeMap;
use std::fmt;

use semver::VersionReq;
use serde::{Deserialize, Serialize};

use crate::core::value::Value;

/// Options forced onto a dependency, keyed by option name.
pub type LinkageOverlay = BTreeMap<String, Value>;

/// Whether a requirement is linked into the product or only used by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementKind {
    Host,
    Test,
}

impl RequirementKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RequirementKind::Host => "host",
            RequirementKind::Test => "test",
        }
    }
}

impl Default for RequirementKind {
    fn default() -> Self {
        RequirementKind::Host
    }
}

/// A version constraint as declared by a recipe.
///
/// Package versions such as `1.83.0` are exact pins. Versions that are not
/// valid semver (`1.1.1k`) are kept verbatim and compared textually.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionConstraint {
    text: String,
    req: Option<VersionReq>,
}

impl VersionConstraint {
    /// Parse a declared constraint. Returns `None` for an empty or
    /// structurally invalid constraint.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() || text.chars().any(|c| c.is_whitespace() || c == '/' || c == '@') {
            return None;
        }

        let starts_with_op = text.starts_with(['=', '>', '<', '~', '^', '*']);
        let req = if starts_with_op {
            VersionReq::parse(text).ok()
        } else {
            VersionReq::parse(&format!("={}", text)).ok()
        };

        Some(VersionConstraint {
            text: text.to_string(),
            req,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The semver requirement, when the constraint is valid semver.
    pub fn semver(&self) -> Option<&VersionReq> {
        self.req.as_ref()
    }

    /// Normalized form used for equality and hashing.
    pub fn canonical(&self) -> String {
        match &self.req {
            Some(req) => req.to_string(),
            None => self.text.clone(),
        }
    }
}

impl PartialEq for VersionConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl TryFrom<String> for VersionConstraint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VersionConstraint::parse(&value).ok_or_else(|| format!("invalid version constraint `{}`", value))
    }
}

impl From<VersionConstraint> for String {
    fn from(constraint: VersionConstraint) -> Self {
        constraint.text
    }
}

/// A resolved dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRequirement {
    name: String,
    constraint: VersionConstraint,
    #[serde(default)]
    kind: RequirementKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    overlay: LinkageOverlay,
}

impl DependencyRequirement {
    pub fn new(name: impl Into<String>, constraint: VersionConstraint) -> Self {
        DependencyRequirement {
            name: name.into(),
            constraint,
            kind: RequirementKind::Host,
            overlay: LinkageOverlay::new(),
        }
    }

    pub fn with_kind(mut self, kind: RequirementKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_overlay(mut self, overlay: LinkageOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    /// Set a single overlay option.
    pub fn with_option(mut self, option: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overlay.insert(option.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint(&self) -> &VersionConstraint {
        &self.constraint
    }

    pub fn kind(&self) -> RequirementKind {
        self.kind
    }

    pub fn overlay(&self) -> &LinkageOverlay {
        &self.overlay
    }

    /// Package reference in `name/version` form.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.constraint)
    }
}

impl fmt::Display for DependencyRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference())?;
        if !self.overlay.is_empty() {
            let options: Vec<String> = self
                .overlay
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            write!(f, " [{}]", options.join(", "))?;
        }
        if self.kind == RequirementKind::Test {
            write!(f, " (test)")?;
        }
        Ok(())
    }
}
