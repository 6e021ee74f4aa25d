//! Rule predicates.
//!
//! Every contribution in a rule table is guarded by a [`Condition`]
//! evaluated against the platform and the normalized toggles. Evaluation
//! short-circuits left to right, so `all([os(Windows), toggle(X)])` never
//! reads `X` on a platform where it was removed.

use std::fmt;

use crate::core::platform::{Arch, Os, PlatformDescriptor};
use crate::core::toggle::NormalizedToggles;
use crate::resolver::errors::ResolveError;

/// Predicate guarding a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Always,
    Os(Os),
    NotOs(Os),
    Arch(Arch),
    NotArch(Arch),
    /// Compiler family, e.g. `msvc`
    Compiler(String),
    /// The named toggle is present and true.
    Toggle(String),
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn toggle(name: impl Into<String>) -> Self {
        Condition::Toggle(name.into())
    }

    pub fn compiler(family: impl Into<String>) -> Self {
        Condition::Compiler(family.into())
    }

    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::All(conditions.into_iter().collect())
    }

    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Any(conditions.into_iter().collect())
    }

    pub fn negate(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// Evaluate against the normalized inputs.
    pub fn evaluate(
        &self,
        platform: &PlatformDescriptor,
        toggles: &NormalizedToggles,
    ) -> Result<bool, ResolveError> {
        match self {
            Condition::Always => Ok(true),
            Condition::Os(os) => Ok(platform.os() == *os),
            Condition::NotOs(os) => Ok(platform.os() != *os),
            Condition::Arch(arch) => Ok(platform.arch() == *arch),
            Condition::NotArch(arch) => Ok(platform.arch() != *arch),
            Condition::Compiler(family) => Ok(platform.compiler().family == *family),
            Condition::Toggle(name) => toggles.get(name),
            Condition::All(conditions) => {
                for condition in conditions {
                    if !condition.evaluate(platform, toggles)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::Any(conditions) => {
                for condition in conditions {
                    if condition.evaluate(platform, toggles)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Condition::Not(condition) => Ok(!condition.evaluate(platform, toggles)?),
        }
    }

    /// Every toggle name this condition may read.
    pub fn toggle_refs(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.collect_toggle_refs(&mut refs);
        refs
    }

    fn collect_toggle_refs<'a>(&'a self, refs: &mut Vec<&'a str>) {
        match self {
            Condition::Toggle(name) => refs.push(name),
            Condition::All(conditions) | Condition::Any(conditions) => {
                for condition in conditions {
                    condition.collect_toggle_refs(refs);
                }
            }
            Condition::Not(condition) => condition.collect_toggle_refs(refs),
            _ => {}
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |conditions: &[Condition]| {
            conditions
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        match self {
            Condition::Always => write!(f, "base"),
            Condition::Os(os) => write!(f, "os == {}", os),
            Condition::NotOs(os) => write!(f, "os != {}", os),
            Condition::Arch(arch) => write!(f, "arch == {}", arch),
            Condition::NotArch(arch) => write!(f, "arch != {}", arch),
            Condition::Compiler(family) => write!(f, "compiler == {}", family),
            Condition::Toggle(name) => write!(f, "toggle `{}`", name),
            Condition::All(conditions) => write!(f, "all({})", join(conditions.as_slice())),
            Condition::Any(conditions) => write!(f, "any({})", join(conditions.as_slice())),
            Condition::Not(condition) => write!(f, "not({})", condition),
        }
    }
}
