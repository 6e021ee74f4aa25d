//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::platform::Os;
use crate::util::diagnostic::Diagnostic;

/// One side of a dependency conflict: which rule asked, and for what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictSource {
    pub origin: String,
    pub constraint: String,
}

/// Error during configuration resolution.
///
/// Every variant is fatal for the current resolution; no partial
/// results are returned alongside it.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("unknown toggle `{toggle}`")]
    #[diagnostic(code(lla_recipe::toggle::unknown))]
    UnknownToggle { toggle: String },

    #[error("toggle `{toggle}` does not exist on {os}")]
    #[diagnostic(code(lla_recipe::toggle::inapplicable))]
    InapplicableToggleReference { toggle: String, os: Os },

    #[error(
        "conflicting requirements for `{dependency}`: {} requires {}, {} requires {}",
        .first.origin,
        .first.constraint,
        .second.origin,
        .second.constraint
    )]
    #[diagnostic(
        code(lla_recipe::resolve::dependency_conflict),
        help("Align the version pinned by every rule that requires this dependency")
    )]
    DependencyConflict {
        dependency: String,
        first: ConflictSource,
        second: ConflictSource,
    },

    #[error("malformed version string `{version}`: {reason}")]
    #[diagnostic(code(lla_recipe::define::malformed_version))]
    MalformedVersionString { version: String, reason: String },

    #[error("definition `{key}` defined twice")]
    #[diagnostic(code(lla_recipe::define::duplicate))]
    DuplicateDefinition {
        key: String,
        existing: String,
        value: String,
    },

    #[error("invalid version constraint `{constraint}` for `{dependency}`")]
    #[diagnostic(code(lla_recipe::schema::invalid_constraint))]
    InvalidConstraint {
        dependency: String,
        constraint: String,
    },

    #[error("unknown schema version `{name}`")]
    #[diagnostic(code(lla_recipe::schema::unknown))]
    UnknownSchema { name: String },

    #[error("invalid {field} `{value}`")]
    #[diagnostic(code(lla_recipe::platform::invalid))]
    InvalidPlatform { field: &'static str, value: String },

    #[error("invalid assignment `{text}`, expected `{expected}`")]
    #[diagnostic(code(lla_recipe::cli::invalid_assignment))]
    InvalidAssignment {
        text: String,
        expected: &'static str,
    },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::UnknownToggle { toggle } => {
                Diagnostic::error(format!("unknown toggle `{}`", toggle))
                    .with_suggestion("Run `lla-recipe toggles` to list the toggles of this schema")
                    .with_suggestion("Check the spelling; toggle names are case-sensitive")
            }

            ResolveError::InapplicableToggleReference { toggle, os } => {
                Diagnostic::error(format!("toggle `{}` was read on {}", toggle, os))
                    .with_context(format!("`{}` is removed on {} and has no value there", toggle, os))
                    .with_suggestion(format!(
                        "Guard the rule reading `{}` with the platform it applies to",
                        toggle
                    ))
            }

            ResolveError::DependencyConflict {
                dependency,
                first,
                second,
            } => Diagnostic::error(format!("conflicting requirements for `{}`", dependency))
                .with_context(format!(
                    "{} requires {}/{}",
                    first.origin, dependency, first.constraint
                ))
                .with_context(format!(
                    "{} requires {}/{}",
                    second.origin, dependency, second.constraint
                ))
                .with_suggestion("Disable one of the toggles involved")
                .with_suggestion(format!(
                    "Pin `{}` to the same version in every rule",
                    dependency
                )),

            ResolveError::MalformedVersionString { version, reason } => {
                Diagnostic::error(format!("malformed version string `{}`", version))
                    .with_context(reason.clone())
                    .with_suggestion("Use a `MAJOR.MINOR.PATCH` version with numeric components")
            }

            ResolveError::DuplicateDefinition {
                key,
                existing,
                value,
            } => Diagnostic::error(format!("definition `{}` defined twice", key))
                .with_context(format!("first value: `{}`", existing))
                .with_context(format!("second value: `{}`", value))
                .with_suggestion("Give the overriding rule platform precedence"),

            ResolveError::InvalidConstraint {
                dependency,
                constraint,
            } => Diagnostic::error(format!(
                "invalid version constraint `{}` for `{}`",
                constraint, dependency
            )),

            ResolveError::UnknownSchema { name } => {
                Diagnostic::error(format!("unknown schema version `{}`", name))
                    .with_suggestion("Run `lla-recipe schemas` to list known schema versions")
            }

            ResolveError::InvalidPlatform { field, value } => {
                Diagnostic::error(format!("invalid {} `{}`", field, value))
            }

            ResolveError::InvalidAssignment { text, expected } => {
                Diagnostic::error(format!("invalid assignment `{}`", text))
                    .with_suggestion(format!("Use the form `{}`", expected))
            }
        }
    }
}
