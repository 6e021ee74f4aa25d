//! Core data structures.
//!
//! This module contains the value types shared by the resolver and the
//! operations built on it:
//! - Platform descriptors (OS, architecture, compiler, build type)
//! - Feature toggles, requested and normalized
//! - Dependency requirements and their option overlays
//! - Definitions and artifact manifests

pub mod artifact;
pub mod definition;
pub mod platform;
pub mod requirement;
pub mod toggle;
pub mod value;

pub use artifact::{ArtifactId, ArtifactManifest};
pub use definition::{DefinitionEntry, DefinitionSet, Precedence};
pub use platform::{Arch, BuildType, CompilerId, Os, PlatformDescriptor};
pub use requirement::{DependencyRequirement, LinkageOverlay, RequirementKind, VersionConstraint};
pub use toggle::{parse_toggle_assignment, FeatureToggleSet, NormalizedToggles};
pub use value::Value;
