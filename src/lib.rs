//! lla-recipe - build configuration resolver for the liblogicalaccess recipe
//!
//! This crate computes, for a target platform and a set of feature toggles,
//! the dependencies, CMake definitions, packaged component libraries and
//! binary-compatibility fingerprint of a liblogicalaccess build.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides platform fixtures and mock implementations
/// of the package store and build invoker.
#[cfg(test)]
pub mod test_support;

pub use core::{
    ArtifactManifest, DefinitionSet, DependencyRequirement, FeatureToggleSet, PlatformDescriptor,
};

pub use resolver::{Resolution, ResolveError, ResolveRequest, Resolver, SchemaVersion};
