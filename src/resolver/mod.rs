//! Build configuration resolution.
//!
//! A [`Resolver`] turns a platform descriptor and requested feature toggles
//! into the four outputs a recipe build needs: the dependency list, the
//! definitions passed to CMake, the artifact manifest and the compatibility
//! fingerprint. The resolver is pure and deterministic; everything
//! release-specific lives in the [`RuleTable`] it is constructed with.

pub mod defines;
pub mod deps;
pub mod errors;
pub mod fingerprint;
pub mod manifest;
pub mod normalize;
pub mod rules;
pub mod schema;
pub mod tables;

pub use defines::encode_resource_version;
pub use errors::{ConflictSource, ResolveError};
pub use fingerprint::{CompatibilityFingerprint, PackageStates};
pub use normalize::{DependencyOptionOverride, NormalizedOptions};
pub use rules::Condition;
pub use schema::{RuleTable, SchemaVersion, ToggleSpec};

use serde::Serialize;

use crate::core::artifact::ArtifactManifest;
use crate::core::definition::DefinitionSet;
use crate::core::platform::PlatformDescriptor;
use crate::core::requirement::DependencyRequirement;
use crate::core::toggle::{FeatureToggleSet, NormalizedToggles};

/// Inputs of one resolution.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub platform: PlatformDescriptor,
    pub toggles: FeatureToggleSet,
    pub dependency_options: Vec<DependencyOptionOverride>,
    /// Package version to encode; the table's own version when unset.
    pub version: Option<String>,
    pub package_states: PackageStates,
}

impl ResolveRequest {
    pub fn new(platform: PlatformDescriptor) -> Self {
        ResolveRequest {
            platform,
            toggles: FeatureToggleSet::new(),
            dependency_options: Vec::new(),
            version: None,
            package_states: PackageStates::new(),
        }
    }

    pub fn with_toggles(mut self, toggles: FeatureToggleSet) -> Self {
        self.toggles = toggles;
        self
    }

    pub fn with_toggle(mut self, name: impl Into<String>, value: bool) -> Self {
        self.toggles.set(name, value);
        self
    }

    pub fn with_dependency_option(mut self, o: DependencyOptionOverride) -> Self {
        self.dependency_options.push(o);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_package_states(mut self, states: PackageStates) -> Self {
        self.package_states = states;
        self
    }
}

/// Result of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub schema: String,
    pub version: String,
    pub platform: String,
    pub toggles: NormalizedToggles,
    pub dependencies: Vec<DependencyRequirement>,
    pub definitions: DefinitionSet,
    pub manifest: ArtifactManifest,
    pub fingerprint: CompatibilityFingerprint,
}

/// Resolver over a single rule table.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a RuleTable,
}

impl<'a> Resolver<'a> {
    /// Create a resolver, rejecting defective tables up front.
    pub fn new(table: &'a RuleTable) -> Result<Self, ResolveError> {
        table.validate()?;
        Ok(Resolver { table })
    }

    pub fn table(&self) -> &'a RuleTable {
        self.table
    }

    /// Resolve a request. Any error aborts the whole resolution.
    pub fn resolve(&self, request: &ResolveRequest) -> Result<Resolution, ResolveError> {
        let table = self.table;
        let platform = &request.platform;
        let version = request
            .version
            .as_deref()
            .unwrap_or(&table.package_version);

        let options = normalize::normalize(
            table,
            platform,
            &request.toggles,
            &request.dependency_options,
        )?;

        let dependencies = deps::resolve_dependencies(table, platform, &options)?;
        let definitions = defines::emit_definitions(table, platform, &options, version)?;
        let manifest = manifest::build_manifest(table, platform, &options)?;
        let fingerprint = fingerprint::compute(
            table,
            platform,
            &options.toggles,
            &dependencies,
            &request.package_states,
        );

        tracing::info!(
            "resolved {} for {}: {} dependencies, {} definitions, {} artifacts ({})",
            table.name,
            platform,
            dependencies.len(),
            definitions.len(),
            manifest.len(),
            fingerprint.short()
        );

        Ok(Resolution {
            schema: table.name.clone(),
            version: version.to_string(),
            platform: platform.to_string(),
            toggles: options.toggles,
            dependencies,
            definitions,
            manifest,
            fingerprint,
        })
    }
}

impl Resolver<'static> {
    /// Resolver for a built-in release.
    pub fn for_schema(schema: SchemaVersion) -> Result<Self, ResolveError> {
        Resolver::new(schema.rules())
    }
}
