//! Package reuse and build planning.
//!
//! The resolver never builds or stores anything itself. A resolution is
//! handed to two collaborators: a [`PackageStore`] that indexes finished
//! packages by compatibility fingerprint, and a [`BuildInvoker`] that runs
//! the actual configure/build/install for a cache miss.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::core::artifact::ArtifactManifest;
use crate::ops::emit;
use crate::resolver::{CompatibilityFingerprint, Resolution};

/// A package previously published to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPackage {
    pub fingerprint: CompatibilityFingerprint,
    pub location: PathBuf,
    pub artifacts: ArtifactManifest,
}

/// Index of built packages keyed by fingerprint.
pub trait PackageStore {
    fn lookup(&self, fingerprint: &CompatibilityFingerprint) -> Result<Option<StoredPackage>>;

    fn publish(&mut self, package: StoredPackage) -> Result<()>;
}

/// Everything a build step needs from a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    pub cmake_args: Vec<String>,
    pub dependencies: Vec<String>,
    pub dependency_options: Vec<String>,
    pub artifacts: ArtifactManifest,
}

impl BuildInvocation {
    pub fn from_resolution(resolution: &Resolution) -> Self {
        BuildInvocation {
            cmake_args: emit::cmake_args(resolution),
            dependencies: emit::dependency_references(resolution),
            dependency_options: emit::option_lines(resolution),
            artifacts: resolution.manifest.clone(),
        }
    }
}

/// Output of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub location: PathBuf,
    pub artifacts: ArtifactManifest,
}

/// Runs the external build.
pub trait BuildInvoker {
    fn build(&mut self, invocation: &BuildInvocation) -> Result<BuildOutput>;
}

/// What [`execute`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    Reused(StoredPackage),
    Built(StoredPackage),
}

impl PlanOutcome {
    pub fn package(&self) -> &StoredPackage {
        match self {
            PlanOutcome::Reused(p) | PlanOutcome::Built(p) => p,
        }
    }
}

/// Reuse a compatible stored package, or build and publish a new one.
pub fn execute(
    resolution: &Resolution,
    store: &mut dyn PackageStore,
    invoker: &mut dyn BuildInvoker,
) -> Result<PlanOutcome> {
    let fingerprint = &resolution.fingerprint;

    if let Some(package) = store
        .lookup(fingerprint)
        .with_context(|| format!("failed to query package store for {}", fingerprint.short()))?
    {
        tracing::info!("Reusing package {} ({})", fingerprint.short(), package.location.display());
        return Ok(PlanOutcome::Reused(package));
    }

    tracing::info!(
        "No package for {}, building {} artifacts",
        fingerprint.short(),
        resolution.manifest.len()
    );

    let invocation = BuildInvocation::from_resolution(resolution);
    let output = invoker.build(&invocation).context("build failed")?;

    let missing: Vec<&str> = resolution
        .manifest
        .iter()
        .filter(|a| !output.artifacts.contains(a))
        .collect();
    if !missing.is_empty() {
        bail!(
            "build did not produce expected artifacts: {}",
            missing.join(", ")
        );
    }

    let package = StoredPackage {
        fingerprint: fingerprint.clone(),
        location: output.location,
        artifacts: resolution.manifest.clone(),
    };
    store
        .publish(package.clone())
        .with_context(|| format!("failed to publish package {}", fingerprint.short()))?;

    Ok(PlanOutcome::Built(package))
}
