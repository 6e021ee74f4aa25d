//! Test utilities and mocks for unit tests.
//!
//! This module provides platform fixtures plus in-memory implementations
//! of the package store and build invoker collaborators.
//!
//! # Example
//!
//! ```rust,ignore
//! use lla_recipe::test_support::{linux_x86_64, MemoryPackageStore, RecordingInvoker};
//!
//! #[test]
//! fn test_example() {
//!     let mut store = MemoryPackageStore::new();
//!     let mut invoker = RecordingInvoker::succeeding();
//!
//!     // Resolve for linux_x86_64() and hand both mocks to ops::execute...
//! }
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::core::artifact::ArtifactManifest;
use crate::ops::plan::{BuildInvocation, BuildInvoker, BuildOutput, PackageStore, StoredPackage};
use crate::resolver::CompatibilityFingerprint;

// Re-export fixtures for convenience
pub use fixtures::*;

/// In-memory package store.
#[derive(Debug, Default)]
pub struct MemoryPackageStore {
    packages: HashMap<CompatibilityFingerprint, StoredPackage>,
}

impl MemoryPackageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryPackageStore::default()
    }

    /// Check whether a package was published under `fingerprint`.
    pub fn contains(&self, fingerprint: &CompatibilityFingerprint) -> bool {
        self.packages.contains_key(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }
}

impl PackageStore for MemoryPackageStore {
    fn lookup(&self, fingerprint: &CompatibilityFingerprint) -> Result<Option<StoredPackage>> {
        Ok(self.packages.get(fingerprint).cloned())
    }

    fn publish(&mut self, package: StoredPackage) -> Result<()> {
        self.packages.insert(package.fingerprint.clone(), package);
        Ok(())
    }
}

/// How a [`RecordingInvoker`] responds.
#[derive(Debug, Clone)]
enum InvokerBehavior {
    /// Produce every requested artifact.
    Succeed,
    /// Produce everything except the named artifact.
    Drop(String),
    /// Fail the build.
    Fail,
}

/// Build invoker that records invocations instead of building.
#[derive(Debug)]
pub struct RecordingInvoker {
    behavior: InvokerBehavior,
    invocations: Vec<BuildInvocation>,
}

impl RecordingInvoker {
    /// An invoker whose builds always succeed.
    pub fn succeeding() -> Self {
        RecordingInvoker {
            behavior: InvokerBehavior::Succeed,
            invocations: Vec::new(),
        }
    }

    /// An invoker whose builds silently omit one artifact.
    pub fn dropping(artifact: &str) -> Self {
        RecordingInvoker {
            behavior: InvokerBehavior::Drop(artifact.to_string()),
            invocations: Vec::new(),
        }
    }

    /// An invoker whose builds always fail.
    pub fn failing() -> Self {
        RecordingInvoker {
            behavior: InvokerBehavior::Fail,
            invocations: Vec::new(),
        }
    }

    /// Get all recorded invocations.
    pub fn invocations(&self) -> &[BuildInvocation] {
        &self.invocations
    }
}

impl BuildInvoker for RecordingInvoker {
    fn build(&mut self, invocation: &BuildInvocation) -> Result<BuildOutput> {
        self.invocations.push(invocation.clone());

        let location = PathBuf::from(format!("/packages/{}", self.invocations.len()));
        let artifacts = match &self.behavior {
            InvokerBehavior::Succeed => invocation.artifacts.clone(),
            InvokerBehavior::Drop(name) => {
                let mut artifacts = ArtifactManifest::new();
                artifacts.extend(invocation.artifacts.iter().filter(|a| *a != name.as_str()));
                artifacts
            }
            InvokerBehavior::Fail => bail!("cmake exited with status 1"),
        };

        Ok(BuildOutput {
            location,
            artifacts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint() -> CompatibilityFingerprint {
        serde_json::from_str("\"0123456789abcdef\"").unwrap()
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryPackageStore::new();
        assert!(store.lookup(&fingerprint()).unwrap().is_none());

        store
            .publish(StoredPackage {
                fingerprint: fingerprint(),
                location: PathBuf::from("/packages/1"),
                artifacts: ArtifactManifest::new(),
            })
            .unwrap();

        assert!(store.contains(&fingerprint()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_dropping_invoker() {
        let mut artifacts = ArtifactManifest::new();
        artifacts.extend(["llacommon", "pcscreaders"]);
        let invocation = BuildInvocation {
            cmake_args: Vec::new(),
            dependencies: Vec::new(),
            dependency_options: Vec::new(),
            artifacts,
        };

        let mut invoker = RecordingInvoker::dropping("pcscreaders");
        let output = invoker.build(&invocation).unwrap();

        assert!(output.artifacts.contains("llacommon"));
        assert!(!output.artifacts.contains("pcscreaders"));
        assert_eq!(invoker.invocations().len(), 1);
    }
}
