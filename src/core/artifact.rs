//! Output artifact manifest.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

/// Component library name, e.g. `desfirecards`.
pub type ArtifactId = String;

/// Ordered, duplicate-free list of the component libraries a build produces.
#[derive(Debug, Clone, Default)]
pub struct ArtifactManifest {
    artifacts: Vec<ArtifactId>,
    seen: HashSet<ArtifactId>,
}

impl ArtifactManifest {
    pub fn new() -> Self {
        ArtifactManifest::default()
    }

    /// Append an artifact. Returns `false` if it was already listed.
    pub fn push(&mut self, artifact: impl Into<ArtifactId>) -> bool {
        let artifact = artifact.into();
        if self.seen.contains(&artifact) {
            return false;
        }
        self.seen.insert(artifact.clone());
        self.artifacts.push(artifact);
        true
    }

    pub fn extend<I, S>(&mut self, artifacts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<ArtifactId>,
    {
        for artifact in artifacts {
            self.push(artifact);
        }
    }

    pub fn contains(&self, artifact: &str) -> bool {
        self.seen.contains(artifact)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.artifacts.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[ArtifactId] {
        &self.artifacts
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Whether every artifact here also appears in `other`.
    pub fn is_subset_of(&self, other: &ArtifactManifest) -> bool {
        self.artifacts.iter().all(|a| other.contains(a))
    }
}

impl PartialEq for ArtifactManifest {
    fn eq(&self, other: &Self) -> bool {
        self.artifacts == other.artifacts
    }
}

impl Eq for ArtifactManifest {}

impl Serialize for ArtifactManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.artifacts)
    }
}
