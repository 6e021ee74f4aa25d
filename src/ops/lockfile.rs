//! Package state lock file I/O.
//!
//! The package store records the package id it resolved for each
//! dependency in a TOML file:
//!
//! ```toml
//! [packages]
//! boost = "a1b2c3"
//! openssl = "d4e5f6"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::resolver::PackageStates;

#[derive(Debug, Default, Serialize, Deserialize)]
struct LockFile {
    #[serde(default)]
    packages: PackageStates,
}

/// Load package states from a lock file.
pub fn load_package_states(path: &Path) -> Result<PackageStates> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read lock file: {}", path.display()))?;

    let lock: LockFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse lock file: {}", path.display()))?;

    tracing::debug!("loaded {} package states from {}", lock.packages.len(), path.display());
    Ok(lock.packages)
}

/// Write package states to a lock file.
pub fn save_package_states(path: &Path, states: &PackageStates) -> Result<()> {
    let lock = LockFile {
        packages: states.clone(),
    };
    let contents = toml::to_string_pretty(&lock).context("failed to serialize lock file")?;

    std::fs::write(path, contents)
        .with_context(|| format!("failed to write lock file: {}", path.display()))
}
