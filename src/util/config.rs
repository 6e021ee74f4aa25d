//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.lla-recipe/config.toml` - User-wide defaults
//! - Project: `.lla-recipe/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command line
//! flags take precedence over both.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::resolver::normalize::DependencyOptionOverride;

/// Recipe configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default platform and schema
    pub defaults: DefaultsConfig,

    /// Toggle values applied before command line toggles
    pub toggles: BTreeMap<String, bool>,

    /// Dependency options keyed by `dependency:option`
    pub dependency_options: BTreeMap<String, String>,
}

/// Platform and schema defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Schema version, e.g. "3.4"
    pub schema: Option<String>,

    pub os: Option<String>,

    pub arch: Option<String>,

    /// Compiler family, e.g. "msvc"
    pub compiler: Option<String>,

    pub compiler_version: Option<String>,

    pub build_type: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let defaults = other.defaults;
        if defaults.schema.is_some() {
            self.defaults.schema = defaults.schema;
        }
        if defaults.os.is_some() {
            self.defaults.os = defaults.os;
        }
        if defaults.arch.is_some() {
            self.defaults.arch = defaults.arch;
        }
        if defaults.compiler.is_some() {
            self.defaults.compiler = defaults.compiler;
        }
        if defaults.compiler_version.is_some() {
            self.defaults.compiler_version = defaults.compiler_version;
        }
        if defaults.build_type.is_some() {
            self.defaults.build_type = defaults.build_type;
        }

        // Tables merge key by key
        self.toggles.extend(other.toggles);
        self.dependency_options.extend(other.dependency_options);
    }

    /// Parse `[dependency_options]` into overrides, in key order.
    pub fn dependency_overrides(&self) -> Result<Vec<DependencyOptionOverride>> {
        self.dependency_options
            .iter()
            .map(|(target, value)| {
                format!("{}={}", target, value)
                    .parse::<DependencyOptionOverride>()
                    .with_context(|| format!("invalid dependency option `{}` in config", target))
            })
            .collect()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.lla-recipe/config.toml)
/// 2. Global config (~/.lla-recipe/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global config directory (~/.lla-recipe).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".lla-recipe"))
}

/// Get the global config path (~/.lla-recipe/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.lla-recipe/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".lla-recipe").join("config.toml")
}
