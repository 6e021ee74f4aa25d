//! Target platform description.
//!
//! A [`PlatformDescriptor`] is supplied once per resolution and never
//! mutated. Every rule in a rule table is evaluated against it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::resolver::errors::ResolveError;

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Windows,
    Linux,
    Macos,
    Android,
}

impl Os {
    pub const ALL: [Os; 4] = [Os::Windows, Os::Linux, Os::Macos, Os::Android];

    /// Returns the OS name as used on the command line and in digests.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Os::Windows => "windows",
            Os::Linux => "linux",
            Os::Macos => "macos",
            Os::Android => "android",
        }
    }

    /// Detect the host operating system.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => Os::Windows,
            "macos" => Os::Macos,
            "android" => Os::Android,
            _ => Os::Linux,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Os {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win32" | "win64" => Ok(Os::Windows),
            "linux" => Ok(Os::Linux),
            "macos" | "darwin" | "osx" => Ok(Os::Macos),
            "android" => Ok(Os::Android),
            _ => Err(ResolveError::InvalidPlatform {
                field: "os",
                value: s.to_string(),
            }),
        }
    }
}

/// CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    X86,
    X86_64,
    Armv7,
    Armv8,
}

impl Arch {
    pub const ALL: [Arch; 4] = [Arch::X86, Arch::X86_64, Arch::Armv7, Arch::Armv8];

    /// Returns the architecture name passed to the build as `TARGET_ARCH`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Armv7 => "armv7",
            Arch::Armv8 => "armv8",
        }
    }

    /// Detect the host architecture.
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::X86,
            "arm" => Arch::Armv7,
            "aarch64" => Arch::Armv8,
            _ => Arch::X86_64,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Arch {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86" | "i386" | "i686" => Ok(Arch::X86),
            "x86_64" | "amd64" | "x64" => Ok(Arch::X86_64),
            "armv7" | "arm" | "armv7a" => Ok(Arch::Armv7),
            "armv8" | "aarch64" | "arm64" => Ok(Arch::Armv8),
            _ => Err(ResolveError::InvalidPlatform {
                field: "arch",
                value: s.to_string(),
            }),
        }
    }
}

/// Build configuration, named the way CMake names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl Default for BuildType {
    fn default() -> Self {
        BuildType::Release
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            _ => Err(ResolveError::InvalidPlatform {
                field: "build_type",
                value: s.to_string(),
            }),
        }
    }
}

/// Compiler identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompilerId {
    /// Compiler family (gcc, clang, apple-clang, msvc)
    pub family: String,
    /// Compiler version, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl CompilerId {
    pub fn new(family: impl Into<String>) -> Self {
        CompilerId {
            family: family.into().to_ascii_lowercase(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The usual compiler family for an operating system.
    pub fn default_for(os: Os) -> Self {
        match os {
            Os::Windows => CompilerId::new("msvc"),
            Os::Linux => CompilerId::new("gcc"),
            Os::Macos => CompilerId::new("apple-clang"),
            Os::Android => CompilerId::new("clang"),
        }
    }
}

impl fmt::Display for CompilerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}-{}", self.family, version),
            None => write!(f, "{}", self.family),
        }
    }
}

/// The platform a build targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    os: Os,
    arch: Arch,
    compiler: CompilerId,
    build_type: BuildType,
}

impl PlatformDescriptor {
    pub fn new(os: Os, arch: Arch, compiler: CompilerId, build_type: BuildType) -> Self {
        PlatformDescriptor {
            os,
            arch,
            compiler,
            build_type,
        }
    }

    /// Describe the host with its usual compiler and a release build.
    pub fn host() -> Self {
        let os = Os::host();
        PlatformDescriptor::new(os, Arch::host(), CompilerId::default_for(os), BuildType::Release)
    }

    pub fn os(&self) -> Os {
        self.os
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    pub fn compiler(&self) -> &CompilerId {
        &self.compiler
    }

    pub fn build_type(&self) -> BuildType {
        self.build_type
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} ({}, {})",
            self.arch, self.os, self.compiler, self.build_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os_aliases() {
        assert_eq!("Windows".parse::<Os>().unwrap(), Os::Windows);
        assert_eq!("darwin".parse::<Os>().unwrap(), Os::Macos);
        assert_eq!("android".parse::<Os>().unwrap(), Os::Android);
        assert!(matches!(
            "beos".parse::<Os>(),
            Err(ResolveError::InvalidPlatform { field: "os", .. })
        ));
    }

    #[test]
    fn test_parse_arch_aliases() {
        assert_eq!("amd64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert_eq!("aarch64".parse::<Arch>().unwrap(), Arch::Armv8);
        assert_eq!("i686".parse::<Arch>().unwrap(), Arch::X86);
        assert!("mips".parse::<Arch>().is_err());
    }

    #[test]
    fn test_parse_build_type_case_insensitive() {
        assert_eq!("release".parse::<BuildType>().unwrap(), BuildType::Release);
        assert_eq!(
            "RELWITHDEBINFO".parse::<BuildType>().unwrap(),
            BuildType::RelWithDebInfo
        );
        assert_eq!(BuildType::MinSizeRel.to_string(), "MinSizeRel");
    }

    #[test]
    fn test_platform_display() {
        let platform = PlatformDescriptor::new(
            Os::Windows,
            Arch::X86_64,
            CompilerId::new("MSVC").with_version("193"),
            BuildType::Debug,
        );
        assert_eq!(platform.to_string(), "x86_64-windows (msvc-193, Debug)");
    }
}
