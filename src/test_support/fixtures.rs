//! Test fixtures for common test scenarios.
//!
//! Platform descriptors for the targets the recipe ships on, plus small
//! rule tables for behavior the built-in releases never exercise.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::platform::{Arch, BuildType, CompilerId, Os, PlatformDescriptor};
use crate::core::toggle::NormalizedToggles;
use crate::resolver::rules::Condition;
use crate::resolver::schema::{RuleTable, ToggleSpec};

/// Build a platform with a compiler family and no compiler version.
pub fn platform(os: Os, arch: Arch, compiler: &str, build_type: BuildType) -> PlatformDescriptor {
    PlatformDescriptor::new(os, arch, CompilerId::new(compiler), build_type)
}

pub fn linux_x86_64() -> PlatformDescriptor {
    platform(Os::Linux, Arch::X86_64, "gcc", BuildType::Release)
}

pub fn windows_x86_64() -> PlatformDescriptor {
    PlatformDescriptor::new(
        Os::Windows,
        Arch::X86_64,
        CompilerId::new("msvc").with_version("193"),
        BuildType::Release,
    )
}

pub fn windows_x86() -> PlatformDescriptor {
    PlatformDescriptor::new(
        Os::Windows,
        Arch::X86,
        CompilerId::new("msvc").with_version("193"),
        BuildType::Release,
    )
}

pub fn android_armv8() -> PlatformDescriptor {
    platform(Os::Android, Arch::Armv8, "clang", BuildType::Release)
}

pub fn macos_armv8() -> PlatformDescriptor {
    platform(Os::Macos, Arch::Armv8, "apple-clang", BuildType::Release)
}

/// Normalized toggles built directly, bypassing a rule table.
pub fn normalized(os: Os, present: &[(&str, bool)], removed: &[&str]) -> NormalizedToggles {
    let values: BTreeMap<String, bool> = present
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect();
    let removed: BTreeSet<String> = removed.iter().map(|name| name.to_string()).collect();
    NormalizedToggles::new(os, values, removed)
}

/// A table where `USE_A` and `USE_B` pin `transport` to different versions.
pub fn conflicting_table() -> RuleTable {
    RuleTable::new("conflicting", "1.0.0")
        .toggle(ToggleSpec::new("USE_A", false))
        .toggle(ToggleSpec::new("USE_B", false))
        .require(Condition::Always, "zlib", "1.3.1")
        .require(Condition::toggle("USE_A"), "transport", "1.0")
        .require(Condition::toggle("USE_B"), "transport", "1.1")
}
