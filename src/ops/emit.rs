//! Rendering resolutions for the build and packaging steps.

use std::fmt::Write as _;

use crate::core::value::Value;
use crate::resolver::Resolution;

fn cmake_value(value: &Value) -> String {
    match value {
        Value::Bool(true) => "ON".to_string(),
        Value::Bool(false) => "OFF".to_string(),
        other => other.to_string(),
    }
}

/// Definitions as `-DKEY=VALUE` arguments for a CMake configure step.
pub fn cmake_args(resolution: &Resolution) -> Vec<String> {
    resolution
        .definitions
        .iter()
        .map(|(key, value)| format!("-D{}={}", key, cmake_value(value)))
        .collect()
}

/// Definitions as a CMake initial-cache script, for `cmake -C`.
pub fn cmake_cache_script(resolution: &Resolution) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# lla-recipe {} for {} ({})",
        resolution.schema,
        resolution.platform,
        resolution.fingerprint.short()
    );

    for (key, value) in resolution.definitions.iter() {
        let kind = match value {
            Value::Bool(_) => "BOOL",
            _ => "STRING",
        };
        let _ = writeln!(
            out,
            "set({} \"{}\" CACHE {} \"\" FORCE)",
            key,
            cmake_value(value).replace('"', "\\\""),
            kind
        );
    }

    out
}

/// Dependency references in `name/version` form, in resolution order.
pub fn dependency_references(resolution: &Resolution) -> Vec<String> {
    resolution
        .dependencies
        .iter()
        .map(|d| d.reference())
        .collect()
}

/// Dependency options as package-manager profile lines, e.g.
/// `boost/*:shared=False`.
pub fn option_lines(resolution: &Resolution) -> Vec<String> {
    let mut lines = Vec::new();
    for dep in &resolution.dependencies {
        for (option, value) in dep.overlay() {
            lines.push(format!("{}/*:{}={}", dep.name(), option, value));
        }
    }
    lines
}
