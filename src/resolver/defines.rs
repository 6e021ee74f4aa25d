//! Definition emission.

use crate::core::definition::DefinitionSet;
use crate::core::platform::PlatformDescriptor;
use crate::core::value::Value;
use crate::resolver::errors::ResolveError;
use crate::resolver::normalize::NormalizedOptions;
use crate::resolver::schema::{DefinitionContribution, RuleTable};

/// Encode `MAJOR.MINOR.PATCH` as the 4-part comma form used by Windows
/// VERSIONINFO resources: `3.4.0` becomes `3,4,0,0`.
pub fn encode_resource_version(version: &str) -> Result<String, ResolveError> {
    let malformed = |reason: String| ResolveError::MalformedVersionString {
        version: version.to_string(),
        reason,
    };

    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() != 3 {
        return Err(malformed(format!(
            "expected 3 dot-separated components, found {}",
            parts.len()
        )));
    }

    let mut fields = Vec::with_capacity(4);
    for part in parts {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(format!("`{}` is not a decimal number", part)));
        }
        if part.len() > 1 && part.starts_with('0') {
            return Err(malformed(format!("`{}` has a leading zero", part)));
        }
        // Resource version fields are 16-bit.
        let field: u16 = part
            .parse()
            .map_err(|_| malformed(format!("`{}` is not a number between 0 and 65535", part)))?;
        fields.push(field.to_string());
    }
    fields.push("0".to_string());

    Ok(fields.join(","))
}

/// Compute the definitions passed to the build.
pub fn emit_definitions(
    table: &RuleTable,
    platform: &PlatformDescriptor,
    options: &NormalizedOptions,
    version: &str,
) -> Result<DefinitionSet, ResolveError> {
    let mut defs = DefinitionSet::new();

    for rule in &table.definitions {
        if !rule.condition.evaluate(platform, &options.toggles)? {
            continue;
        }

        match &rule.contribution {
            DefinitionContribution::Fixed { key, value } => {
                defs.insert(key.clone(), value.clone(), rule.precedence)?;
            }
            DefinitionContribution::VersionString { key } => {
                defs.insert(key.clone(), version, rule.precedence)?;
            }
            DefinitionContribution::ResourceVersion { key } => {
                defs.insert(key.clone(), encode_resource_version(version)?, rule.precedence)?;
            }
            DefinitionContribution::TargetArch { key } => {
                defs.insert(key.clone(), platform.arch().as_str(), rule.precedence)?;
            }
            DefinitionContribution::BuildType { key } => {
                defs.insert(key.clone(), platform.build_type().as_str(), rule.precedence)?;
            }
            DefinitionContribution::Toggles => {
                // Removed toggles are absent from `iter()` and stay undefined.
                for (name, value) in options.toggles.iter() {
                    defs.insert(name, Value::Bool(value), rule.precedence)?;
                }
            }
        }
    }

    Ok(defs)
}
