//! Dependency resolution.
//!
//! Requirement rules are evaluated in declaration order. The first rule to
//! contribute a dependency fixes its position in the output; a later rule
//! naming the same dependency must pin the same version.

use std::collections::HashMap;

use crate::core::platform::PlatformDescriptor;
use crate::core::requirement::{DependencyRequirement, VersionConstraint};
use crate::resolver::errors::{ConflictSource, ResolveError};
use crate::resolver::normalize::NormalizedOptions;
use crate::resolver::schema::RuleTable;

/// Compute the ordered, duplicate-free dependency list.
pub fn resolve_dependencies(
    table: &RuleTable,
    platform: &PlatformDescriptor,
    options: &NormalizedOptions,
) -> Result<Vec<DependencyRequirement>, ResolveError> {
    let mut resolved: Vec<DependencyRequirement> = Vec::new();
    // name -> (index in `resolved`, origin of the first contribution)
    let mut index: HashMap<String, (usize, String)> = HashMap::new();

    for rule in &table.requirements {
        if !rule.condition.evaluate(platform, &options.toggles)? {
            continue;
        }

        let constraint = VersionConstraint::parse(&rule.constraint).ok_or_else(|| {
            ResolveError::InvalidConstraint {
                dependency: rule.name.clone(),
                constraint: rule.constraint.clone(),
            }
        })?;
        let origin = rule.condition.to_string();

        if let Some((at, first_origin)) = index.get(&rule.name) {
            let existing = &resolved[*at];
            if existing.constraint() != &constraint {
                return Err(ResolveError::DependencyConflict {
                    dependency: rule.name.clone(),
                    first: ConflictSource {
                        origin: first_origin.clone(),
                        constraint: existing.constraint().to_string(),
                    },
                    second: ConflictSource {
                        origin,
                        constraint: constraint.to_string(),
                    },
                });
            }
            tracing::debug!("{} already required by {}", rule.name, first_origin);
            continue;
        }

        tracing::debug!("{} requires {}/{}", origin, rule.name, constraint);

        let requirement = DependencyRequirement::new(rule.name.clone(), constraint)
            .with_kind(rule.kind)
            .with_overlay(options.overlay_for(&rule.name));

        index.insert(rule.name.clone(), (resolved.len(), origin));
        resolved.push(requirement);
    }

    Ok(resolved)
}
