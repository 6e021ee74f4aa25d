//! Command implementations

pub mod completions;
pub mod defines;
pub mod deps;
pub mod fingerprint;
pub mod manifest;
pub mod resolve;
pub mod schemas;
pub mod toggles;

use anyhow::{Context, Result};

use crate::cli::{PlatformArgs, TargetArgs};
use lla_recipe::core::platform::{Arch, BuildType, CompilerId, Os, PlatformDescriptor};
use lla_recipe::core::toggle::{parse_toggle_assignment, FeatureToggleSet};
use lla_recipe::ops::load_package_states;
use lla_recipe::resolver::{
    DependencyOptionOverride, Resolution, ResolveRequest, Resolver, SchemaVersion,
};
use lla_recipe::util::config::{global_config_path, load_config, project_config_path, Config};

/// Load the merged global and project configuration.
pub fn load_merged_config() -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let project = project_config_path(&cwd);

    let config = match global_config_path() {
        Some(global) => load_config(&global, &project),
        None => {
            let mut config = Config::default();
            config.merge(Config::load_or_default(&project));
            config
        }
    };

    Ok(config)
}

/// Pick a value from the command line, then config.
fn pick<'a>(flag: &'a Option<String>, config: &'a Option<String>) -> Option<&'a str> {
    flag.as_deref().or(config.as_deref())
}

/// Resolve the schema and platform from flags and config, falling back to
/// the host platform.
pub fn select_platform(
    args: &PlatformArgs,
    config: &Config,
) -> Result<(SchemaVersion, PlatformDescriptor)> {
    let defaults = &config.defaults;

    let schema = match pick(&args.schema, &defaults.schema) {
        Some(s) => s.parse()?,
        None => SchemaVersion::LATEST,
    };

    let os = match pick(&args.os, &defaults.os) {
        Some(s) => s.parse()?,
        None => Os::host(),
    };

    let arch = match pick(&args.arch, &defaults.arch) {
        Some(s) => s.parse()?,
        None => Arch::host(),
    };

    let mut compiler = match pick(&args.compiler, &defaults.compiler) {
        Some(family) => CompilerId::new(family),
        None => CompilerId::default_for(os),
    };
    if let Some(version) = pick(&args.compiler_version, &defaults.compiler_version) {
        compiler = compiler.with_version(version);
    }

    let build_type = match pick(&args.build_type, &defaults.build_type) {
        Some(s) => s.parse()?,
        None => BuildType::default(),
    };

    Ok((schema, PlatformDescriptor::new(os, arch, compiler, build_type)))
}

/// Build a resolution request from flags and config.
///
/// Command line toggles and dependency options are layered over the ones
/// from config.
pub fn build_request(args: &TargetArgs, config: &Config) -> Result<(SchemaVersion, ResolveRequest)> {
    let (schema, platform) = select_platform(&args.platform, config)?;

    let mut toggles: FeatureToggleSet = config
        .toggles
        .iter()
        .map(|(name, value)| (name.clone(), *value))
        .collect();
    let requested = args
        .options
        .iter()
        .map(|text| parse_toggle_assignment(text))
        .collect::<Result<FeatureToggleSet, _>>()?;
    toggles.merge(&requested);

    let mut request = ResolveRequest::new(platform).with_toggles(toggles);

    for o in config.dependency_overrides()? {
        request = request.with_dependency_option(o);
    }
    for text in &args.dep_options {
        let o: DependencyOptionOverride = text.parse()?;
        request = request.with_dependency_option(o);
    }

    if let Some(version) = &args.package_version {
        request = request.with_version(version.clone());
    }

    if let Some(path) = &args.lock {
        request = request.with_package_states(load_package_states(path)?);
    }

    Ok((schema, request))
}

/// Load config, build the request and resolve it.
pub fn resolve_target(args: &TargetArgs) -> Result<Resolution> {
    let config = load_merged_config()?;
    let (schema, request) = build_request(args, &config)?;

    let resolver = Resolver::for_schema(schema)?;
    Ok(resolver.resolve(&request)?)
}
