//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// lla-recipe - Build configuration resolver for liblogicalaccess
#[derive(Parser)]
#[command(name = "lla-recipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve dependencies, definitions, manifest and fingerprint
    Resolve(ResolveArgs),

    /// List the dependencies of a configuration
    Deps(DepsArgs),

    /// Show the definitions passed to CMake
    Defines(DefinesArgs),

    /// List the component libraries a configuration packages
    Manifest(ManifestArgs),

    /// Print the compatibility fingerprint of a configuration
    Fingerprint(FingerprintArgs),

    /// List the feature toggles of a schema for a platform
    Toggles(TogglesArgs),

    /// List known schema versions
    Schemas(SchemasArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Target platform and schema selection.
#[derive(Args, Debug, Clone, Default)]
pub struct PlatformArgs {
    /// Schema version (e.g. 3.4, 3.0, 2.1)
    #[arg(long, env = "LLA_RECIPE_SCHEMA")]
    pub schema: Option<String>,

    /// Target operating system (windows, linux, macos, android)
    #[arg(long)]
    pub os: Option<String>,

    /// Target architecture (x86, x86_64, armv7, armv8)
    #[arg(long)]
    pub arch: Option<String>,

    /// Compiler family (e.g. msvc, gcc, clang)
    #[arg(long)]
    pub compiler: Option<String>,

    /// Compiler version
    #[arg(long)]
    pub compiler_version: Option<String>,

    /// Build type (Debug, Release, RelWithDebInfo, MinSizeRel)
    #[arg(long)]
    pub build_type: Option<String>,
}

/// Full resolution inputs.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Set a feature toggle (e.g. -o LLA_BUILD_LIBUSB=true)
    #[arg(short = 'o', long = "option", value_name = "NAME=BOOL")]
    pub options: Vec<String>,

    /// Override a dependency option (e.g. --dep-option boost:shared=True)
    #[arg(long = "dep-option", value_name = "DEP:OPTION=VALUE")]
    pub dep_options: Vec<String>,

    /// Lock file with resolved package states
    #[arg(long, value_name = "FILE")]
    pub lock: Option<PathBuf>,

    /// Package version to encode instead of the schema's own
    #[arg(long, value_name = "VERSION")]
    pub package_version: Option<String>,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct DepsArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print dependency options as profile lines (dep/*:option=value)
    #[arg(long)]
    pub profile: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct DefinesArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print definitions as CMake -D arguments
    #[arg(long, conflicts_with = "cmake_cache")]
    pub cmake_args: bool,

    /// Print definitions as a CMake initial-cache script
    #[arg(long)]
    pub cmake_cache: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ManifestArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct FingerprintArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print only the first 12 hex digits
    #[arg(long)]
    pub short: bool,
}

#[derive(Args)]
pub struct TogglesArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct SchemasArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_target_args() {
        let cli = Cli::try_parse_from([
            "lla-recipe",
            "resolve",
            "--os",
            "windows",
            "--arch",
            "x86",
            "-o",
            "LLA_BUILD_LIBUSB=true",
            "--dep-option",
            "boost:shared=True",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.target.platform.os.as_deref(), Some("windows"));
                assert_eq!(args.target.options, vec!["LLA_BUILD_LIBUSB=true"]);
                assert_eq!(args.target.dep_options, vec!["boost:shared=True"]);
                assert!(args.format.is_json());
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_cmake_flags_conflict() {
        let result = Cli::try_parse_from(["lla-recipe", "defines", "--cmake-args", "--cmake-cache"]);
        assert!(result.is_err());
    }
}
