//! lla-recipe CLI - Build configuration resolver for liblogicalaccess

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use lla_recipe::util::diagnostic;
use lla_recipe::ResolveError;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ResolveError>() {
            Some(resolve_error) => diagnostic::emit(&resolve_error.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("lla_recipe=debug")
    } else {
        EnvFilter::new("lla_recipe=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Deps(args) => commands::deps::execute(args),
        Commands::Defines(args) => commands::defines::execute(args),
        Commands::Manifest(args) => commands::manifest::execute(args),
        Commands::Fingerprint(args) => commands::fingerprint::execute(args),
        Commands::Toggles(args) => commands::toggles::execute(args),
        Commands::Schemas(args) => commands::schemas::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
