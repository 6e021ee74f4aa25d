//! `lla-recipe resolve` command

use anyhow::Result;

use crate::cli::ResolveArgs;
use crate::commands::resolve_target;
use lla_recipe::Resolution;

pub fn execute(args: ResolveArgs) -> Result<()> {
    let resolution = resolve_target(&args.target)?;

    if args.format.is_json() {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        print_text(&resolution);
    }

    Ok(())
}

fn print_text(resolution: &Resolution) {
    println!("schema:      {}", resolution.schema);
    println!("version:     {}", resolution.version);
    println!("platform:    {}", resolution.platform);
    println!("fingerprint: {}", resolution.fingerprint);

    println!();
    println!("toggles:");
    for (name, value) in resolution.toggles.iter() {
        println!("  {} = {}", name, value);
    }
    for name in resolution.toggles.removed() {
        println!("  {} (not available on {})", name, resolution.toggles.os());
    }

    println!();
    println!("dependencies:");
    for dep in &resolution.dependencies {
        println!("  {}", dep);
    }

    println!();
    println!("definitions:");
    for (key, value) in resolution.definitions.iter() {
        println!("  {} = {}", key, value);
    }

    println!();
    println!("artifacts:");
    for artifact in resolution.manifest.iter() {
        println!("  {}", artifact);
    }
}
