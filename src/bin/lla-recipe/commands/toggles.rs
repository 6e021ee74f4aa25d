//! `lla-recipe toggles` command

use anyhow::Result;

use crate::cli::TogglesArgs;
use crate::commands::{load_merged_config, select_platform};

pub fn execute(args: TogglesArgs) -> Result<()> {
    let config = load_merged_config()?;
    let (schema, platform) = select_platform(&args.platform, &config)?;
    let os = platform.os();
    let table = schema.rules();

    if args.format.is_json() {
        let toggles: Vec<_> = table
            .toggles
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "default": t.default_for(os),
                    "available": t.applies_to(os),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&toggles)?);
        return Ok(());
    }

    println!("Toggles of schema {} on {}:", schema, os);
    for t in &table.toggles {
        if t.applies_to(os) {
            println!("  {:<22} default {:<5}  {}", t.name, t.default_for(os), t.description);
        } else {
            println!("  {:<22} (not available on {})", t.name, os);
        }
    }

    Ok(())
}
