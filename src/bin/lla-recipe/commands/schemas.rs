//! `lla-recipe schemas` command

use anyhow::Result;

use crate::cli::SchemasArgs;
use lla_recipe::SchemaVersion;

pub fn execute(args: SchemasArgs) -> Result<()> {
    if args.format.is_json() {
        let schemas: Vec<_> = SchemaVersion::ALL
            .iter()
            .map(|s| {
                let table = s.rules();
                serde_json::json!({
                    "version": s.as_str(),
                    "latest": *s == SchemaVersion::LATEST,
                    "toggles": table.toggles.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&schemas)?);
        return Ok(());
    }

    for s in SchemaVersion::ALL {
        let marker = if s == SchemaVersion::LATEST { " (latest)" } else { "" };
        let table = s.rules();
        println!(
            "{}{}: {} toggles, {} requirement rules",
            s,
            marker,
            table.toggles.len(),
            table.requirements.len()
        );
    }

    Ok(())
}
