//! `lla-recipe manifest` command

use anyhow::Result;

use crate::cli::ManifestArgs;
use crate::commands::resolve_target;

pub fn execute(args: ManifestArgs) -> Result<()> {
    let resolution = resolve_target(&args.target)?;

    if args.format.is_json() {
        println!("{}", serde_json::to_string_pretty(&resolution.manifest)?);
    } else {
        for artifact in resolution.manifest.iter() {
            println!("{}", artifact);
        }
    }

    Ok(())
}
