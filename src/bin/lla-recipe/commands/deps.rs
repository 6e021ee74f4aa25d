//! `lla-recipe deps` command

use anyhow::Result;

use crate::cli::DepsArgs;
use crate::commands::resolve_target;
use lla_recipe::ops::option_lines;

pub fn execute(args: DepsArgs) -> Result<()> {
    let resolution = resolve_target(&args.target)?;

    if args.format.is_json() {
        println!("{}", serde_json::to_string_pretty(&resolution.dependencies)?);
        return Ok(());
    }

    if args.profile {
        for line in option_lines(&resolution) {
            println!("{}", line);
        }
        return Ok(());
    }

    for dep in &resolution.dependencies {
        println!("{}", dep);
    }

    Ok(())
}
