//! `lla-recipe defines` command

use anyhow::Result;

use crate::cli::DefinesArgs;
use crate::commands::resolve_target;
use lla_recipe::ops::{cmake_args, cmake_cache_script};

pub fn execute(args: DefinesArgs) -> Result<()> {
    let resolution = resolve_target(&args.target)?;

    if args.cmake_args {
        println!("{}", cmake_args(&resolution).join(" "));
    } else if args.cmake_cache {
        print!("{}", cmake_cache_script(&resolution));
    } else if args.format.is_json() {
        println!("{}", serde_json::to_string_pretty(&resolution.definitions.entries())?);
    } else {
        for (key, value) in resolution.definitions.iter() {
            println!("{}={}", key, value);
        }
    }

    Ok(())
}
