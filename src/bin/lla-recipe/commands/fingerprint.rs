//! `lla-recipe fingerprint` command

use anyhow::Result;

use crate::cli::FingerprintArgs;
use crate::commands::resolve_target;

pub fn execute(args: FingerprintArgs) -> Result<()> {
    let resolution = resolve_target(&args.target)?;

    if args.short {
        println!("{}", resolution.fingerprint.short());
    } else {
        println!("{}", resolution.fingerprint);
    }

    Ok(())
}
