//! Packages command implementation.
//!
//! Lists the packages of the listing with their item counts.

use super::{CommandContext, Result};
use crate::output::{format_counts_json, format_counts_table};

/// Executes the packages command.
///
/// # Errors
///
/// Returns an error if the listing cannot be loaded.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let listing = ctx.load_listing()?;
    let counts = listing.package_counts();

    if ctx.json_output {
        println!("{}", format_counts_json("packages", &counts)?);
    } else if !ctx.quiet {
        print!("{}", format_counts_table("Package", &counts, ctx.use_colors));
    }

    Ok(())
}
