//! Kinds command implementation.

use super::{CommandContext, Result};
use crate::output::{format_counts_json, format_counts_table};

/// Executes the kinds command.
///
/// Kinds listed explicitly in the file but used by no item show a count of 0.
///
/// # Errors
///
/// Returns an error if the listing cannot be loaded.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let listing = ctx.load_listing()?;
    let counts = listing.kind_counts();

    if ctx.json_output {
        println!("{}", format_counts_json("kinds", &counts)?);
    } else if !ctx.quiet {
        print!("{}", format_counts_table("Kind", &counts, ctx.use_colors));
    }

    Ok(())
}
