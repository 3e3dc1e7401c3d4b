//! check command - Compile every type in a document and report

use std::path::Path;

use anyhow::Result;

use super::{driver, read_document};
use crate::cli::args::FormatArg;
use crate::cli::Context;
use crate::ui::output;

/// Compile all types described by `file`.
///
/// Fails on the first type that does not compile.
pub fn check(ctx: &Context, file: &Path, format: Option<FormatArg>) -> Result<()> {
    let document = read_document(ctx, file, format)?;
    let all = driver(ctx).load_all(&document)?;

    if all.is_empty() {
        output::warn(
            format!("'{}' describes no types", file.display()),
            ctx.verbosity,
        );
    }

    for metadata in &all {
        output::print(
            format!(
                "{}: {}",
                metadata.name(),
                output::plural(metadata.relations().len(), "relation", "relations")
            ),
            ctx.verbosity,
        );
    }

    output::print(
        format!(
            "OK: {} compiled",
            output::plural(all.len(), "type", "types")
        ),
        ctx.verbosity,
    );
    Ok(())
}
