//! types command - List the types a document describes

use std::path::Path;

use anyhow::Result;

use super::{driver, read_document};
use crate::cli::args::FormatArg;
use crate::cli::Context;
use crate::ui::output;

/// Print one type name per line.
pub fn types(ctx: &Context, file: &Path, format: Option<FormatArg>) -> Result<()> {
    let document = read_document(ctx, file, format)?;
    let names = driver(ctx).described_types(&document)?;
    if !names.is_empty() {
        println!("{}", output::format_list(&names, ""));
    }
    Ok(())
}
