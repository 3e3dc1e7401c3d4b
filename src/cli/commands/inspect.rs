//! inspect command - Print the compiled metadata of one type as JSON

use std::path::Path;

use anyhow::{Context as _, Result};

use super::{driver, read_document};
use crate::cli::args::FormatArg;
use crate::cli::Context;
use crate::core::types::TypeName;
use crate::driver::ClassRef;

/// Compile `type_name` from `file` and print it.
pub fn inspect(
    ctx: &Context,
    file: &Path,
    type_name: &str,
    definition: Option<&Path>,
    format: Option<FormatArg>,
    compact: bool,
) -> Result<()> {
    let name = TypeName::new(type_name)?;
    let document = read_document(ctx, file, format)?;

    let mut class = ClassRef::new(name);
    if let Some(path) = definition {
        class = class.with_definition(path);
    }

    let metadata = driver(ctx)
        .load(&class, &document)
        .with_context(|| format!("failed to load metadata for {type_name}"))?;

    let json = if compact {
        serde_json::to_string(&metadata)?
    } else {
        serde_json::to_string_pretty(&metadata)?
    };
    println!("{json}");
    Ok(())
}
