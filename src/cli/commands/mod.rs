//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Reads the document named on the command line
//! 2. Calls the driver
//! 3. Formats and displays output
//!
//! Documents may list relation providers; the CLI has no provider backend,
//! so those contribute nothing here.

mod check;
mod inspect;
mod types;

pub use check::check;
pub use inspect::inspect;
pub use types::types;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use super::args::{Command, FormatArg};
use super::Context;
use crate::core::document::Document;
use crate::driver::MetadataDriver;
use crate::provider::NullProvider;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Inspect {
            file,
            type_name,
            definition,
            format,
            compact,
        } => inspect(
            ctx,
            &file,
            &type_name,
            definition.as_deref(),
            format,
            compact,
        ),
        Command::Check { file, format } => check(ctx, &file, format),
        Command::Types { file, format } => types(ctx, &file, format),
    }
}

/// Read a document, honoring an explicit format over detection.
fn read_document(ctx: &Context, path: &Path, format: Option<FormatArg>) -> Result<Document> {
    let document = Document::read(path, ctx.config.default_format())
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    Ok(match format {
        Some(format) => document.with_format(format.into()),
        None => document,
    })
}

fn driver(ctx: &Context) -> MetadataDriver {
    MetadataDriver::from_config(&ctx.config, Arc::new(NullProvider))
}
