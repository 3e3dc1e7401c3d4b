//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this loader config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::document::DocumentFormat;

/// relmeta - Compile and inspect hypermedia relation metadata
#[derive(Parser, Debug)]
#[command(name = "relmeta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Loader config file (defaults to $RELMETA_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Document format override.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Yaml,
    Json,
    Toml,
}

impl From<FormatArg> for DocumentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => DocumentFormat::Yaml,
            FormatArg::Json => DocumentFormat::Json,
            FormatArg::Toml => DocumentFormat::Toml,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile one type's metadata and print it as JSON
    #[command(after_help = "\
EXAMPLES:
    # Show the compiled relations of a type
    relmeta inspect config/User.yml --type 'App\\Entity\\User'

    # Record the type's source file as provenance
    relmeta inspect config/User.yml --type 'App\\Entity\\User' --definition src/Entity/User.php")]
    Inspect {
        /// Relation document to read
        file: PathBuf,

        /// Fully qualified type name to load
        #[arg(long = "type", value_name = "TYPE")]
        type_name: String,

        /// Source file defining the type
        #[arg(long, value_name = "PATH")]
        definition: Option<PathBuf>,

        /// Document format (detected from the extension by default)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Compile every type in a document and report errors
    Check {
        /// Relation document to read
        file: PathBuf,

        /// Document format (detected from the extension by default)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// List the types a document describes
    Types {
        /// Relation document to read
        file: PathBuf,

        /// Document format (detected from the extension by default)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
}
