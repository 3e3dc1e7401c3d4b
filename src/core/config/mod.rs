//! core::config
//!
//! Loader configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order:
//! 1. An explicit path (e.g. `--config`), which must exist
//! 2. `$RELMETA_CONFIG` if set and the file exists
//!
//! When neither yields a file, defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use relmeta::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("syntax: {:?}", config.expression_syntax());
//! println!("fallback format: {}", config.default_format());
//! ```

pub mod schema;

pub use schema::LoaderConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::document::DocumentFormat;
use crate::core::expression::ExpressionSyntax;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "RELMETA_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (defaults when no file was found)
    pub loader: LoaderConfig,
    /// Path to the loaded config file (if any)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path cannot be read, or if a config
    /// file exists but cannot be parsed or holds invalid values.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var(CONFIG_ENV)
                .ok()
                .map(PathBuf::from)
                .filter(|p| p.exists()),
        };

        let Some(path) = path else {
            return Ok(Config::default());
        };

        let loader = Self::read_loader_config(&path)?;
        loader.validate()?;

        Ok(Config {
            loader,
            path: Some(path),
        })
    }

    /// Read and parse a config file.
    fn read_loader_config(path: &Path) -> Result<LoaderConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Get the expression syntax.
    ///
    /// Defaults to [`ExpressionSyntax::Bare`] if not configured.
    pub fn expression_syntax(&self) -> ExpressionSyntax {
        self.loader
            .expression_syntax
            .as_deref()
            .and_then(ExpressionSyntax::from_name)
            .unwrap_or_default()
    }

    /// Get the fallback document format.
    ///
    /// Defaults to YAML if not configured.
    pub fn default_format(&self) -> DocumentFormat {
        self.loader
            .default_format
            .as_deref()
            .and_then(DocumentFormat::from_name)
            .unwrap_or_default()
    }

    /// Get the path the configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
