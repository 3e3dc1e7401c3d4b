//! core::document
//!
//! Relation documents and their structural parsing.
//!
//! # Formats
//!
//! A document is a mapping from fully qualified type name to that type's
//! relation block. It can be written as YAML, JSON or TOML; all three parse
//! into the same `serde_json::Value` tree with key order preserved.
//!
//! # Example
//!
//! ```
//! use relmeta::core::document::{Document, DocumentFormat};
//!
//! let doc = Document::from_str(
//!     "config/User.yml",
//!     "User:\n  relations:\n    - rel: self\n      href: /users\n",
//!     DocumentFormat::Yaml,
//! );
//! let tree = doc.parse().unwrap();
//! assert!(tree["User"]["relations"].is_array());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors from reading or parsing a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {format} document '{path}': {message}")]
    ParseError {
        path: PathBuf,
        format: DocumentFormat,
        message: String,
    },
}

/// Structural format of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    /// All accepted names, for config validation and CLI help.
    pub const NAMES: [&'static str; 3] = ["yaml", "json", "toml"];

    /// Detect a format from a file extension (case-insensitive).
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yml" | "yaml" => Some(DocumentFormat::Yaml),
            "json" => Some(DocumentFormat::Json),
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "json" => Some(DocumentFormat::Json),
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Json => "json",
            DocumentFormat::Toml => "toml",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text of one relation document plus where it came from.
#[derive(Debug, Clone)]
pub struct Document {
    location: PathBuf,
    contents: String,
    format: DocumentFormat,
}

impl Document {
    /// Wrap text already in memory. `location` is recorded as provenance.
    pub fn from_str(
        location: impl Into<PathBuf>,
        contents: impl Into<String>,
        format: DocumentFormat,
    ) -> Self {
        Self {
            location: location.into(),
            contents: contents.into(),
            format,
        }
    }

    /// Read a single document from disk.
    ///
    /// The format comes from the extension; `fallback` is used when the
    /// extension is not recognized.
    pub fn read(path: &Path, fallback: DocumentFormat) -> Result<Self, DocumentError> {
        let contents = fs::read_to_string(path).map_err(|e| DocumentError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let format = DocumentFormat::from_extension(path).unwrap_or(fallback);
        Ok(Self::from_str(path, contents, format))
    }

    /// Override the detected format.
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Parse the text into a value tree.
    ///
    /// An empty YAML document yields `Value::Null`. YAML merge keys
    /// (`<<: *anchor`) are applied before conversion.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::ParseError` with the parser's message when
    /// the text is not valid in the document's format.
    pub fn parse(&self) -> Result<Value, DocumentError> {
        let parsed = match self.format {
            DocumentFormat::Yaml => parse_yaml(&self.contents).map_err(|e| e.to_string()),
            DocumentFormat::Json => {
                serde_json::from_str::<Value>(&self.contents).map_err(|e| e.to_string())
            }
            DocumentFormat::Toml => {
                toml::from_str::<Value>(&self.contents).map_err(|e| e.to_string())
            }
        };

        parsed.map_err(|message| DocumentError::ParseError {
            path: self.location.clone(),
            format: self.format,
            message,
        })
    }
}

fn parse_yaml(contents: &str) -> Result<Value, serde_yaml::Error> {
    let mut tree: serde_yaml::Value = serde_yaml::from_str(contents)?;
    tree.apply_merge()?;
    serde_yaml::from_value(tree)
}
