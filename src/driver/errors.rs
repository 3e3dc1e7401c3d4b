//! driver::errors
//!
//! Error types for metadata loading.
//!
//! # Design
//!
//! Every variant names the type being loaded and the document it was
//! loaded from, so a misconfigured document can be found from the message
//! alone. Errors from collaborators (document parser, expression compiler,
//! relation provider) are kept as the `source` rather than re-worded.
//!
//! # Example
//!
//! ```
//! use relmeta::core::types::TypeName;
//! use relmeta::driver::DriverError;
//!
//! let err = DriverError::MissingMetadata {
//!     type_name: TypeName::new("Acme\\User").unwrap(),
//!     document: "config/User.yml".into(),
//! };
//! assert!(err.to_string().contains("Acme\\User"));
//! assert!(err.to_string().contains("config/User.yml"));
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::core::document::DocumentError;
use crate::core::expression::ExpressionError;
use crate::core::types::{ProviderRef, TypeError, TypeName};
use crate::provider::ProviderError;

/// Errors from loading class metadata.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The document does not describe the requested type.
    #[error("expected metadata for type {type_name} to be defined in '{document}'")]
    MissingMetadata {
        type_name: TypeName,
        document: PathBuf,
    },

    /// A relation (or its structured embedded block) lacks a required key
    /// or holds a value of the wrong shape.
    #[error("malformed relation #{index} for type {type_name} in '{document}': {reason}")]
    MalformedRelation {
        type_name: TypeName,
        document: PathBuf,
        index: usize,
        reason: String,
    },

    /// The type entry itself, or its `relations`/`relation_providers`
    /// lists, has the wrong shape.
    #[error("malformed metadata for type {type_name} in '{document}': {reason}")]
    MalformedDocument {
        type_name: TypeName,
        document: PathBuf,
        reason: String,
    },

    /// The document could not be read or is not valid in its format.
    #[error(transparent)]
    Parse(#[from] DocumentError),

    #[error("invalid expression in metadata for type {type_name} in '{document}': {source}")]
    Expression {
        type_name: TypeName,
        document: PathBuf,
        source: ExpressionError,
    },

    #[error("relation provider '{provider}' failed for type {type_name} in '{document}': {source}")]
    Provider {
        type_name: TypeName,
        document: PathBuf,
        provider: ProviderRef,
        source: ProviderError,
    },

    /// A top-level key is not a usable type name.
    #[error("invalid type entry in '{document}': {source}")]
    InvalidType {
        document: PathBuf,
        source: TypeError,
    },
}

impl DriverError {
    /// The type the failed load was for, when known.
    pub fn type_name(&self) -> Option<&TypeName> {
        match self {
            DriverError::MissingMetadata { type_name, .. }
            | DriverError::MalformedRelation { type_name, .. }
            | DriverError::MalformedDocument { type_name, .. }
            | DriverError::Expression { type_name, .. }
            | DriverError::Provider { type_name, .. } => Some(type_name),
            DriverError::Parse(_) | DriverError::InvalidType { .. } => None,
        }
    }
}
