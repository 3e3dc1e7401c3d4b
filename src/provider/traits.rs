//! provider::traits
//!
//! Relation provider trait definition.
//!
//! # Design
//!
//! A document may list `relation_providers`: named, externally resolved
//! sources of additional relations. The driver hands each reference, along
//! with the type being loaded, to a [`RelationProvider`] and appends the
//! returned batch as-is.
//!
//! Providers are synchronous. Anything they do to produce relations
//! (service lookups, reflection, I/O) is opaque to the driver; callers that
//! need timeouts must impose them inside the provider.
//!
//! # Example
//!
//! ```
//! use relmeta::core::metadata::Relation;
//! use relmeta::core::types::{ProviderRef, RelationName, TypeName};
//! use relmeta::provider::{ProviderError, RelationProvider};
//!
//! let provider = |reference: &ProviderRef, _ty: &TypeName| -> Result<Vec<Relation>, ProviderError> {
//!     match reference.as_str() {
//!         "paginator" => Ok(vec![Relation::builder(RelationName::new("next")?).build()]),
//!         other => Err(ProviderError::UnknownProvider(other.to_string())),
//!     }
//! };
//!
//! let ty = TypeName::new("Acme\\PostCollection").unwrap();
//! let batch = provider.resolve(&ProviderRef::new("paginator").unwrap(), &ty).unwrap();
//! assert_eq!(batch.len(), 1);
//! ```

use thiserror::Error;

use crate::core::metadata::Relation;
use crate::core::types::{ProviderRef, TypeError, TypeName};

/// Errors from relation providers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// No provider answers to the reference.
    #[error("unknown relation provider '{0}'")]
    UnknownProvider(String),

    /// The provider was found but could not produce relations.
    #[error("relation provider '{provider}' failed for {type_name}: {message}")]
    Failed {
        provider: String,
        type_name: String,
        message: String,
    },

    /// The provider built a relation with an invalid name.
    #[error("relation provider produced an invalid relation: {0}")]
    InvalidRelation(#[from] TypeError),
}

/// Resolves a provider reference into relations for a type.
///
/// Implementations must be thread-safe (Send + Sync): independent loads may
/// share one provider.
pub trait RelationProvider: Send + Sync {
    /// Produce the relations `reference` contributes to `type_name`.
    ///
    /// The returned order is preserved by the driver.
    fn resolve(
        &self,
        reference: &ProviderRef,
        type_name: &TypeName,
    ) -> Result<Vec<Relation>, ProviderError>;
}

impl<F> RelationProvider for F
where
    F: Fn(&ProviderRef, &TypeName) -> Result<Vec<Relation>, ProviderError> + Send + Sync,
{
    fn resolve(
        &self,
        reference: &ProviderRef,
        type_name: &TypeName,
    ) -> Result<Vec<Relation>, ProviderError> {
        self(reference, type_name)
    }
}

/// A provider that contributes nothing.
///
/// Used where no provider backend is wired up, such as the command-line
/// inspector.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProvider;

impl RelationProvider for NullProvider {
    fn resolve(
        &self,
        reference: &ProviderRef,
        type_name: &TypeName,
    ) -> Result<Vec<Relation>, ProviderError> {
        tracing::debug!(
            provider = %reference,
            type_name = %type_name,
            "no provider backend, contributing no relations"
        );
        Ok(Vec::new())
    }
}
