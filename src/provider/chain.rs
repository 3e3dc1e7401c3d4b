//! provider::chain
//!
//! Combines several relation providers behind one reference namespace.
//!
//! Each inner provider is asked in order. Batches from every provider that
//! knows the reference are concatenated; providers answering
//! [`ProviderError::UnknownProvider`] are skipped. Any other error aborts.

use std::sync::Arc;

use super::traits::{ProviderError, RelationProvider};
use crate::core::metadata::Relation;
use crate::core::types::{ProviderRef, TypeName};

/// Ordered list of providers.
#[derive(Clone, Default)]
pub struct ChainProvider {
    providers: Vec<Arc<dyn RelationProvider>>,
}

impl std::fmt::Debug for ChainProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainProvider")
            .field("providers", &self.providers.len())
            .finish()
    }
}

impl ChainProvider {
    pub fn new(providers: Vec<Arc<dyn RelationProvider>>) -> Self {
        Self { providers }
    }

    /// Append a provider to the end of the chain.
    pub fn push(&mut self, provider: Arc<dyn RelationProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl RelationProvider for ChainProvider {
    fn resolve(
        &self,
        reference: &ProviderRef,
        type_name: &TypeName,
    ) -> Result<Vec<Relation>, ProviderError> {
        let mut relations = Vec::new();
        let mut known = false;

        for provider in &self.providers {
            match provider.resolve(reference, type_name) {
                Ok(batch) => {
                    known = true;
                    relations.extend(batch);
                }
                Err(ProviderError::UnknownProvider(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        if known {
            Ok(relations)
        } else {
            Err(ProviderError::UnknownProvider(reference.to_string()))
        }
    }
}
