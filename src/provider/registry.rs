//! provider::registry
//!
//! In-memory relation provider keyed by reference name.
//!
//! # Design
//!
//! `StaticProvider` holds pre-built relation batches and hands out clones.
//! Every resolution is recorded so tests can verify which references were
//! asked for, and for which type.
//!
//! # Example
//!
//! ```
//! use relmeta::core::metadata::Relation;
//! use relmeta::core::types::{ProviderRef, RelationName, TypeName};
//! use relmeta::provider::{RelationProvider, StaticProvider};
//!
//! let provider = StaticProvider::new().with(
//!     "paginator",
//!     vec![
//!         Relation::builder(RelationName::new("first").unwrap()).build(),
//!         Relation::builder(RelationName::new("last").unwrap()).build(),
//!     ],
//! );
//!
//! let ty = TypeName::new("Acme\\Users").unwrap();
//! let batch = provider.resolve(&ProviderRef::new("paginator").unwrap(), &ty).unwrap();
//! assert_eq!(batch.len(), 2);
//! assert_eq!(provider.calls().len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{ProviderError, RelationProvider};
use crate::core::metadata::Relation;
use crate::core::types::{ProviderRef, TypeName};

/// Provider serving fixed batches by reference name.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    inner: Arc<Mutex<StaticProviderInner>>,
}

#[derive(Debug, Default)]
struct StaticProviderInner {
    batches: HashMap<String, Vec<Relation>>,
    calls: Vec<ProviderCall>,
}

/// One recorded resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCall {
    pub reference: ProviderRef,
    pub type_name: TypeName,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a batch under `reference`, replacing any earlier one.
    pub fn with(self, reference: impl Into<String>, relations: Vec<Relation>) -> Self {
        self.register(reference, relations);
        self
    }

    /// Register a batch under `reference`, replacing any earlier one.
    pub fn register(&self, reference: impl Into<String>, relations: Vec<Relation>) {
        self.lock().batches.insert(reference.into(), relations);
    }

    /// Resolutions performed so far, in order.
    ///
    /// The log grows with every resolution until [`clear_calls`](Self::clear_calls).
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.lock().calls.clone()
    }

    /// Forget recorded resolutions; registered batches are kept.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StaticProviderInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RelationProvider for StaticProvider {
    fn resolve(
        &self,
        reference: &ProviderRef,
        type_name: &TypeName,
    ) -> Result<Vec<Relation>, ProviderError> {
        let mut inner = self.lock();
        inner.calls.push(ProviderCall {
            reference: reference.clone(),
            type_name: type_name.clone(),
        });
        inner
            .batches
            .get(reference.as_str())
            .cloned()
            .ok_or_else(|| ProviderError::UnknownProvider(reference.to_string()))
    }
}
