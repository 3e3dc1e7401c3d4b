//! provider
//!
//! Relation providers: external sources of additional relations.
//!
//! # Modules
//!
//! - `traits`: Core [`RelationProvider`] trait, errors and [`NullProvider`]
//! - `registry`: [`StaticProvider`], fixed batches by reference name
//! - `chain`: [`ChainProvider`], several providers in order
//!
//! Closures with the signature
//! `Fn(&ProviderRef, &TypeName) -> Result<Vec<Relation>, ProviderError>`
//! are providers too.
//!
//! [`ProviderRef`]: crate::core::types::ProviderRef
//! [`TypeName`]: crate::core::types::TypeName
//! [`Relation`]: crate::core::metadata::Relation

mod chain;
mod registry;
mod traits;

pub use chain::ChainProvider;
pub use registry::{ProviderCall, StaticProvider};
pub use traits::*;
