//! core::metadata
//!
//! Compiled relation metadata.
//!
//! # Modules
//!
//! - [`schema`] - Metadata types: class metadata, relations, routes,
//!   embedded descriptors and exclusion rules
//!
//! # Lifecycle
//!
//! A [`ClassMetadata`] is created once per load call. Relations are only
//! appended while loading; afterwards the value is handed to the caller and
//! treated as immutable. Each [`Relation`] is immutable once built.

pub mod schema;

// Re-export commonly used types
pub use schema::{
    ClassMetadata, Embedded, EmbeddedValue, Exclusion, Href, Relation, RelationBuilder, Route,
};
