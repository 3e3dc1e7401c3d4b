//! core
//!
//! Core domain types, schemas, and collaborators for relation metadata.
//!
//! # Modules
//!
//! - [`types`] - Strong types: TypeName, RelationName, ProviderRef
//! - [`expression`] - Literal-versus-expression discrimination
//! - [`metadata`] - Compiled metadata schema
//! - [`document`] - Relation documents and structural parsing
//! - [`config`] - Loader configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Absent configuration is `None`, never a sentinel value
//! - Expression compilation is pluggable and never hidden from callers

pub mod config;
pub mod document;
pub mod expression;
pub mod metadata;
pub mod types;
