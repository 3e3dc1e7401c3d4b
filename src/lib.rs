//! relmeta - Loader for declarative hypermedia relation metadata
//!
//! relmeta reads a relation document describing the links and embedded
//! resources of a data type and compiles it into a [`ClassMetadata`] that a
//! serialization layer can consume. Strings in the document are compiled
//! into deferred expressions; structured `href` and `embedded` blocks become
//! routes and embedded descriptors; relation providers contribute extra
//! relations at load time.
//!
//! # Architecture
//!
//! Data flows strictly downward:
//!
//! - [`driver`] - Parses a document and assembles one type's metadata
//! - [`compiler`] - Compiles relation sub-documents (href, embedded, exclusion)
//! - [`provider`] - External relation providers
//! - [`core`] - Strong types, expression checking, metadata schema, documents, config
//! - [`cli`] - Command-line inspector
//! - [`ui`] - Output utilities
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use relmeta::core::document::{Document, DocumentFormat};
//! use relmeta::core::expression::ExpressionChecker;
//! use relmeta::core::types::TypeName;
//! use relmeta::driver::MetadataDriver;
//! use relmeta::provider::StaticProvider;
//!
//! let driver = MetadataDriver::new(ExpressionChecker::default(), Arc::new(StaticProvider::new()));
//! let doc = Document::from_str(
//!     "Post.json",
//!     r#"{"Post": {"relations": [{"rel": "self", "href": "object.url"}]}}"#,
//!     DocumentFormat::Json,
//! );
//! let metadata = driver.load_type(&TypeName::new("Post").unwrap(), &doc).unwrap();
//! assert_eq!(metadata.relations()[0].name().as_str(), "self");
//! ```
//!
//! [`ClassMetadata`]: crate::core::metadata::ClassMetadata

pub mod cli;
pub mod compiler;
pub mod core;
pub mod driver;
pub mod provider;
pub mod ui;
