//! driver
//!
//! Loads the compiled [`ClassMetadata`] of a type from its relation document.
//!
//! # Lifecycle
//!
//! Parse → locate type entry → compile `relations` → resolve
//! `relation_providers` → return.
//!
//! Declared relations come first, in document order. Each provider's batch
//! follows, providers in document order, each batch contiguous and in the
//! order the provider returned it. Nothing is de-duplicated.
//!
//! A load either returns a complete `ClassMetadata` or an error; there is no
//! partial result.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use relmeta::core::document::{Document, DocumentFormat};
//! use relmeta::core::expression::ExpressionChecker;
//! use relmeta::core::types::TypeName;
//! use relmeta::driver::{ClassRef, MetadataDriver};
//! use relmeta::provider::NullProvider;
//!
//! let driver = MetadataDriver::new(ExpressionChecker::default(), Arc::new(NullProvider));
//! let doc = Document::from_str(
//!     "config/Post.yml",
//!     "Post:\n  relations:\n    - rel: self\n      href: { route: post_get, parameters: { id: object.id } }\n",
//!     DocumentFormat::Yaml,
//! );
//!
//! let class = ClassRef::new(TypeName::new("Post").unwrap());
//! let metadata = driver.load(&class, &doc).unwrap();
//! assert_eq!(metadata.relations().len(), 1);
//! assert_eq!(metadata.file_resources().len(), 1);
//! ```

mod errors;

pub use errors::DriverError;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::compiler::{field, CompileError, RelationCompiler};
use crate::core::config::Config;
use crate::core::document::Document;
use crate::core::expression::ExpressionChecker;
use crate::core::metadata::ClassMetadata;
use crate::core::types::{ProviderRef, TypeName};
use crate::provider::RelationProvider;

/// The type being loaded, plus where it is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRef {
    pub name: TypeName,
    /// Source location of the type itself, recorded as provenance.
    pub definition: Option<PathBuf>,
}

impl ClassRef {
    pub fn new(name: TypeName) -> Self {
        Self {
            name,
            definition: None,
        }
    }

    pub fn with_definition(mut self, path: impl Into<PathBuf>) -> Self {
        self.definition = Some(path.into());
        self
    }
}

/// Supplies a type's definition location (reflection collaborator).
pub trait TypeLocator: Send + Sync {
    fn definition_location(&self, type_name: &TypeName) -> Option<PathBuf>;
}

impl<F> TypeLocator for F
where
    F: Fn(&TypeName) -> Option<PathBuf> + Send + Sync,
{
    fn definition_location(&self, type_name: &TypeName) -> Option<PathBuf> {
        self(type_name)
    }
}

/// Compiles relation documents into class metadata.
///
/// Holds no per-load state; one driver can serve concurrent loads.
#[derive(Clone)]
pub struct MetadataDriver {
    compiler: RelationCompiler,
    provider: Arc<dyn RelationProvider>,
    locator: Option<Arc<dyn TypeLocator>>,
}

impl std::fmt::Debug for MetadataDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataDriver")
            .field("compiler", &self.compiler)
            .field("locator", &self.locator.is_some())
            .finish_non_exhaustive()
    }
}

impl MetadataDriver {
    pub fn new(checker: ExpressionChecker, provider: Arc<dyn RelationProvider>) -> Self {
        Self {
            compiler: RelationCompiler::new(checker),
            provider,
            locator: None,
        }
    }

    /// Build a driver using the default compiler and the configured syntax.
    pub fn from_config(config: &Config, provider: Arc<dyn RelationProvider>) -> Self {
        let checker = ExpressionChecker::default().with_syntax(config.expression_syntax());
        Self::new(checker, provider)
    }

    /// Attach a locator used by [`load_type`](Self::load_type) and
    /// [`load_all`](Self::load_all) to record definition locations.
    pub fn with_locator(mut self, locator: Arc<dyn TypeLocator>) -> Self {
        self.locator = Some(locator);
        self
    }

    /// Load metadata for `class` from `document`.
    ///
    /// # Errors
    ///
    /// - `DriverError::Parse` if the document is not valid in its format
    /// - `DriverError::MissingMetadata` if the document has no entry for
    ///   the type
    /// - `DriverError::MalformedRelation` / `MalformedDocument` for shape
    ///   errors
    /// - `DriverError::Expression` / `Provider` for collaborator failures
    pub fn load(&self, class: &ClassRef, document: &Document) -> Result<ClassMetadata, DriverError> {
        let tree = document.parse()?;
        self.load_tree(class, document.location(), &tree)
    }

    /// Load metadata for a type, asking the locator for its definition.
    pub fn load_type(
        &self,
        type_name: &TypeName,
        document: &Document,
    ) -> Result<ClassMetadata, DriverError> {
        let class = self.class_ref(type_name.clone());
        self.load(&class, document)
    }

    /// Load every type a document describes, in document order.
    pub fn load_all(&self, document: &Document) -> Result<Vec<ClassMetadata>, DriverError> {
        let tree = document.parse()?;
        described_in(&tree, document.location())?
            .into_iter()
            .map(|name| {
                let class = self.class_ref(name);
                self.load_tree(&class, document.location(), &tree)
            })
            .collect()
    }

    /// Type names described by a document, in document order.
    pub fn described_types(&self, document: &Document) -> Result<Vec<TypeName>, DriverError> {
        let tree = document.parse()?;
        described_in(&tree, document.location())
    }

    fn class_ref(&self, name: TypeName) -> ClassRef {
        let definition = self
            .locator
            .as_ref()
            .and_then(|locator| locator.definition_location(&name));
        ClassRef { name, definition }
    }

    fn load_tree(
        &self,
        class: &ClassRef,
        location: &Path,
        tree: &Value,
    ) -> Result<ClassMetadata, DriverError> {
        let type_name = &class.name;
        let malformed = |reason: &str| DriverError::MalformedDocument {
            type_name: type_name.clone(),
            document: location.to_path_buf(),
            reason: reason.to_string(),
        };

        let entry = tree
            .as_object()
            .and_then(|types| field(types, type_name.as_str()))
            .ok_or_else(|| DriverError::MissingMetadata {
                type_name: type_name.clone(),
                document: location.to_path_buf(),
            })?;
        let entry = entry
            .as_object()
            .ok_or_else(|| malformed("type entry must be a mapping"))?;

        let relations = sequence(entry, "relations")
            .ok_or_else(|| malformed("'relations' must be a sequence"))?;
        let providers = provider_refs(entry).map_err(|reason| malformed(&reason))?;

        let mut metadata = ClassMetadata::new(type_name.clone());
        metadata.add_file_resource(location);
        if let Some(definition) = &class.definition {
            metadata.add_file_resource(definition);
        }

        for (index, raw) in relations.iter().enumerate() {
            let relation = self.compiler.compile(raw).map_err(|e| match e {
                CompileError::Malformed(reason) => DriverError::MalformedRelation {
                    type_name: type_name.clone(),
                    document: location.to_path_buf(),
                    index,
                    reason,
                },
                CompileError::Expression(source) => DriverError::Expression {
                    type_name: type_name.clone(),
                    document: location.to_path_buf(),
                    source,
                },
            })?;
            debug!(type_name = %type_name, rel = %relation.name(), index, "compiled relation");
            metadata.add_relation(relation);
        }

        for reference in providers {
            let batch = self
                .provider
                .resolve(&reference, type_name)
                .map_err(|source| DriverError::Provider {
                    type_name: type_name.clone(),
                    document: location.to_path_buf(),
                    provider: reference.clone(),
                    source,
                })?;
            debug!(
                type_name = %type_name,
                provider = %reference,
                count = batch.len(),
                "resolved provider relations"
            );
            for relation in batch {
                metadata.add_relation(relation);
            }
        }

        info!(
            type_name = %type_name,
            document = %location.display(),
            relations = metadata.relations().len(),
            "loaded class metadata"
        );
        Ok(metadata)
    }
}

/// The sequence under `key`; absent or `null` is empty.
fn sequence<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    match field(map, key) {
        None => Some(&[][..]),
        Some(Value::Array(items)) => Some(items.as_slice()),
        Some(_) => None,
    }
}

fn provider_refs(entry: &Map<String, Value>) -> Result<Vec<ProviderRef>, String> {
    let items = sequence(entry, "relation_providers")
        .ok_or_else(|| "'relation_providers' must be a sequence".to_string())?;

    items
        .iter()
        .map(|item| {
            let name = item
                .as_str()
                .ok_or_else(|| "relation provider entries must be strings".to_string())?;
            ProviderRef::new(name).map_err(|e| e.to_string())
        })
        .collect()
}

fn described_in(tree: &Value, location: &Path) -> Result<Vec<TypeName>, DriverError> {
    let Some(types) = tree.as_object() else {
        return Ok(Vec::new());
    };

    types
        .keys()
        .map(|key| {
            TypeName::new(key.as_str()).map_err(|source| DriverError::InvalidType {
                document: location.to_path_buf(),
                source,
            })
        })
        .collect()
}
