//! core::metadata::schema
//!
//! Compiled relation metadata types.
//!
//! # Shape
//!
//! - [`ClassMetadata`] owns the ordered [`Relation`] records of one type
//!   plus the files it was derived from.
//! - A [`Relation`] has an optional [`Href`], an optional [`EmbeddedValue`],
//!   attributes, and an optional [`Exclusion`].
//! - [`Route`] and [`Embedded`] only exist when the document used the
//!   structured form (`route` under `href`, `content` under `embedded`).
//!
//! All types serialize for inspection; none of them deserialize, since the
//! only way in is the compiler.
//!
//! # Example
//!
//! ```
//! use relmeta::core::expression::Evaluable;
//! use relmeta::core::metadata::schema::{ClassMetadata, Href, Relation};
//! use relmeta::core::types::{RelationName, TypeName};
//!
//! let mut meta = ClassMetadata::new(TypeName::new("Acme\\User").unwrap());
//! let rel = Relation::builder(RelationName::new("self").unwrap())
//!     .href(Href::Value(Evaluable::literal("/users/1")))
//!     .build();
//! meta.add_relation(rel);
//!
//! assert_eq!(meta.relations().len(), 1);
//! assert_eq!(meta.relations()[0].name().as_str(), "self");
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::core::expression::Evaluable;
use crate::core::types::{RelationName, TypeName};

/// Compiled metadata for one type.
///
/// Relation names are not unique: duplicates are kept in the order they
/// were added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetadata {
    name: TypeName,
    relations: Vec<Relation>,
    file_resources: Vec<PathBuf>,
}

impl ClassMetadata {
    pub fn new(name: TypeName) -> Self {
        Self {
            name,
            relations: Vec::new(),
            file_resources: Vec::new(),
        }
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Files this metadata was derived from, in recording order.
    ///
    /// Recorded for cache invalidation by the caller; never read here.
    pub fn file_resources(&self) -> &[PathBuf] {
        &self.file_resources
    }

    /// Append a relation after all existing ones.
    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    /// Record a source file. A path already recorded is ignored.
    pub fn add_file_resource(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if !self.file_resources.iter().any(|p| p == path) {
            self.file_resources.push(path.to_path_buf());
        }
    }

    /// Relations with the given name, in order.
    pub fn relations_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Relation> {
        self.relations
            .iter()
            .filter(move |r| r.name().as_str() == name)
    }
}

/// A named link or embedded resource attached to a type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relation {
    name: RelationName,
    href: Option<Href>,
    embedded: Option<EmbeddedValue>,
    attributes: IndexMap<String, Evaluable>,
    exclusion: Option<Exclusion>,
}

impl Relation {
    /// Start building a relation. Use this for relations assembled outside
    /// the compiler, e.g. by a relation provider.
    pub fn builder(name: RelationName) -> RelationBuilder {
        RelationBuilder::new(name)
    }

    pub fn name(&self) -> &RelationName {
        &self.name
    }

    pub fn href(&self) -> Option<&Href> {
        self.href.as_ref()
    }

    pub fn embedded(&self) -> Option<&EmbeddedValue> {
        self.embedded.as_ref()
    }

    pub fn attributes(&self) -> &IndexMap<String, Evaluable> {
        &self.attributes
    }

    pub fn exclusion(&self) -> Option<&Exclusion> {
        self.exclusion.as_ref()
    }
}

/// Builder for [`Relation`].
#[derive(Debug)]
pub struct RelationBuilder {
    name: RelationName,
    href: Option<Href>,
    embedded: Option<EmbeddedValue>,
    attributes: IndexMap<String, Evaluable>,
    exclusion: Option<Exclusion>,
}

impl RelationBuilder {
    pub fn new(name: RelationName) -> Self {
        Self {
            name,
            href: None,
            embedded: None,
            attributes: IndexMap::new(),
            exclusion: None,
        }
    }

    pub fn href(mut self, href: Href) -> Self {
        self.href = Some(href);
        self
    }

    pub fn maybe_href(mut self, href: Option<Href>) -> Self {
        self.href = href;
        self
    }

    pub fn embedded(mut self, embedded: EmbeddedValue) -> Self {
        self.embedded = Some(embedded);
        self
    }

    pub fn maybe_embedded(mut self, embedded: Option<EmbeddedValue>) -> Self {
        self.embedded = embedded;
        self
    }

    /// Add one attribute. A repeated key replaces the earlier value.
    pub fn attribute(mut self, key: impl Into<String>, value: Evaluable) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn attributes(mut self, attributes: IndexMap<String, Evaluable>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn exclusion(mut self, exclusion: Exclusion) -> Self {
        self.exclusion = Some(exclusion);
        self
    }

    pub fn maybe_exclusion(mut self, exclusion: Option<Exclusion>) -> Self {
        self.exclusion = exclusion;
        self
    }

    pub fn build(self) -> Relation {
        Relation {
            name: self.name,
            href: self.href,
            embedded: self.embedded,
            attributes: self.attributes,
            exclusion: self.exclusion,
        }
    }
}

/// Link target of a relation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Href {
    /// A literal URL or a deferred expression.
    Value(Evaluable),
    /// A named route to be generated later.
    Route(Route),
}

impl Href {
    pub fn as_route(&self) -> Option<&Route> {
        match self {
            Href::Route(route) => Some(route),
            Href::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Evaluable> {
        match self {
            Href::Value(value) => Some(value),
            Href::Route(_) => None,
        }
    }
}

/// A reference to a named URL-generation rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub name: Evaluable,
    pub parameters: IndexMap<String, Evaluable>,
    /// Literal boolean, or an expression expected to yield one.
    pub absolute: Evaluable,
    /// Passed through as written.
    pub generator: Option<Value>,
}

impl Route {
    /// A route with no parameters, relative, default generator.
    pub fn new(name: Evaluable) -> Self {
        Self {
            name,
            parameters: IndexMap::new(),
            absolute: Evaluable::Literal(Value::Bool(false)),
            generator: None,
        }
    }
}

/// Embedded content of a relation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EmbeddedValue {
    /// Unstructured: a literal or a deferred expression.
    Value(Evaluable),
    /// Structured with `content` and optional extras.
    Embedded(Embedded),
}

impl EmbeddedValue {
    pub fn as_embedded(&self) -> Option<&Embedded> {
        match self {
            EmbeddedValue::Embedded(embedded) => Some(embedded),
            EmbeddedValue::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Evaluable> {
        match self {
            EmbeddedValue::Value(value) => Some(value),
            EmbeddedValue::Embedded(_) => None,
        }
    }
}

/// Structured embedded descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embedded {
    pub content: Evaluable,
    pub xml_element_name: Option<Evaluable>,
    pub exclusion: Option<Exclusion>,
}

/// Rules deciding when a relation is left out of serialized output.
///
/// Every field is independent. `None` means "no constraint of that kind".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Exclusion {
    pub groups: Option<Vec<String>>,
    pub since_version: Option<String>,
    pub until_version: Option<String>,
    pub max_depth: Option<i64>,
    pub exclude_if: Option<Evaluable>,
}

impl Exclusion {
    /// True when no field constrains anything.
    pub fn is_unconstrained(&self) -> bool {
        self == &Exclusion::default()
    }
}
