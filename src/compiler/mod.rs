//! compiler
//!
//! Compiles loosely typed relation sub-documents into [`Relation`] records.
//!
//! # Modules
//!
//! - [`href`] - `href` values: raw value/expression or [`Route`](crate::core::metadata::Route)
//! - [`embedded`] - `embedded` values: raw value/expression or [`Embedded`](crate::core::metadata::Embedded)
//! - [`exclusion`] - `exclusion` blocks
//!
//! # Presence
//!
//! A key whose value is `null` counts as absent everywhere. `href: ~` means
//! "no href", exactly like leaving the key out.
//!
//! # Example
//!
//! ```
//! use relmeta::compiler::RelationCompiler;
//! use relmeta::core::expression::ExpressionChecker;
//! use serde_json::json;
//!
//! let compiler = RelationCompiler::new(ExpressionChecker::default());
//! let relation = compiler
//!     .compile(&json!({"rel": "self", "href": "object.getUrl()"}))
//!     .unwrap();
//!
//! assert_eq!(relation.name().as_str(), "self");
//! assert!(relation.href().is_some());
//! assert!(relation.embedded().is_none());
//! ```

pub mod embedded;
pub mod exclusion;
pub mod href;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::expression::{Evaluable, ExpressionChecker, ExpressionError};
use crate::core::metadata::Relation;
use crate::core::types::RelationName;

/// Errors from compiling one relation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A required key is missing or a value has an unusable shape.
    #[error("{0}")]
    Malformed(String),

    #[error(transparent)]
    Expression(#[from] ExpressionError),
}

/// Compiles relation sub-documents.
#[derive(Debug, Clone, Default)]
pub struct RelationCompiler {
    checker: ExpressionChecker,
}

impl RelationCompiler {
    pub fn new(checker: ExpressionChecker) -> Self {
        Self { checker }
    }

    pub fn checker(&self) -> &ExpressionChecker {
        &self.checker
    }

    /// Compile one relation sub-document.
    ///
    /// # Errors
    ///
    /// - `CompileError::Malformed` when `rel` is missing or unusable, or a
    ///   nested block has the wrong shape
    /// - `CompileError::Expression` when an expression fails to compile
    pub fn compile(&self, value: &Value) -> Result<Relation, CompileError> {
        let map = value
            .as_object()
            .ok_or_else(|| CompileError::Malformed("relation must be a mapping".into()))?;

        let rel = field(map, "rel")
            .ok_or_else(|| CompileError::Malformed("missing required key 'rel'".into()))?;
        let rel = coerce_string(rel, "rel")?;
        let name = RelationName::new(rel).map_err(|e| CompileError::Malformed(e.to_string()))?;

        let href = href::build(&self.checker, field(map, "href"))?;
        let embedded = embedded::build(&self.checker, field(map, "embedded"))?;
        let exclusion = field(map, "exclusion")
            .map(|value| exclusion::build(&self.checker, value))
            .transpose()?;

        let mut builder = Relation::builder(name)
            .maybe_href(href)
            .maybe_embedded(embedded)
            .maybe_exclusion(exclusion);

        // Attributes are carried as literals, never expression-checked.
        if let Some(attributes) = field(map, "attributes") {
            let attributes = attributes.as_object().ok_or_else(|| {
                CompileError::Malformed("'attributes' must be a mapping".into())
            })?;
            for (key, value) in attributes {
                builder = builder.attribute(key.clone(), Evaluable::Literal(value.clone()));
            }
        }

        Ok(builder.build())
    }
}

/// Look up a key, treating `null` as absent.
pub(crate) fn field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

/// Coerce a scalar to its string form.
pub(crate) fn coerce_string(value: &Value, key: &str) -> Result<String, CompileError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(CompileError::Malformed(format!(
            "'{key}' must be a scalar"
        ))),
    }
}
