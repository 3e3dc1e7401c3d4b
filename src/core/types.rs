//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`TypeName`] - Fully qualified name of a described data type
//! - [`RelationName`] - Name of a hypermedia relation (`self`, `next`, ...)
//! - [`ProviderRef`] - Reference to an external relation provider
//!
//! # Validation
//!
//! These types enforce validity at construction time. A relation without
//! a name, or metadata for an unnamed type, cannot be represented.
//!
//! # Examples
//!
//! ```
//! use relmeta::core::types::{RelationName, TypeName};
//!
//! let ty = TypeName::new("App\\Entity\\User").unwrap();
//! let rel = RelationName::new("self").unwrap();
//! assert_eq!(ty.as_str(), "App\\Entity\\User");
//! assert_eq!(rel.as_str(), "self");
//!
//! assert!(TypeName::new("").is_err());
//! assert!(RelationName::new("").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid type name: {0}")]
    InvalidTypeName(String),

    #[error("invalid relation name: {0}")]
    InvalidRelationName(String),

    #[error("invalid provider reference: {0}")]
    InvalidProviderRef(String),
}

/// A validated, fully qualified type name.
///
/// Namespace separators are not interpreted: `App\Entity\User`,
/// `app::entity::User` and `app.entity.User` are all accepted as-is.
///
/// Rules:
/// - Cannot be empty
/// - Cannot contain whitespace or ASCII control characters
///
/// # Example
///
/// ```
/// use relmeta::core::types::TypeName;
///
/// assert!(TypeName::new("Acme\\Post").is_ok());
/// assert!(TypeName::new("acme::Post").is_ok());
/// assert!(TypeName::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeName(String);

impl TypeName {
    /// Create a new validated type name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTypeName` if the name is empty or contains
    /// whitespace or control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidTypeName(
                "type name cannot be empty".into(),
            ));
        }

        if name.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidTypeName(format!(
                "type name '{name}' cannot contain whitespace"
            )));
        }

        if name.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidTypeName(
                "type name cannot contain control characters".into(),
            ));
        }

        Ok(())
    }

    /// Get the type name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TypeName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.0
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated relation name.
///
/// Relation names are free-form (`self`, `next`, `http://rels.example/x`)
/// but must be non-empty and printable.
///
/// # Example
///
/// ```
/// use relmeta::core::types::RelationName;
///
/// let rel = RelationName::new("manager").unwrap();
/// assert_eq!(rel.to_string(), "manager");
/// assert!(RelationName::new("\u{7}").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelationName(String);

impl RelationName {
    /// Create a new validated relation name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRelationName` if the name is empty or
    /// contains control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidRelationName(
                "relation name cannot be empty".into(),
            ));
        }
        if name.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidRelationName(
                "relation name cannot contain control characters".into(),
            ));
        }
        Ok(Self(name))
    }

    /// Get the relation name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RelationName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RelationName> for String {
    fn from(name: RelationName) -> Self {
        name.0
    }
}

impl std::fmt::Display for RelationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a relation provider, as written under `relation_providers`.
///
/// The reference is opaque here; only a [`crate::provider::RelationProvider`]
/// knows how to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderRef(String);

impl ProviderRef {
    /// Create a new provider reference.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidProviderRef` if the reference is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TypeError::InvalidProviderRef(
                "provider reference cannot be blank".into(),
            ));
        }
        Ok(Self(name))
    }

    /// Get the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProviderRef {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderRef> for String {
    fn from(name: ProviderRef) -> Self {
        name.0
    }
}

impl std::fmt::Display for ProviderRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
