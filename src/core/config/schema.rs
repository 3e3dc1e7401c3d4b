//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing so that a typo in a policy
//! name is reported against the config file rather than silently falling
//! back to a default.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::document::DocumentFormat;
use crate::core::expression::ExpressionSyntax;

/// Loader configuration.
///
/// # Example
///
/// ```toml
/// expression_syntax = "wrapped"
/// default_format = "yaml"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Which strings become expressions ("bare" or "wrapped")
    pub expression_syntax: Option<String>,

    /// Format for documents whose extension is not recognized
    pub default_format: Option<String>,
}

impl LoaderConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(syntax) = &self.expression_syntax {
            if ExpressionSyntax::from_name(syntax).is_none() {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid expression_syntax '{}', must be one of: {}",
                    syntax,
                    ExpressionSyntax::NAMES.join(", ")
                )));
            }
        }

        if let Some(format) = &self.default_format {
            if DocumentFormat::from_name(format).is_none() {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid default_format '{}', must be one of: {}",
                    format,
                    DocumentFormat::NAMES.join(", ")
                )));
            }
        }

        Ok(())
    }
}
