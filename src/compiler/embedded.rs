//! compiler::embedded
//!
//! Builds the `embedded` value of a relation.
//!
//! The raw value is checked first. If the checked result is a mapping it is
//! read as a structured descriptor (`content` required, `xmlElementName` and
//! `exclusion` optional); otherwise the checked value is kept unwrapped.

use serde_json::Value;

use super::{coerce_string, exclusion, field, CompileError};
use crate::core::expression::{Evaluable, ExpressionChecker};
use crate::core::metadata::{Embedded, EmbeddedValue};

/// Build an embedded value from the raw `embedded` value, if present.
///
/// # Errors
///
/// `CompileError::Malformed` when a structured descriptor lacks `content`.
pub fn build(
    checker: &ExpressionChecker,
    value: Option<&Value>,
) -> Result<Option<EmbeddedValue>, CompileError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let map = match checker.check(value)? {
        Evaluable::Literal(Value::Object(map)) => map,
        other => return Ok(Some(EmbeddedValue::Value(other))),
    };

    let content = field(&map, "content").ok_or_else(|| {
        CompileError::Malformed("structured 'embedded' requires a 'content' key".into())
    })?;
    let content = checker.check(content)?;

    let xml_element_name = match field(&map, "xmlElementName") {
        Some(name) => Some(checker.check_str(&coerce_string(name, "xmlElementName")?)?),
        None => None,
    };

    let exclusion = field(&map, "exclusion")
        .map(|value| exclusion::build(checker, value))
        .transpose()?;

    Ok(Some(EmbeddedValue::Embedded(Embedded {
        content,
        xml_element_name,
        exclusion,
    })))
}
