//! compiler::exclusion
//!
//! Builds [`Exclusion`] rules from `exclusion` blocks.
//!
//! Keys: `groups`, `since_version`, `until_version`, `max_depth`,
//! `exclude_if`. Only `exclude_if` goes through the expression checker;
//! the others are coerced to their target types.

use serde_json::Value;

use super::{coerce_string, field, CompileError};
use crate::core::expression::ExpressionChecker;
use crate::core::metadata::Exclusion;

/// Build an exclusion from its block.
///
/// # Errors
///
/// `CompileError::Malformed` when the block is not a mapping or a field
/// cannot be coerced; `CompileError::Expression` when `exclude_if` fails
/// to compile.
pub fn build(checker: &ExpressionChecker, value: &Value) -> Result<Exclusion, CompileError> {
    let map = value
        .as_object()
        .ok_or_else(|| CompileError::Malformed("'exclusion' must be a mapping".into()))?;

    let groups = field(map, "groups").map(parse_groups).transpose()?;
    let since_version = field(map, "since_version")
        .map(|v| coerce_string(v, "since_version"))
        .transpose()?;
    let until_version = field(map, "until_version")
        .map(|v| coerce_string(v, "until_version"))
        .transpose()?;
    let max_depth = field(map, "max_depth").map(parse_max_depth).transpose()?;
    let exclude_if = match field(map, "exclude_if") {
        Some(v) => Some(checker.check_str(&coerce_string(v, "exclude_if")?)?),
        None => None,
    };

    Ok(Exclusion {
        groups,
        since_version,
        until_version,
        max_depth,
        exclude_if,
    })
}

/// A sequence of group names; a lone string is one group.
fn parse_groups(value: &Value) -> Result<Vec<String>, CompileError> {
    match value {
        Value::String(group) => Ok(vec![group.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    CompileError::Malformed("'groups' must contain only strings".into())
                })
            })
            .collect(),
        _ => Err(CompileError::Malformed(
            "'groups' must be a sequence of strings".into(),
        )),
    }
}

fn parse_max_depth(value: &Value) -> Result<i64, CompileError> {
    let invalid = || CompileError::Malformed("'max_depth' must be an integer".into());
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
