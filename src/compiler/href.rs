//! compiler::href
//!
//! Builds the `href` of a relation.
//!
//! A mapping with a `route` key becomes a [`Route`]. Anything else (a
//! scalar, a sequence, a mapping without `route`) goes through the
//! expression checker as-is.
//!
//! ```yaml
//! href: object.getUrl()          # deferred expression
//! href:
//!   route: user_get
//!   parameters: { id: object.id }
//!   absolute: true
//! ```

use serde_json::{Map, Value};

use super::{field, CompileError};
use crate::core::expression::{Evaluable, ExpressionChecker};
use crate::core::metadata::{Href, Route};

/// Build an href from the raw `href` value, if present.
pub fn build(checker: &ExpressionChecker, value: Option<&Value>) -> Result<Option<Href>, CompileError> {
    let Some(value) = value else {
        return Ok(None);
    };

    if let Some(map) = value.as_object() {
        if let Some(route) = field(map, "route") {
            return Ok(Some(Href::Route(build_route(checker, map, route)?)));
        }
    }

    Ok(Some(Href::Value(checker.check(value)?)))
}

fn build_route(
    checker: &ExpressionChecker,
    map: &Map<String, Value>,
    route: &Value,
) -> Result<Route, CompileError> {
    let mut built = Route::new(checker.check(route)?);

    match field(map, "parameters") {
        Some(Value::Object(parameters)) => built.parameters = checker.check_map(parameters)?,
        Some(Value::Array(parameters)) => {
            for (index, value) in parameters.iter().enumerate() {
                built
                    .parameters
                    .insert(index.to_string(), checker.check(value)?);
            }
        }
        Some(_) => {
            return Err(CompileError::Malformed(
                "route 'parameters' must be a mapping".into(),
            ))
        }
        None => {}
    }

    built.absolute = match field(map, "absolute") {
        Some(Value::Bool(absolute)) => Evaluable::Literal(Value::Bool(*absolute)),
        Some(other) => checker.check(other)?,
        None => Evaluable::Literal(Value::Bool(false)),
    };

    built.generator = field(map, "generator").cloned();

    tracing::trace!(route = ?built.name, "compiled route href");
    Ok(built)
}
