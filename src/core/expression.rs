//! core::expression
//!
//! Literal-versus-expression discrimination for configuration values.
//!
//! # Overview
//!
//! Every string found in a relation document is a candidate for deferred
//! evaluation. The [`ExpressionChecker`] is the single place that decides
//! whether a raw value stays a literal or becomes a [`CompiledExpression`].
//! Downstream code only ever sees the resulting [`Evaluable`] and matches on
//! its tag.
//!
//! The compilation backend is injected through the [`ExpressionCompiler`]
//! trait. [`SourceCompiler`] is the default backend: it checks that the
//! source is lexically well formed and keeps it as the compiled form, which
//! is enough for a serializer that hands expressions to its own evaluator.
//!
//! # Example
//!
//! ```
//! use relmeta::core::expression::{Evaluable, ExpressionChecker};
//! use serde_json::json;
//!
//! let checker = ExpressionChecker::default();
//!
//! let deferred = checker.check(&json!("object.getId()")).unwrap();
//! assert!(deferred.is_expression());
//!
//! let literal = checker.check(&json!(42)).unwrap();
//! assert_eq!(literal, Evaluable::Literal(json!(42)));
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while compiling an expression source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("expression source is blank")]
    Blank,

    #[error("unbalanced '{delimiter}' at offset {offset} in expression '{expression}'")]
    Unbalanced {
        delimiter: char,
        offset: usize,
        expression: String,
    },

    #[error("unterminated string literal at offset {offset} in expression '{expression}'")]
    UnterminatedString { offset: usize, expression: String },

    /// A custom backend refused the source.
    #[error("expression '{expression}' rejected: {message}")]
    Rejected { expression: String, message: String },
}

/// A compiled, not yet evaluated, expression.
///
/// `source` is the text as written in the document; `compiled` is the
/// backend's compiled representation, which an evaluator consumes later
/// against a runtime context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledExpression {
    pub source: String,
    pub compiled: String,
}

impl CompiledExpression {
    pub fn new(source: impl Into<String>, compiled: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            compiled: compiled.into(),
        }
    }
}

/// A configuration value that is either known now or evaluated later.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Evaluable {
    /// A value resolved at load time.
    Literal(Value),
    /// A deferred expression.
    Expression(CompiledExpression),
}

impl Evaluable {
    /// Wrap a literal value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Evaluable::Literal(value.into())
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, Evaluable::Expression(_))
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Evaluable::Literal(value) => Some(value),
            Evaluable::Expression(_) => None,
        }
    }

    pub fn as_expression(&self) -> Option<&CompiledExpression> {
        match self {
            Evaluable::Literal(_) => None,
            Evaluable::Expression(expr) => Some(expr),
        }
    }
}

/// Which strings are compiled as expressions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionSyntax {
    /// Every string is an expression source.
    #[default]
    Bare,
    /// Only strings containing an `expr(<source>)` marker are expressions,
    /// compiled from the marked source; other strings stay literal.
    Wrapped,
}

impl ExpressionSyntax {
    /// All accepted names, for config validation and CLI help.
    pub const NAMES: [&'static str; 2] = ["bare", "wrapped"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bare" => Some(ExpressionSyntax::Bare),
            "wrapped" => Some(ExpressionSyntax::Wrapped),
            _ => None,
        }
    }
}

/// Compilation backend for expression sources.
///
/// Implementations must be thread-safe; loads for different types may run
/// in parallel against one shared compiler.
pub trait ExpressionCompiler: Send + Sync {
    /// Compile `source` into a deferred expression.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] when the source cannot be compiled.
    /// The driver propagates it unchanged.
    fn compile(&self, source: &str) -> Result<CompiledExpression, ExpressionError>;

    /// Short backend name used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Default backend: lexical validation, source kept as compiled form.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceCompiler;

impl ExpressionCompiler for SourceCompiler {
    fn compile(&self, source: &str) -> Result<CompiledExpression, ExpressionError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(ExpressionError::Blank);
        }
        check_delimiters(source)?;
        Ok(CompiledExpression::new(source, trimmed))
    }

    fn name(&self) -> &str {
        "source"
    }
}

/// Verify brackets are balanced and quoted strings are closed.
fn check_delimiters(source: &str) -> Result<(), ExpressionError> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut quote: Option<(char, usize)> = None;
    let mut escaped = false;

    for (offset, c) in source.char_indices() {
        if let Some((q, _)) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => quote = Some((c, offset)),
            '(' | '[' | '{' => stack.push((c, offset)),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match stack.pop() {
                    Some((open, _)) if open == expected => {}
                    _ => {
                        return Err(ExpressionError::Unbalanced {
                            delimiter: c,
                            offset,
                            expression: source.to_string(),
                        })
                    }
                }
            }
            _ => {}
        }
    }

    if let Some((_, offset)) = quote {
        return Err(ExpressionError::UnterminatedString {
            offset,
            expression: source.to_string(),
        });
    }

    if let Some((open, offset)) = stack.pop() {
        return Err(ExpressionError::Unbalanced {
            delimiter: open,
            offset,
            expression: source.to_string(),
        });
    }

    Ok(())
}

/// Decides literal versus deferred for raw configuration values.
///
/// Cheap to clone; the compiler is shared.
#[derive(Clone)]
pub struct ExpressionChecker {
    compiler: Arc<dyn ExpressionCompiler>,
    syntax: ExpressionSyntax,
}

impl std::fmt::Debug for ExpressionChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpressionChecker")
            .field("compiler", &self.compiler.name())
            .field("syntax", &self.syntax)
            .finish()
    }
}

impl Default for ExpressionChecker {
    fn default() -> Self {
        Self::new(Arc::new(SourceCompiler))
    }
}

impl ExpressionChecker {
    /// Create a checker over `compiler` using [`ExpressionSyntax::Bare`].
    pub fn new(compiler: Arc<dyn ExpressionCompiler>) -> Self {
        Self {
            compiler,
            syntax: ExpressionSyntax::Bare,
        }
    }

    /// Replace the string policy.
    pub fn with_syntax(mut self, syntax: ExpressionSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn syntax(&self) -> ExpressionSyntax {
        self.syntax
    }

    /// Check one raw value.
    ///
    /// Non-string values are returned unchanged as literals.
    ///
    /// # Errors
    ///
    /// Propagates the compiler's error for strings that are expression
    /// sources but fail to compile.
    pub fn check(&self, value: &Value) -> Result<Evaluable, ExpressionError> {
        match value {
            Value::String(s) => self.check_str(s),
            other => Ok(Evaluable::Literal(other.clone())),
        }
    }

    /// Check a string value.
    pub fn check_str(&self, source: &str) -> Result<Evaluable, ExpressionError> {
        match self.syntax {
            ExpressionSyntax::Bare => self.compiler.compile(source).map(Evaluable::Expression),
            ExpressionSyntax::Wrapped => match unwrap_expr(source) {
                Some(inner) => self.compiler.compile(inner).map(Evaluable::Expression),
                None => Ok(Evaluable::Literal(Value::String(source.to_string()))),
            },
        }
    }

    /// Check every value of a mapping, keeping key order.
    pub fn check_map(
        &self,
        map: &Map<String, Value>,
    ) -> Result<IndexMap<String, Evaluable>, ExpressionError> {
        map.iter()
            .map(|(key, value)| Ok((key.clone(), self.check(value)?)))
            .collect()
    }
}

/// Extract `<source>` from the first `expr(<source>)` marker in `s`.
///
/// The marker need not wrap the whole value: the source runs from the
/// first `expr(` to the last `)` on the same line, and must not be empty.
fn unwrap_expr(s: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(found) = s[from..].find("expr(") {
        let start = from + found + "expr(".len();
        let line_end = s[start..].find('\n').map_or(s.len(), |n| start + n);
        if let Some(close) = s[start..line_end].rfind(')') {
            if close > 0 {
                return Some(&s[start..start + close]);
            }
        }
        from = start;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_become_expressions() {
        let checker = ExpressionChecker::default();
        let result = checker.check(&json!("object.getId()")).unwrap();
        assert_eq!(
            result,
            Evaluable::Expression(CompiledExpression::new("object.getId()", "object.getId()"))
        );
    }

    #[test]
    fn non_strings_pass_through() {
        let checker = ExpressionChecker::default();
        for value in [
            json!(true),
            json!(3),
            json!(1.5),
            json!(null),
            json!(["a", "b"]),
            json!({"content": "x"}),
        ] {
            assert_eq!(checker.check(&value).unwrap(), Evaluable::Literal(value));
        }
    }

    #[test]
    fn check_map_keeps_order() {
        let checker = ExpressionChecker::default();
        let map = json!({"z": "a.b", "a": 1, "m": "c"});
        let checked = checker.check_map(map.as_object().unwrap()).unwrap();

        let keys: Vec<_> = checked.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert!(checked["z"].is_expression());
        assert_eq!(checked["a"], Evaluable::literal(1));
    }

    #[test]
    fn wrapped_syntax_only_compiles_marked_strings() {
        let checker = ExpressionChecker::default().with_syntax(ExpressionSyntax::Wrapped);

        let literal = checker.check(&json!("http://example.com")).unwrap();
        assert_eq!(literal, Evaluable::literal("http://example.com"));

        let expr = checker.check(&json!("expr(object.id)")).unwrap();
        assert_eq!(expr.as_expression().unwrap().source, "object.id");
    }

    #[test]
    fn wrapped_syntax_keeps_empty_marker_literal() {
        let checker = ExpressionChecker::default().with_syntax(ExpressionSyntax::Wrapped);
        assert_eq!(
            checker.check(&json!("expr()")).unwrap(),
            Evaluable::literal("expr()")
        );
    }

    #[test]
    fn wrapped_marker_may_appear_inside_a_string() {
        let checker = ExpressionChecker::default().with_syntax(ExpressionSyntax::Wrapped);

        let expr = checker.check(&json!("a ~ expr(b)")).unwrap();
        assert_eq!(expr.as_expression().unwrap().source, "b");

        let expr = checker.check(&json!("expr(f(x)) suffix")).unwrap();
        assert_eq!(expr.as_expression().unwrap().source, "f(x)");
    }

    #[test]
    fn wrapped_marker_stops_at_line_end() {
        let checker = ExpressionChecker::default().with_syntax(ExpressionSyntax::Wrapped);
        assert_eq!(
            checker.check(&json!("expr(a\nb)")).unwrap(),
            Evaluable::literal("expr(a\nb)")
        );

        let expr = checker.check(&json!("expr(\nexpr(c)")).unwrap();
        assert_eq!(expr.as_expression().unwrap().source, "c");
    }

    #[test]
    fn blank_source_rejected() {
        assert_eq!(SourceCompiler.compile("  "), Err(ExpressionError::Blank));
    }

    #[test]
    fn unbalanced_source_rejected() {
        let err = SourceCompiler.compile("foo(bar").unwrap_err();
        assert!(matches!(
            err,
            ExpressionError::Unbalanced {
                delimiter: '(',
                offset: 3,
                ..
            }
        ));

        let err = SourceCompiler.compile("a]").unwrap_err();
        assert!(matches!(
            err,
            ExpressionError::Unbalanced { delimiter: ']', .. }
        ));
    }

    #[test]
    fn brackets_inside_quotes_ignored() {
        assert!(SourceCompiler.compile("call('(' ~ \"]\")").is_ok());
        assert!(SourceCompiler.compile("'it\\'s'").is_ok());
    }

    #[test]
    fn unterminated_string_rejected() {
        let err = SourceCompiler.compile("name ~ 'abc").unwrap_err();
        assert!(matches!(
            err,
            ExpressionError::UnterminatedString { offset: 7, .. }
        ));
    }

    #[test]
    fn compiled_form_is_trimmed() {
        let expr = SourceCompiler.compile("  a.b  ").unwrap();
        assert_eq!(expr.source, "  a.b  ");
        assert_eq!(expr.compiled, "a.b");
    }

    #[test]
    fn custom_compiler_is_used() {
        struct Upper;
        impl ExpressionCompiler for Upper {
            fn compile(&self, source: &str) -> Result<CompiledExpression, ExpressionError> {
                Ok(CompiledExpression::new(source, source.to_uppercase()))
            }
        }

        let checker = ExpressionChecker::new(Arc::new(Upper));
        let result = checker.check(&json!("a.b")).unwrap();
        assert_eq!(result.as_expression().unwrap().compiled, "A.B");
        assert!(format!("{checker:?}").contains("custom"));
    }

    #[test]
    fn evaluable_serializes_with_kind_tag() {
        let json = serde_json::to_value(Evaluable::literal(false)).unwrap();
        assert_eq!(json, json!({"kind": "literal", "value": false}));

        let json = serde_json::to_value(Evaluable::Expression(CompiledExpression::new("a", "a")))
            .unwrap();
        assert_eq!(
            json,
            json!({"kind": "expression", "value": {"source": "a", "compiled": "a"}})
        );
    }
}
