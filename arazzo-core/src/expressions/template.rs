use super::runtime::{parse_runtime_expr, RuntimeExprError};
use crate::types::AnyValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Expr(String),
}

/// A string with embedded `{$...}` runtime expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    pub fn expressions(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Expr(e) => Some(e.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

/// Split a string into literal text and embedded expressions.
///
/// A `{` only opens an expression when the next non-blank character is `$`, so
/// JSON text inside payload strings is left alone. Braces do not nest.
pub fn parse_template(input: &str) -> Result<Template, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = input;

    while let Some(open) = rest.find('{') {
        literal.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        if !after_open.trim_start().starts_with('$') {
            literal.push('{');
            rest = after_open;
            continue;
        }

        let close = after_open
            .find('}')
            .ok_or(TemplateError::UnclosedExpression)?;
        let expr = after_open[..close].trim();
        parse_runtime_expr(expr)?;

        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Expr(expr.to_string()));
        rest = &after_open[close + 1..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(Template { segments })
}

/// Check every expression-looking string inside a literal value.
///
/// A string starting with `$` must be a whole runtime expression; any other
/// string may embed `{$...}` expressions.
pub fn validate_value_expressions(value: &AnyValue) -> Result<(), TemplateError> {
    match value {
        AnyValue::Null | AnyValue::Bool(_) | AnyValue::Number(_) => Ok(()),
        AnyValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('$') {
                parse_runtime_expr(trimmed)?;
            } else {
                parse_template(s)?;
            }
            Ok(())
        }
        AnyValue::Array(items) => items.iter().try_for_each(validate_value_expressions),
        AnyValue::Object(map) => map.values().try_for_each(validate_value_expressions),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("invalid runtime expression: {0}")]
    InvalidRuntimeExpr(#[from] RuntimeExprError),
    #[error("unclosed embedded expression (missing '}}')")]
    UnclosedExpression,
}
