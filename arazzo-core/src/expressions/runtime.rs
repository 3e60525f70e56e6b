use std::sync::LazyLock;

use regex::Regex;

use super::component_ref::ComponentRef;
use super::json_pointer::{JsonPointer, JsonPointerError};

static TCHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[!#$%&'*+\-.^_`|~0-9A-Za-z]+$").expect("valid regex"));

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\.\-_]+$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeExpr {
    Url,
    Method,
    StatusCode,
    Request(Source),
    Response(Source),
    Named(NamedRoot, NamePath),
    Component(ComponentRef),
}

/// Roots followed by a dotted name path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedRoot {
    Inputs,
    Outputs,
    Steps,
    Workflows,
    SourceDescriptions,
}

const NAMED_ROOTS: [(&str, NamedRoot); 5] = [
    ("inputs", NamedRoot::Inputs),
    ("outputs", NamedRoot::Outputs),
    ("steps", NamedRoot::Steps),
    ("workflows", NamedRoot::Workflows),
    ("sourceDescriptions", NamedRoot::SourceDescriptions),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Header(String),
    Query(String),
    Path(String),
    Body { pointer: Option<JsonPointer> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePath {
    pub root: String,
    pub rest: Vec<String>,
    pub pointer: Option<JsonPointer>,
}

impl RuntimeExpr {
    /// The name path when the expression is rooted at `root`.
    pub fn named(&self, root: NamedRoot) -> Option<&NamePath> {
        match self {
            Self::Named(r, path) if *r == root => Some(path),
            _ => None,
        }
    }
}

pub fn parse_runtime_expr(input: &str) -> Result<RuntimeExpr, RuntimeExprError> {
    let body = input
        .trim()
        .strip_prefix('$')
        .ok_or(RuntimeExprError::MissingDollarPrefix)?;

    let (head, mut pointer) = match body.split_once('#') {
        Some((head, fragment)) => (head, Some(JsonPointer::parse(fragment)?)),
        None => (body, None),
    };

    let expr = match head.split_once('.') {
        None => match head {
            "url" => RuntimeExpr::Url,
            "method" => RuntimeExpr::Method,
            "statusCode" => RuntimeExpr::StatusCode,
            other => return Err(RuntimeExprError::UnknownExpression(other.to_string())),
        },
        Some(("request", rest)) => RuntimeExpr::Request(parse_source(rest, &mut pointer)?),
        Some(("response", rest)) => RuntimeExpr::Response(parse_source(rest, &mut pointer)?),
        Some(("components", rest)) => RuntimeExpr::Component(ComponentRef::from_path(rest)?),
        Some((root, rest)) => {
            let (_, named) = NAMED_ROOTS
                .iter()
                .find(|(name, _)| *name == root)
                .ok_or_else(|| RuntimeExprError::UnknownExpression(head.to_string()))?;
            RuntimeExpr::Named(*named, parse_name_path(rest, pointer.take())?)
        }
    };

    // Whatever did not consume the pointer does not accept one.
    if pointer.is_some() {
        return Err(RuntimeExprError::PointerNotAllowed);
    }
    Ok(expr)
}

fn parse_source(rest: &str, pointer: &mut Option<JsonPointer>) -> Result<Source, RuntimeExprError> {
    if rest == "body" {
        return Ok(Source::Body {
            pointer: pointer.take(),
        });
    }

    let (kind, name) = rest
        .split_once('.')
        .ok_or_else(|| RuntimeExprError::InvalidSource(rest.to_string()))?;
    match kind {
        "header" => {
            if name.is_empty() {
                return Err(RuntimeExprError::EmptyName);
            }
            if !TCHAR_RE.is_match(name) {
                return Err(RuntimeExprError::InvalidHeaderToken(name.to_string()));
            }
            Ok(Source::Header(name.to_string()))
        }
        "query" => validate_name(name).map(|()| Source::Query(name.to_string())),
        "path" => validate_name(name).map(|()| Source::Path(name.to_string())),
        _ => Err(RuntimeExprError::InvalidSource(rest.to_string())),
    }
}

fn parse_name_path(rest: &str, pointer: Option<JsonPointer>) -> Result<NamePath, RuntimeExprError> {
    let mut parts = rest.split('.');
    let root = parts.next().unwrap_or_default();
    validate_name(root)?;

    let rest = parts
        .map(|p| validate_name(p).map(|()| p.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NamePath {
        root: root.to_string(),
        rest,
        pointer,
    })
}

pub(crate) fn validate_name(name: &str) -> Result<(), RuntimeExprError> {
    if name.is_empty() {
        return Err(RuntimeExprError::EmptyName);
    }
    if !NAME_RE.is_match(name) {
        return Err(RuntimeExprError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeExprError {
    #[error("runtime expression must start with '$'")]
    MissingDollarPrefix,
    #[error("unknown runtime expression: {0}")]
    UnknownExpression(String),
    #[error("invalid source reference: {0}")]
    InvalidSource(String),
    #[error("name segment must not be empty")]
    EmptyName,
    #[error("invalid name segment: {0}")]
    InvalidName(String),
    #[error("invalid header token: {0}")]
    InvalidHeaderToken(String),
    #[error("invalid json pointer: {0}")]
    InvalidJsonPointer(#[from] JsonPointerError),
    #[error("json pointer is not allowed on this runtime expression")]
    PointerNotAllowed,
    #[error("unknown components section: {0} (expected inputs, parameters, successActions, or failureActions)")]
    UnknownComponentSection(String),
    #[error("reference must start with '$components.'")]
    NotAComponentReference,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expressions::ComponentSection;

    #[test]
    fn parses_body_pointer() {
        let expr = parse_runtime_expr("$response.body#/items/0").unwrap();
        let RuntimeExpr::Response(Source::Body { pointer: Some(p) }) = &expr else {
            panic!("unexpected {expr:?}");
        };
        assert_eq!(p.as_str(), "/items/0");
    }

    #[test]
    fn parses_named_paths() {
        let expr = parse_runtime_expr("$steps.login.outputs.token").unwrap();
        let path = expr.named(NamedRoot::Steps).unwrap();
        assert_eq!(path.root, "login");
        assert_eq!(path.rest, vec!["outputs", "token"]);
    }

    #[test]
    fn parses_component_references() {
        let expr = parse_runtime_expr("$components.successActions.done").unwrap();
        assert_eq!(
            expr,
            RuntimeExpr::Component(ComponentRef {
                section: ComponentSection::SuccessActions,
                name: "done".into(),
            })
        );
        assert!(matches!(
            parse_runtime_expr("$components.schemas.x"),
            Err(RuntimeExprError::UnknownComponentSection(_))
        ));
    }

    #[test]
    fn rejects_pointer_on_scalars() {
        assert_eq!(
            parse_runtime_expr("$statusCode#/a"),
            Err(RuntimeExprError::PointerNotAllowed)
        );
        assert_eq!(
            parse_runtime_expr("$request.header.X-Id#/a"),
            Err(RuntimeExprError::PointerNotAllowed)
        );
    }

    #[test]
    fn rejects_empty_segments() {
        assert_eq!(
            parse_runtime_expr("$inputs..bad"),
            Err(RuntimeExprError::EmptyName)
        );
        assert!(parse_runtime_expr("inputs.x").is_err());
    }
}
