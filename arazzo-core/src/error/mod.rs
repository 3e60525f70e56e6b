use std::fmt;

use thiserror::Error;

use crate::parser::DocumentFormat;

#[derive(Debug, Error)]
pub enum ArazzoError {
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported document format {tag:?} (expected json or yaml)")]
pub struct UnsupportedFormatError {
    pub tag: String,
}

#[derive(Debug, Error)]
pub enum DecodeCause {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// A document that could not be decoded at all.
///
/// `line` and `column` are 1-based; `offset` is a byte offset into the input.
#[derive(Debug)]
pub struct DecodeError {
    pub format: DocumentFormat,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub offset: Option<usize>,
    pub cause: DecodeCause,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse as {}", self.format)?;
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, " at line {line} column {column}")?;
        }
        write!(f, ": {}", self.cause)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to encode as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A single broken `reference`. The message leaves out [`ReferenceError::location`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("unresolved reference {path:?}: {reason}")]
    Unresolved {
        path: String,
        location: String,
        reason: String,
    },
    #[error("reference {path:?} resolves to {target:?}, which is itself a reference")]
    Chained {
        path: String,
        location: String,
        target: String,
    },
}

impl ReferenceError {
    pub fn path(&self) -> &str {
        match self {
            Self::Unresolved { path, .. } | Self::Chained { path, .. } => path,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Self::Unresolved { location, .. } | Self::Chained { location, .. } => location,
        }
    }
}

#[derive(Debug, Error)]
#[error("arazzo document has {} broken reference(s)", .errors.len())]
pub struct ResolutionError {
    pub errors: Vec<ReferenceError>,
}

#[derive(Debug, Error)]
#[error("arazzo document failed validation ({} violations)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    /// Missing or malformed required data.
    Structure,
    Uniqueness,
    /// A `dependsOn`, goto or call target, or component reference that does not resolve.
    Reference,
    Cycle,
    CallTarget,
    Action,
    Criterion,
    Expression,
    Extension,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
