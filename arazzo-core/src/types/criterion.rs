use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{Extensions, RuntimeExpression};

/// Expression language of a criterion.
///
/// Unrecognised names decode into [`CriterionKind::Other`] so the validator can
/// report them instead of failing the whole decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CriterionKind {
    Simple,
    Regex,
    Jsonpath,
    Xpath,
    Other(String),
}

impl CriterionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Simple => "simple",
            Self::Regex => "regex",
            Self::Jsonpath => "jsonpath",
            Self::Xpath => "xpath",
            Self::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for CriterionKind {
    fn from(s: &str) -> Self {
        match s {
            "simple" => Self::Simple,
            "regex" => Self::Regex,
            "jsonpath" => Self::Jsonpath,
            "xpath" => Self::Xpath,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CriterionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CriterionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

/// Object form of a criterion type: `{ type: jsonpath, version: ... }`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CriterionExpressionType {
    pub r#type: CriterionKind,
    pub version: String,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CriterionType {
    Known(CriterionKind),
    Expression(CriterionExpressionType),
}

static DEFAULT_KIND: CriterionKind = CriterionKind::Simple;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Criterion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<RuntimeExpression>,

    pub condition: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<CriterionType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl Criterion {
    /// The effective kind; `simple` when no type is given.
    pub fn kind(&self) -> &CriterionKind {
        match &self.r#type {
            None => &DEFAULT_KIND,
            Some(CriterionType::Known(kind)) => kind,
            Some(CriterionType::Expression(expr)) => &expr.r#type,
        }
    }
}
