use std::fmt;
use std::str::FromStr;

use super::runtime::{validate_name, RuntimeExprError};

/// A `components` map that references may point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentSection {
    Inputs,
    Parameters,
    SuccessActions,
    FailureActions,
}

impl ComponentSection {
    pub const ALL: [ComponentSection; 4] = [
        Self::Inputs,
        Self::Parameters,
        Self::SuccessActions,
        Self::FailureActions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inputs => "inputs",
            Self::Parameters => "parameters",
            Self::SuccessActions => "successActions",
            Self::FailureActions => "failureActions",
        }
    }
}

impl fmt::Display for ComponentSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentSection {
    type Err = RuntimeExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| RuntimeExprError::UnknownComponentSection(s.to_string()))
    }
}

/// `$components.<section>.<name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    pub section: ComponentSection,
    pub name: String,
}

impl ComponentRef {
    /// Parse a full reference string, including the `$components.` prefix.
    pub fn parse(reference: &str) -> Result<Self, RuntimeExprError> {
        let rest = reference
            .trim()
            .strip_prefix("$components.")
            .ok_or(RuntimeExprError::NotAComponentReference)?;
        Self::from_path(rest)
    }

    /// Parse the part after `$components.`.
    pub(crate) fn from_path(path: &str) -> Result<Self, RuntimeExprError> {
        let (section, name) = path.split_once('.').ok_or(RuntimeExprError::EmptyName)?;
        let section = section.parse::<ComponentSection>()?;
        validate_name(name)?;
        Ok(Self {
            section,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$components.{}.{}", self.section, self.name)
    }
}
