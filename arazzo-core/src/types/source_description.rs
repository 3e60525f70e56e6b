use crate::types::Extensions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceDescriptionType {
    Openapi,
    Arazzo,
}

impl SourceDescriptionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Openapi => "openapi",
            Self::Arazzo => "arazzo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourceDescription {
    pub name: String,
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub source_type: Option<SourceDescriptionType>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl SourceDescription {
    /// Declared type, falling back to `openapi` when omitted.
    pub fn kind(&self) -> SourceDescriptionType {
        self.source_type.unwrap_or(SourceDescriptionType::Openapi)
    }
}
