use crate::types::{Components, Extensions, SourceDescription, Workflow};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArazzoDocument {
    /// The Arazzo Specification version (e.g. "1.0.1").
    pub arazzo: String,

    pub info: Info,

    #[serde(default, rename = "sourceDescriptions")]
    pub source_descriptions: Vec<SourceDescription>,

    pub workflows: Vec<Workflow>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl ArazzoDocument {
    /// First workflow with the given id.
    pub fn workflow(&self, workflow_id: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.workflow_id == workflow_id)
    }

    pub fn source_description(&self, name: &str) -> Option<&SourceDescription> {
        self.source_descriptions.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Info {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Version of the described workflows, not of the Arazzo format.
    pub version: String,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}
