use crate::error::EncodeError;
use crate::parser::DocumentFormat;
use crate::types::ArazzoDocument;

/// Encode a document back to text.
///
/// References are written in their source form and extension bags are merged
/// alongside the known fields. `Auto` encodes as YAML.
pub fn encode_document(doc: &ArazzoDocument, format: DocumentFormat) -> Result<String, EncodeError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::to_string_pretty(doc)?),
        DocumentFormat::Yaml | DocumentFormat::Auto => Ok(serde_yaml::to_string(doc)?),
    }
}
