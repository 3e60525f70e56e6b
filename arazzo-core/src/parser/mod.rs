mod encode;
mod location;

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use crate::error::{DecodeCause, DecodeError, UnsupportedFormatError};
use crate::types::ArazzoDocument;

pub use encode::encode_document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Json,
    Yaml,
    /// Sniff the content: JSON when it opens with `{` or `[`, YAML otherwise.
    Auto,
}

impl DocumentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Yaml => f.write_str("YAML"),
            Self::Auto => f.write_str("JSON or YAML"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = UnsupportedFormatError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "auto" => Ok(Self::Auto),
            other => Err(UnsupportedFormatError {
                tag: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub document: ArazzoDocument,
    /// The concrete format the document decoded from (never `Auto`).
    pub format: DocumentFormat,
}

/// Decode a document from raw bytes in the declared format.
///
/// Decoding aborts on the first error; nothing is resolved or validated here.
pub fn decode_document(input: &[u8], format: DocumentFormat) -> Result<ArazzoDocument, DecodeError> {
    parse_document(input, format).map(|parsed| parsed.document)
}

/// Read the whole stream, then decode it.
pub fn decode_reader<R: Read>(mut reader: R, format: DocumentFormat) -> Result<ArazzoDocument, DecodeError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(|e| DecodeError {
        format,
        line: None,
        column: None,
        offset: None,
        cause: DecodeCause::Io(e),
    })?;
    decode_document(&buf, format)
}

pub fn parse_document_str(input: &str, format: DocumentFormat) -> Result<ParsedDocument, DecodeError> {
    parse_document(input.as_bytes(), format)
}

/// Decode raw bytes, keeping track of which format actually succeeded.
pub fn parse_document(input: &[u8], format: DocumentFormat) -> Result<ParsedDocument, DecodeError> {
    match format {
        DocumentFormat::Json => decode_json(input).map(|document| ParsedDocument { document, format }),
        DocumentFormat::Yaml => decode_yaml(input).map(|document| ParsedDocument { document, format }),
        DocumentFormat::Auto => decode_auto(input),
    }
}

fn decode_json(input: &[u8]) -> Result<ArazzoDocument, DecodeError> {
    serde_json::from_slice::<ArazzoDocument>(input).map_err(|e| {
        let (line, column) = (e.line(), e.column());
        // serde_json reports 0 for both when the error has no position (e.g. I/O).
        let positioned = line > 0;
        DecodeError {
            format: DocumentFormat::Json,
            line: positioned.then_some(line),
            column: positioned.then_some(column),
            offset: positioned.then(|| location::byte_offset(input, line, column)),
            cause: DecodeCause::Json(e),
        }
    })
}

/// YAML allows non-string mapping keys (`200: ok`) where the JSON data model
/// needs strings. When the typed decode fails, scalar keys are turned into
/// strings and the decode is retried.
fn decode_yaml(input: &[u8]) -> Result<ArazzoDocument, DecodeError> {
    let typed_err = match serde_yaml::from_slice::<ArazzoDocument>(input) {
        Ok(doc) => return Ok(doc),
        Err(e) => e,
    };
    let mut value: serde_yaml::Value = serde_yaml::from_slice(input).map_err(yaml_error)?;
    if !stringify_keys(&mut value) {
        return Err(yaml_error(typed_err));
    }
    // A value carries no positions, so this error has no location.
    serde_yaml::from_value::<ArazzoDocument>(value).map_err(yaml_error)
}

fn yaml_error(e: serde_yaml::Error) -> DecodeError {
    let loc = e.location();
    DecodeError {
        format: DocumentFormat::Yaml,
        line: loc.as_ref().map(|l| l.line()),
        column: loc.as_ref().map(|l| l.column()),
        offset: loc.as_ref().map(|l| l.index()),
        cause: DecodeCause::Yaml(e),
    }
}

/// Rewrite number, bool and null mapping keys as strings, recursively.
/// Returns whether any key changed.
fn stringify_keys(value: &mut serde_yaml::Value) -> bool {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => {
            let mut changed = false;
            for (key, mut child) in std::mem::take(map) {
                changed |= stringify_keys(&mut child);
                let key = match key {
                    Value::Number(n) => Value::String(n.to_string()),
                    Value::Bool(b) => Value::String(b.to_string()),
                    Value::Null => Value::String("null".to_string()),
                    other => {
                        map.insert(other, child);
                        continue;
                    }
                };
                changed = true;
                map.insert(key, child);
            }
            changed
        }
        Value::Sequence(items) => items
            .iter_mut()
            .fold(false, |changed, item| stringify_keys(item) | changed),
        Value::Tagged(tagged) => stringify_keys(&mut tagged.value),
        _ => false,
    }
}

fn decode_auto(input: &[u8]) -> Result<ParsedDocument, DecodeError> {
    let (first, second) = if location::looks_like_json(input) {
        (DocumentFormat::Json, DocumentFormat::Yaml)
    } else {
        (DocumentFormat::Yaml, DocumentFormat::Json)
    };

    match parse_document(input, first) {
        Ok(parsed) => Ok(parsed),
        // Report the error of the format the content looked like.
        Err(first_err) => parse_document(input, second).map_err(|_| first_err),
    }
}
