#![forbid(unsafe_code)]

pub mod error;
pub mod expressions;
pub mod graph;
pub mod parser;
pub mod resolve;
pub mod types;
pub mod validate;

pub use crate::error::{
    ArazzoError, DecodeError, ReferenceError, ResolutionError, UnsupportedFormatError,
    ValidationError, Violation, ViolationKind,
};
pub use crate::graph::{workflow_order, GraphError, WorkflowOrder};
pub use crate::parser::{
    decode_document, decode_reader, encode_document, parse_document, parse_document_str,
    DocumentFormat,
    ParsedDocument,
};
pub use crate::resolve::{resolve_bindings, resolve_document, Binding, Resolve};
pub use crate::types::ArazzoDocument;
pub use crate::validate::{validate_document, Validate};

/// Decode, resolve and validate a document.
///
/// Decoding stops at the first error. Resolution errors are returned before
/// validation runs, since unresolved references would only repeat as violations.
pub fn load_document(input: &[u8], format: DocumentFormat) -> Result<ArazzoDocument, ArazzoError> {
    let mut doc = decode_document(input, format)?;
    resolve_document(&mut doc)?;
    validate_document(&doc)?;
    Ok(doc)
}

/// [`load_document`] with the format given as a tag (`json`, `yaml`, `yml` or `auto`).
pub fn load_tagged(input: &[u8], tag: &str) -> Result<ArazzoDocument, ArazzoError> {
    let format: DocumentFormat = tag.parse()?;
    load_document(input, format)
}
