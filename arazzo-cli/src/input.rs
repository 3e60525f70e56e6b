use std::path::Path;

use arazzo_core::error::UnsupportedFormatError;
use arazzo_core::{parse_document, DocumentFormat, ParsedDocument};

use crate::exit_codes;
use crate::output::print_error;
use crate::{InputArgs, OutputArgs};

/// Pick the decoder: explicit tag first, then the file extension, else sniff.
pub fn format_for(path: &Path, input: &InputArgs) -> Result<DocumentFormat, UnsupportedFormatError> {
    if let Some(tag) = &input.input_format {
        return tag.parse();
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    Ok(match ext.as_deref() {
        Some("json") => DocumentFormat::Json,
        Some("yaml" | "yml") => DocumentFormat::Yaml,
        _ => DocumentFormat::Auto,
    })
}

/// Read and decode `path`. Failures are printed; the error is the exit code.
pub async fn read_document(
    path: &Path,
    input: &InputArgs,
    output: &OutputArgs,
) -> Result<ParsedDocument, i32> {
    let format = format_for(path, input).map_err(|e| {
        print_error(output.format, output.quiet, &e.to_string());
        exit_codes::VALIDATION_FAILED
    })?;

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), format = format.as_str(), "decoding document");

    let parsed = parse_document(&bytes, format).map_err(|e| {
        print_error(output.format, output.quiet, &e.to_string());
        exit_codes::VALIDATION_FAILED
    })?;
    tracing::debug!(
        format = parsed.format.as_str(),
        workflows = parsed.document.workflows.len(),
        "decoded document"
    );
    Ok(parsed)
}
