use std::path::Path;

use arazzo_core::{resolve_document, ViolationKind, Validate};
use serde::Serialize;

use crate::exit_codes;
use crate::input::read_document;
use crate::output::{print_result, OutputFormat};
use crate::{InputArgs, OutputArgs};

#[derive(Serialize)]
struct Problem {
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ViolationKind>,
    path: String,
    message: String,
}

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    format: String,
    workflows: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<Problem>,
}

pub async fn validate_cmd(path: &Path, input: InputArgs, output: OutputArgs) -> i32 {
    let parsed = match read_document(path, &input, &output).await {
        Ok(p) => p,
        Err(code) => return code,
    };
    let format = parsed.format.as_str().to_string();
    let mut doc = parsed.document;

    // Broken references stop here; validating them would only repeat the same problems.
    let errors: Vec<Problem> = match resolve_document(&mut doc) {
        Err(err) => err
            .errors
            .iter()
            .map(|e| Problem {
                kind: None,
                path: e.location().to_string(),
                message: e.to_string(),
            })
            .collect(),
        Ok(()) => match doc.validate() {
            Ok(()) => Vec::new(),
            Err(err) => err
                .violations
                .into_iter()
                .map(|v| Problem {
                    kind: Some(v.kind),
                    path: v.path,
                    message: v.message,
                })
                .collect(),
        },
    };
    tracing::debug!(problems = errors.len(), "validation finished");

    let result = ValidateResult {
        valid: errors.is_empty(),
        format,
        workflows: doc.workflows.len(),
        errors,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        if result.valid {
            println!("ok: valid Arazzo document ({})", result.format);
        } else {
            eprintln!("error: validation failed");
            for e in &result.errors {
                eprintln!("- {}: {}", e.path, e.message);
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    if result.valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    }
}
