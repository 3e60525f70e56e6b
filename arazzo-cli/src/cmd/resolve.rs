use std::path::Path;

use arazzo_core::{resolve_bindings, Binding};
use serde::Serialize;

use crate::exit_codes;
use crate::input::read_document;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{InputArgs, OutputArgs};

#[derive(Serialize)]
struct BrokenReference {
    location: String,
    reference: String,
    message: String,
}

#[derive(Serialize)]
struct ResolveResult {
    resolved: Vec<Binding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<BrokenReference>,
}

pub async fn resolve_cmd(path: &Path, input: InputArgs, output: OutputArgs) -> i32 {
    let mut doc = match read_document(path, &input, &output).await {
        Ok(p) => p.document,
        Err(code) => return code,
    };

    let result = match resolve_bindings(&mut doc) {
        Ok(resolved) => ResolveResult {
            resolved,
            errors: Vec::new(),
        },
        Err(err) => ResolveResult {
            resolved: Vec::new(),
            errors: err
                .errors
                .iter()
                .map(|e| BrokenReference {
                    location: e.location().to_string(),
                    reference: e.path().to_string(),
                    message: e.to_string(),
                })
                .collect(),
        },
    };
    tracing::debug!(
        resolved = result.resolved.len(),
        broken = result.errors.len(),
        "resolution finished"
    );

    if output.format == OutputFormat::Text && !output.quiet {
        if result.errors.is_empty() {
            println!("ok: {} reference(s) resolved", result.resolved.len());
            for b in &result.resolved {
                println!("  {} -> {}", b.location, b.reference);
            }
        } else {
            print_error(output.format, output.quiet, "reference resolution failed");
            for e in &result.errors {
                eprintln!("- {}: {}", e.location, e.message);
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    if result.errors.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    }
}
