use std::path::Path;

use arazzo_core::resolve_document;
use arazzo_core::types::{JsonSchema, Reusable, Step, Workflow};
use serde::Serialize;

use crate::exit_codes;
use crate::input::read_document;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{InputArgs, OutputArgs};

#[derive(Serialize)]
struct InputInfo {
    name: String,
    r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Serialize)]
struct StepInfo {
    step_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    operation_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow_id: Option<String>,
    parameter_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    output_keys: Vec<String>,
}

#[derive(Serialize)]
struct SourceInfo {
    name: String,
    url: String,
    r#type: String,
}

#[derive(Serialize)]
struct InspectResult {
    workflow_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    inputs: Vec<InputInfo>,
    steps: Vec<StepInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    output_keys: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sources: Vec<SourceInfo>,
}

pub async fn inspect_cmd(
    path: &Path,
    workflow_id: Option<&str>,
    input: InputArgs,
    output: OutputArgs,
) -> i32 {
    let mut doc = match read_document(path, &input, &output).await {
        Ok(p) => p.document,
        Err(code) => return code,
    };
    // Inputs given by reference are shown from their component; a broken
    // reference only hides that detail.
    if let Err(e) = resolve_document(&mut doc) {
        tracing::warn!(broken = e.errors.len(), "some references did not resolve");
    }

    let wf = match (workflow_id, doc.workflows.as_slice()) {
        (Some(id), _) => doc.workflow(id),
        (None, [only]) => Some(only),
        (None, []) => {
            print_error(output.format, output.quiet, "no workflows found");
            return exit_codes::VALIDATION_FAILED;
        }
        (None, _) => {
            print_error(
                output.format,
                output.quiet,
                "multiple workflows found, use --workflow to select one",
            );
            return exit_codes::VALIDATION_FAILED;
        }
    };

    let Some(wf) = wf else {
        print_error(
            output.format,
            output.quiet,
            &format!("workflow not found: {}", workflow_id.unwrap_or("?")),
        );
        return exit_codes::VALIDATION_FAILED;
    };

    let sources = doc
        .source_descriptions
        .iter()
        .map(|s| SourceInfo {
            name: s.name.clone(),
            url: s.url.clone(),
            r#type: s.kind().as_str().to_string(),
        })
        .collect();

    let result = InspectResult {
        workflow_id: wf.workflow_id.clone(),
        depends_on: wf.depends_on().to_vec(),
        inputs: describe_inputs(wf),
        steps: wf.steps.iter().map(describe_step).collect(),
        output_keys: wf
            .outputs
            .as_ref()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default(),
        sources,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Workflow: {}", result.workflow_id);
        if !result.depends_on.is_empty() {
            println!("Depends on: {}", result.depends_on.join(", "));
        }
        if !result.inputs.is_empty() {
            println!("\nInputs:");
            for i in &result.inputs {
                println!("  - {} ({})", i.name, i.r#type);
            }
        }
        println!("\nSteps:");
        for s in &result.steps {
            let target = s
                .operation_id
                .as_deref()
                .or(s.operation_path.as_deref())
                .or(s.workflow_id.as_deref())
                .unwrap_or("?");
            println!("  - {} -> {}", s.step_id, target);
        }
        if !result.output_keys.is_empty() {
            println!("\nOutputs: {}", result.output_keys.join(", "));
        }
        if !result.sources.is_empty() {
            println!("\nSources:");
            for s in &result.sources {
                println!("  - {}: {} ({})", s.name, s.url, s.r#type);
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    exit_codes::SUCCESS
}

fn describe_inputs(wf: &Workflow) -> Vec<InputInfo> {
    let schema: Option<&JsonSchema> = wf.inputs.as_ref().and_then(Reusable::resolved);
    let Some(props) = schema
        .and_then(|s| s.get("properties"))
        .and_then(|p| p.as_object())
    else {
        return Vec::new();
    };
    props
        .iter()
        .map(|(name, prop)| InputInfo {
            name: name.clone(),
            r#type: prop
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("any")
                .to_string(),
            description: prop
                .get("description")
                .and_then(|d| d.as_str())
                .map(String::from),
        })
        .collect()
}

fn describe_step(s: &Step) -> StepInfo {
    StepInfo {
        step_id: s.step_id.clone(),
        operation_id: s.operation_id.clone(),
        operation_path: s.operation_path.clone(),
        workflow_id: s.workflow_id.clone(),
        parameter_count: s.parameters.as_ref().map_or(0, Vec::len),
        output_keys: s
            .outputs
            .as_ref()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default(),
    }
}
