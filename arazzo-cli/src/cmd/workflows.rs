use std::path::Path;

use arazzo_core::{workflow_order, ArazzoDocument, WorkflowOrder};
use serde::Serialize;

use crate::exit_codes;
use crate::input::read_document;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{InputArgs, OutputArgs};

#[derive(Serialize)]
struct WorkflowInfo {
    workflow_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    step_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
    level: usize,
}

#[derive(Serialize)]
struct WorkflowsResult {
    workflows: Vec<WorkflowInfo>,
    levels: Vec<Vec<String>>,
}

pub async fn workflows_cmd(path: &Path, input: InputArgs, output: OutputArgs) -> i32 {
    let doc = match read_document(path, &input, &output).await {
        Ok(p) => p.document,
        Err(code) => return code,
    };

    let order = match workflow_order(&doc) {
        Ok(order) => order,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::VALIDATION_FAILED;
        }
    };

    if output.format == OutputFormat::Dot {
        if !output.quiet {
            print!("{}", render_dot(&order));
        }
        return exit_codes::SUCCESS;
    }

    let result = WorkflowsResult {
        workflows: describe(&doc, &order),
        levels: order.levels,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Workflows in {}:", path.display());
        for w in &result.workflows {
            println!("  - {} ({} steps)", w.workflow_id, w.step_count);
            if let Some(s) = &w.summary {
                println!("    {s}");
            }
            if !w.depends_on.is_empty() {
                println!("    depends on: {}", w.depends_on.join(", "));
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    exit_codes::SUCCESS
}

/// Workflows in execution order.
fn describe(doc: &ArazzoDocument, order: &WorkflowOrder) -> Vec<WorkflowInfo> {
    let level_of = |id: &str| {
        order
            .levels
            .iter()
            .position(|level| level.iter().any(|w| w == id))
            .unwrap_or_default()
    };

    order
        .topo_order
        .iter()
        .filter_map(|id| doc.workflow(id))
        .map(|w| WorkflowInfo {
            workflow_id: w.workflow_id.clone(),
            summary: w.summary.clone(),
            description: w.description.clone(),
            step_count: w.steps.len(),
            depends_on: w.depends_on().to_vec(),
            level: level_of(&w.workflow_id),
        })
        .collect()
}

fn render_dot(order: &WorkflowOrder) -> String {
    let mut out = String::from("digraph workflows {\n  rankdir=LR;\n");
    for id in &order.topo_order {
        out.push_str(&format!("  \"{id}\";\n"));
    }
    for (id, deps) in &order.depends_on {
        for dep in deps {
            out.push_str(&format!("  \"{dep}\" -> \"{id}\";\n"));
        }
    }
    out.push_str("}\n");
    out
}
