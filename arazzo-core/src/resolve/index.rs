use std::collections::{HashMap, HashSet};

use crate::expressions::{parse_runtime_expr, NamedRoot};
use crate::types::{ArazzoDocument, Step, Workflow};

/// Where a `workflowId`/`stepId` points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionTarget<'a> {
    Workflow(&'a Workflow),
    Step {
        workflow: &'a Workflow,
        step: &'a Step,
    },
    /// A workflow in another Arazzo source, e.g. `$sourceDescriptions.other.checkout`.
    External { source: &'a str, workflow_id: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("unknown workflowId {0:?}")]
    UnknownWorkflow(String),
    #[error("unknown stepId {step_id:?} in workflow {workflow_id:?}")]
    UnknownStep { workflow_id: String, step_id: String },
    #[error("unknown source description {0:?}")]
    UnknownSource(String),
    #[error("invalid workflow reference {expr:?}: {reason}")]
    InvalidExpression { expr: String, reason: String },
}

/// Lookup tables over a document's workflows and steps.
///
/// Built per call; duplicate ids resolve to their first occurrence.
#[derive(Debug)]
pub struct DocumentIndex<'a> {
    workflows: HashMap<&'a str, &'a Workflow>,
    sources: HashSet<&'a str>,
}

impl<'a> DocumentIndex<'a> {
    pub fn new(doc: &'a ArazzoDocument) -> Self {
        let mut workflows = HashMap::with_capacity(doc.workflows.len());
        for wf in &doc.workflows {
            workflows.entry(wf.workflow_id.as_str()).or_insert(wf);
        }
        let sources = doc
            .source_descriptions
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        Self { workflows, sources }
    }

    pub fn workflow(&self, workflow_id: &str) -> Option<&'a Workflow> {
        self.workflows.get(workflow_id).copied()
    }

    pub fn contains_workflow(&self, workflow_id: &str) -> bool {
        self.workflows.contains_key(workflow_id)
    }

    /// Resolve a `workflowId` as used by `dependsOn`, step call targets and goto actions.
    ///
    /// Local ids match exactly, surrounding whitespace included. Ids starting
    /// with `$` must be `$sourceDescriptions.<source>.<workflowId>`.
    pub fn resolve_workflow<'s>(&self, workflow_id: &'s str) -> Result<ActionTarget<'s>, TargetError>
    where
        'a: 's,
    {
        if !is_external(workflow_id) {
            return self
                .workflow(workflow_id)
                .map(|wf| ActionTarget::Workflow(wf))
                .ok_or_else(|| TargetError::UnknownWorkflow(workflow_id.to_string()));
        }

        let invalid = |reason: &str| TargetError::InvalidExpression {
            expr: workflow_id.to_string(),
            reason: reason.to_string(),
        };
        let expr = parse_runtime_expr(workflow_id).map_err(|e| invalid(&e.to_string()))?;
        let path = expr
            .named(NamedRoot::SourceDescriptions)
            .ok_or_else(|| invalid("expected $sourceDescriptions.<source>.<workflowId>"))?;
        if path.rest.is_empty() {
            return Err(invalid("missing workflowId after the source name"));
        }
        if !self.sources.contains(path.root.as_str()) {
            return Err(TargetError::UnknownSource(path.root.clone()));
        }

        // Borrow the pieces back out of the input so the target lives as long as the document.
        let (head, _) = workflow_id.split_once('#').unwrap_or((workflow_id, ""));
        let (source, workflow_id) = head
            .strip_prefix("$sourceDescriptions.")
            .and_then(|rest| rest.split_once('.'))
            .ok_or_else(|| invalid("missing workflowId after the source name"))?;
        Ok(ActionTarget::External {
            source,
            workflow_id,
        })
    }

    /// Resolve a `stepId` within `workflow`.
    pub fn resolve_step(
        &self,
        workflow: &'a Workflow,
        step_id: &str,
    ) -> Result<ActionTarget<'a>, TargetError> {
        workflow
            .step(step_id)
            .map(|step| ActionTarget::Step { workflow, step })
            .ok_or_else(|| TargetError::UnknownStep {
                workflow_id: workflow.workflow_id.clone(),
                step_id: step_id.to_string(),
            })
    }
}

/// Whether a workflow id points outside the document.
pub(crate) fn is_external(workflow_id: &str) -> bool {
    workflow_id.starts_with('$')
}
