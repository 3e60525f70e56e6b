use crate::error::ViolationKind;
use crate::resolve::DocumentIndex;
use crate::types::{CallTarget, RequestBody, Reusable, Step, Workflow};
use crate::validate::rules::{
    actions,
    common::{
        validate_map_keys, validate_reference_shape, validate_runtime_expr,
        validate_template_string, validate_value_exprs, validate_workflow_target,
    },
    criteria,
    parameters::{self, ParameterContext},
};
use crate::validate::validator::Validator;

pub(crate) fn validate_step(
    v: &mut Validator,
    index: &DocumentIndex<'_>,
    wf: &Workflow,
    step: &Step,
    path: &str,
) {
    let context = match step.call_targets().as_slice() {
        [target] => {
            validate_call_target(v, index, path, *target);
            Some(match target {
                CallTarget::Workflow(_) => ParameterContext::WorkflowStep,
                _ => ParameterContext::OperationStep,
            })
        }
        targets => {
            v.push(
                ViolationKind::CallTarget,
                path,
                format!(
                    "exactly one of operationId, operationPath, workflowId must be provided (found {})",
                    targets.len()
                ),
            );
            None
        }
    };

    if let Some(outputs) = &step.outputs {
        validate_map_keys(v, &format!("{path}.outputs"), outputs.keys());
        for (k, expr) in outputs {
            validate_runtime_expr(v, &format!("{path}.outputs.{k}"), expr);
        }
    }

    if let Some(params) = &step.parameters {
        parameters::validate_parameter_list(v, &format!("{path}.parameters"), params, context);
    }

    if let Some(rb) = &step.request_body {
        validate_request_body(v, &format!("{path}.requestBody"), rb);
    }

    if let Some(success_criteria) = &step.success_criteria {
        criteria::validate_criteria_list(v, &format!("{path}.successCriteria"), success_criteria);
    }
    if let Some(on_success) = &step.on_success {
        actions::validate_action_list(v, index, wf, &format!("{path}.onSuccess"), on_success);
    }
    if let Some(on_failure) = &step.on_failure {
        actions::validate_action_list(v, index, wf, &format!("{path}.onFailure"), on_failure);
    }
}

fn validate_call_target(
    v: &mut Validator,
    index: &DocumentIndex<'_>,
    path: &str,
    target: CallTarget<'_>,
) {
    match target {
        CallTarget::OperationId(id) => {
            let id_path = format!("{path}.operationId");
            if id.trim().is_empty() {
                v.push(ViolationKind::CallTarget, id_path, "must not be empty");
            } else if id.trim().starts_with('$') {
                validate_runtime_expr(v, &id_path, id.trim());
            }
        }
        CallTarget::OperationPath(op) => {
            let op_path = format!("{path}.operationPath");
            if op.trim().starts_with('$') {
                validate_runtime_expr(v, &op_path, op.trim());
            } else {
                validate_template_string(v, &op_path, op);
            }
            if !op.contains("$sourceDescriptions.") {
                v.push(
                    ViolationKind::CallTarget,
                    op_path,
                    "must use a $sourceDescriptions.* runtime expression to identify the source description document",
                );
            }
        }
        CallTarget::Workflow(id) => {
            validate_workflow_target(v, index, &format!("{path}.workflowId"), id);
        }
    }
}

fn validate_request_body(v: &mut Validator, path: &str, rb: &RequestBody) {
    v.validate_extensions(path, &rb.extensions);
    if let Some(payload) = &rb.payload {
        validate_value_exprs(v, &format!("{path}.payload"), payload);
    }
    let Some(replacements) = &rb.replacements else {
        return;
    };
    for (idx, rep) in replacements.iter().enumerate() {
        let rpath = format!("{path}.replacements[{idx}]");
        v.validate_extensions(&rpath, &rep.extensions);
        if rep.target.trim().is_empty() {
            v.push(ViolationKind::Structure, format!("{rpath}.target"), "must not be empty");
        }
        match &rep.value {
            Reusable::Literal(value) => validate_value_exprs(v, &format!("{rpath}.value"), value),
            Reusable::Reference(r) => validate_reference_shape(
                v,
                &format!("{rpath}.value.reference"),
                &r.object.reference,
                None,
            ),
        }
    }
}
