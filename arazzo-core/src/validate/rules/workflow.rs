use std::collections::HashSet;

use crate::error::ViolationKind;
use crate::expressions::ComponentSection;
use crate::resolve::DocumentIndex;
use crate::types::{Reusable, Workflow};
use crate::validate::rules::{
    actions,
    common::{validate_map_keys, validate_reference_shape, validate_runtime_expr},
    parameters::{self, ParameterContext},
    step,
};
use crate::validate::validator::{Validator, ID_RE};

pub(crate) fn validate_workflow(
    v: &mut Validator,
    index: &DocumentIndex<'_>,
    wf: &Workflow,
    path: &str,
) {
    if wf.steps.is_empty() {
        v.push(ViolationKind::Structure, format!("{path}.steps"), "must have at least one entry");
    }

    match &wf.inputs {
        Some(Reusable::Literal(schema)) if !schema.is_object() => v.push(
            ViolationKind::Structure,
            format!("{path}.inputs"),
            "must be a JSON Schema object",
        ),
        Some(Reusable::Reference(r)) => validate_reference_shape(
            v,
            &format!("{path}.inputs.reference"),
            &r.object.reference,
            Some(ComponentSection::Inputs),
        ),
        _ => {}
    }

    if let Some(outputs) = &wf.outputs {
        validate_map_keys(v, &format!("{path}.outputs"), outputs.keys());
        for (k, expr) in outputs {
            validate_runtime_expr(v, &format!("{path}.outputs.{k}"), expr);
        }
    }

    if let Some(params) = &wf.parameters {
        parameters::validate_parameter_list(
            v,
            &format!("{path}.parameters"),
            params,
            Some(ParameterContext::Workflow),
        );
    }

    if let Some(success_actions) = &wf.success_actions {
        actions::validate_action_list(v, index, wf, &format!("{path}.successActions"), success_actions);
    }
    if let Some(failure_actions) = &wf.failure_actions {
        actions::validate_action_list(v, index, wf, &format!("{path}.failureActions"), failure_actions);
    }

    let mut step_ids = HashSet::<&str>::new();
    for (idx, s) in wf.steps.iter().enumerate() {
        let spath = format!("{path}.steps[{idx}]");
        v.validate_extensions(&spath, &s.extensions);

        if !ID_RE.is_match(&s.step_id) {
            v.push(
                ViolationKind::Structure,
                format!("{spath}.stepId"),
                "must match regex [A-Za-z0-9_\\-]+",
            );
        }
        if !step_ids.insert(s.step_id.as_str()) {
            v.push(
                ViolationKind::Uniqueness,
                format!("{spath}.stepId"),
                format!(
                    "duplicate stepId {:?} in workflow {:?}",
                    s.step_id, wf.workflow_id
                ),
            );
        }

        step::validate_step(v, index, wf, s, &spath);
    }
}
