use std::collections::HashSet;

use crate::error::ViolationKind;
use crate::expressions::ComponentSection;
use crate::types::{Parameter, Reusable};
use crate::validate::rules::common::{validate_reference_shape, validate_value_exprs};
use crate::validate::validator::Validator;

/// Which call a parameter list feeds; decides whether `in` is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParameterContext {
    Workflow,
    WorkflowStep,
    OperationStep,
}

pub(crate) fn validate_parameter_list(
    v: &mut Validator,
    path: &str,
    params: &[Reusable<Parameter>],
    context: Option<ParameterContext>,
) {
    let mut seen = HashSet::<String>::new();
    for (idx, item) in params.iter().enumerate() {
        let ipath = format!("{path}[{idx}]");
        let effective = match item {
            Reusable::Literal(p) => {
                validate_parameter(v, &ipath, p);
                Some(p)
            }
            Reusable::Reference(r) => {
                validate_reference_shape(
                    v,
                    &format!("{ipath}.reference"),
                    &r.object.reference,
                    Some(ComponentSection::Parameters),
                );
                if let Some(value) = &r.object.value {
                    validate_value_exprs(v, &format!("{ipath}.value"), value);
                }
                r.resolved.as_ref()
            }
        };

        // Unresolved references can only be compared by their path.
        let key = match effective {
            Some(p) => format!("param:{}:{:?}", p.name, p.r#in),
            None => format!("ref:{}", item.as_reference().map_or("", |r| r.object.reference.as_str())),
        };
        if !seen.insert(key) {
            v.push(
                ViolationKind::Uniqueness,
                ipath.as_str(),
                "duplicate parameter (unique by name + in)",
            );
        }

        if let (Some(p), Some(context)) = (effective, context) {
            validate_location(v, &ipath, p, context);
        }
    }
}

/// Checks that hold for a parameter wherever it is declared.
pub(crate) fn validate_parameter(v: &mut Validator, path: &str, p: &Parameter) {
    v.validate_extensions(path, &p.extensions);
    if p.name.trim().is_empty() {
        v.push(ViolationKind::Structure, format!("{path}.name"), "must not be empty");
    }
    validate_value_exprs(v, &format!("{path}.value"), &p.value);
}

fn validate_location(v: &mut Validator, path: &str, p: &Parameter, context: ParameterContext) {
    match context {
        ParameterContext::Workflow => {}
        ParameterContext::WorkflowStep => {
            if p.r#in.is_some() {
                v.push(
                    ViolationKind::Structure,
                    format!("{path}.in"),
                    "must be omitted when the step specifies workflowId (parameters map to workflow inputs)",
                );
            }
        }
        ParameterContext::OperationStep => {
            if p.r#in.is_none() {
                v.push(
                    ViolationKind::Structure,
                    format!("{path}.in"),
                    "must be provided when the step targets an operationId/operationPath",
                );
            }
        }
    }
}
