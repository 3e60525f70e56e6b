use crate::error::ViolationKind;
use crate::expressions::{
    parse_runtime_expr, parse_template, validate_value_expressions, ComponentRef, ComponentSection,
};
use crate::resolve::{DocumentIndex, TargetError};
use crate::validate::validator::{Validator, MAP_KEY_RE};

pub(crate) fn validate_map_keys<'a>(
    v: &mut Validator,
    path: &str,
    keys: impl Iterator<Item = &'a String>,
) {
    for key in keys.filter(|k| !MAP_KEY_RE.is_match(k)) {
        v.push(
            ViolationKind::Structure,
            format!("{path}.{key}"),
            "map key must match regex ^[a-zA-Z0-9\\.\\-_]+$",
        );
    }
}

pub(crate) fn validate_runtime_expr(v: &mut Validator, path: &str, expr: &str) {
    if let Err(e) = parse_runtime_expr(expr) {
        v.push(
            ViolationKind::Expression,
            path,
            format!("invalid runtime expression: {e}"),
        );
    }
}

pub(crate) fn validate_template_string(v: &mut Validator, path: &str, s: &str) {
    if let Err(e) = parse_template(s) {
        v.push(
            ViolationKind::Expression,
            path,
            format!("invalid template expression: {e}"),
        );
    }
}

pub(crate) fn validate_value_exprs(v: &mut Validator, path: &str, value: &serde_json::Value) {
    if let Err(e) = validate_value_expressions(value) {
        v.push(
            ViolationKind::Expression,
            path,
            format!("invalid expression inside value: {e}"),
        );
    }
}

/// `reference` must be `$components.<section>.<name>`, and point at `expected` when given.
pub(crate) fn validate_reference_shape(
    v: &mut Validator,
    path: &str,
    reference: &str,
    expected: Option<ComponentSection>,
) {
    match ComponentRef::parse(reference) {
        Err(e) => v.push(
            ViolationKind::Reference,
            path,
            format!("invalid component reference: {e}"),
        ),
        Ok(target) => {
            if let Some(expected) = expected.filter(|s| *s != target.section) {
                v.push(
                    ViolationKind::Reference,
                    path,
                    format!("must reference $components.{expected}.*"),
                );
            }
        }
    }
}

/// A workflowId used as a dependsOn entry, call target or goto target must resolve.
pub(crate) fn validate_workflow_target(
    v: &mut Validator,
    index: &DocumentIndex<'_>,
    path: &str,
    workflow_id: &str,
) {
    if let Err(e) = index.resolve_workflow(workflow_id) {
        let kind = match e {
            TargetError::InvalidExpression { .. } => ViolationKind::Expression,
            _ => ViolationKind::Reference,
        };
        v.push(kind, path, e.to_string());
    }
}
