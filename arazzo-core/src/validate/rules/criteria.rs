use crate::error::ViolationKind;
use crate::types::{Criterion, CriterionKind, CriterionType};
use crate::validate::rules::common::validate_runtime_expr;
use crate::validate::validator::Validator;

const JSONPATH_VERSIONS: [&str; 1] = ["draft-goessner-dispatch-jsonpath-00"];
const XPATH_VERSIONS: [&str; 3] = ["xpath-30", "xpath-20", "xpath-10"];

pub(crate) fn validate_criteria_list(v: &mut Validator, path: &str, criteria: &[Criterion]) {
    for (idx, c) in criteria.iter().enumerate() {
        validate_criterion(v, &format!("{path}[{idx}]"), c);
    }
}

fn validate_criterion(v: &mut Validator, path: &str, c: &Criterion) {
    v.validate_extensions(path, &c.extensions);

    let kind = c.kind();
    if !kind.is_known() {
        v.push(
            ViolationKind::Criterion,
            format!("{path}.type"),
            format!(
                "unknown criterion type {:?} (expected simple, regex, jsonpath, or xpath)",
                kind.as_str()
            ),
        );
        return;
    }

    let condition = c.condition.trim();
    if condition.is_empty() {
        v.push(
            ViolationKind::Criterion,
            format!("{path}.condition"),
            "must not be empty",
        );
    } else {
        match kind {
            CriterionKind::Jsonpath if !condition.starts_with('$') => v.push(
                ViolationKind::Criterion,
                format!("{path}.condition"),
                "jsonpath condition must start with '$'",
            ),
            CriterionKind::Xpath if !condition.starts_with('/') => v.push(
                ViolationKind::Criterion,
                format!("{path}.condition"),
                "xpath condition must start with '/'",
            ),
            _ => {}
        }
    }

    let context_missing = c.context.as_deref().map_or(true, |s| s.trim().is_empty());
    if *kind != CriterionKind::Simple && context_missing {
        v.push(
            ViolationKind::Criterion,
            format!("{path}.context"),
            format!("must be provided when type is {kind}"),
        );
    }
    if let Some(ctx) = c.context.as_deref().filter(|s| !s.trim().is_empty()) {
        validate_runtime_expr(v, &format!("{path}.context"), ctx);
    }

    let version = match &c.r#type {
        Some(CriterionType::Expression(expr)) => {
            v.validate_extensions(&format!("{path}.type"), &expr.extensions);
            Some((format!("{path}.type.version"), expr.version.as_str()))
        }
        _ => c
            .version
            .as_deref()
            .map(|version| (format!("{path}.version"), version)),
    };
    if let Some((vpath, version)) = version {
        validate_version(v, &vpath, kind, version);
    }
}

fn validate_version(v: &mut Validator, path: &str, kind: &CriterionKind, version: &str) {
    let allowed: &[&str] = match kind {
        CriterionKind::Jsonpath => &JSONPATH_VERSIONS,
        CriterionKind::Xpath => &XPATH_VERSIONS,
        _ => return,
    };
    if !allowed.contains(&version) {
        v.push(
            ViolationKind::Criterion,
            path,
            format!(
                "unsupported {kind} version {version:?} (expected {})",
                allowed.join(", ")
            ),
        );
    }
}
