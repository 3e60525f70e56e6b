use std::collections::HashSet;

use crate::error::ViolationKind;
use crate::expressions::ComponentSection;
use crate::resolve::DocumentIndex;
use crate::types::{
    Criterion, Extensions, FailureAction, FailureActionType, Reusable, SuccessAction,
    SuccessActionType, Workflow,
};
use crate::validate::rules::common::{validate_reference_shape, validate_workflow_target};
use crate::validate::rules::criteria::validate_criteria_list;
use crate::validate::validator::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActionKind {
    End,
    Goto,
    Retry,
}

/// Success and failure actions seen through one shape.
pub(crate) struct ActionView<'a> {
    name: &'a str,
    kind: ActionKind,
    workflow_id: Option<&'a str>,
    step_id: Option<&'a str>,
    retry_after: Option<f64>,
    retry_limit: Option<i64>,
    criteria: Option<&'a [Criterion]>,
    extensions: &'a Extensions,
}

pub(crate) trait AsAction {
    const SECTION: ComponentSection;
    const LABEL: &'static str;

    fn view(&self) -> ActionView<'_>;
}

impl AsAction for SuccessAction {
    const SECTION: ComponentSection = ComponentSection::SuccessActions;
    const LABEL: &'static str = "success action";

    fn view(&self) -> ActionView<'_> {
        ActionView {
            name: &self.name,
            kind: match self.action_type {
                SuccessActionType::End => ActionKind::End,
                SuccessActionType::Goto => ActionKind::Goto,
            },
            workflow_id: self.workflow_id.as_deref(),
            step_id: self.step_id.as_deref(),
            retry_after: None,
            retry_limit: None,
            criteria: self.criteria.as_deref(),
            extensions: &self.extensions,
        }
    }
}

impl AsAction for FailureAction {
    const SECTION: ComponentSection = ComponentSection::FailureActions;
    const LABEL: &'static str = "failure action";

    fn view(&self) -> ActionView<'_> {
        ActionView {
            name: &self.name,
            kind: match self.action_type {
                FailureActionType::End => ActionKind::End,
                FailureActionType::Goto => ActionKind::Goto,
                FailureActionType::Retry => ActionKind::Retry,
            },
            workflow_id: self.workflow_id.as_deref(),
            step_id: self.step_id.as_deref(),
            retry_after: self.retry_after_seconds,
            retry_limit: self.retry_limit,
            criteria: self.criteria.as_deref(),
            extensions: &self.extensions,
        }
    }
}

/// Validate an `onSuccess`/`onFailure`/`successActions`/`failureActions` list.
///
/// `scope` is the workflow whose steps a `stepId` must name.
pub(crate) fn validate_action_list<A: AsAction>(
    v: &mut Validator,
    index: &DocumentIndex<'_>,
    scope: &Workflow,
    path: &str,
    actions: &[Reusable<A>],
) {
    let mut seen = HashSet::<String>::new();
    for (idx, item) in actions.iter().enumerate() {
        let ipath = format!("{path}[{idx}]");
        match item {
            Reusable::Literal(a) => {
                let view = a.view();
                if !seen.insert(format!("name:{}", view.name)) {
                    v.push(
                        ViolationKind::Uniqueness,
                        ipath.as_str(),
                        format!("duplicate {} name {:?}", A::LABEL, view.name),
                    );
                }
                validate_action(v, &ipath, &view);
                validate_action_targets(v, index, Some(scope), &ipath, &view);
            }
            Reusable::Reference(r) => {
                if !seen.insert(format!("ref:{}", r.object.reference)) {
                    v.push(
                        ViolationKind::Uniqueness,
                        ipath.as_str(),
                        "duplicate reusable reference",
                    );
                }
                validate_reference_shape(
                    v,
                    &format!("{ipath}.reference"),
                    &r.object.reference,
                    Some(A::SECTION),
                );
                if r.object.value.is_some() {
                    v.push(
                        ViolationKind::Structure,
                        format!("{ipath}.value"),
                        "value is only allowed on parameter references",
                    );
                }
                // The component itself is checked under $.components; here only the
                // targets depend on where it is used.
                if let Some(resolved) = &r.resolved {
                    validate_action_targets(v, index, Some(scope), &ipath, &resolved.view());
                }
            }
        }
    }
}

/// Checks that do not depend on where the action is used.
pub(crate) fn validate_component_action<A: AsAction>(
    v: &mut Validator,
    index: &DocumentIndex<'_>,
    path: &str,
    action: &A,
) {
    let view = action.view();
    validate_action(v, path, &view);
    validate_action_targets(v, index, None, path, &view);
}

fn validate_action(v: &mut Validator, path: &str, a: &ActionView<'_>) {
    v.validate_extensions(path, a.extensions);
    if a.name.trim().is_empty() {
        v.push(ViolationKind::Structure, format!("{path}.name"), "must not be empty");
    }

    let has_retry_fields = a.retry_after.is_some() || a.retry_limit.is_some();
    let target_count = usize::from(a.workflow_id.is_some()) + usize::from(a.step_id.is_some());

    match a.kind {
        ActionKind::End => {
            if target_count > 0 {
                v.push(
                    ViolationKind::Action,
                    path,
                    "type=end must not specify workflowId or stepId",
                );
            }
            if has_retry_fields {
                v.push(
                    ViolationKind::Action,
                    path,
                    "type=end must not specify retryAfter or retryLimit",
                );
            }
        }
        ActionKind::Goto => {
            if target_count != 1 {
                v.push(
                    ViolationKind::Action,
                    path,
                    "type=goto must specify exactly one of workflowId or stepId",
                );
            }
            if has_retry_fields {
                v.push(
                    ViolationKind::Action,
                    path,
                    "type=goto must not specify retryAfter or retryLimit",
                );
            }
        }
        ActionKind::Retry => {
            if target_count > 1 {
                v.push(
                    ViolationKind::Action,
                    path,
                    "type=retry must not specify both workflowId and stepId",
                );
            }
            if a.retry_after.is_some_and(|secs| secs < 0.0 || secs.is_nan()) {
                v.push(
                    ViolationKind::Action,
                    format!("{path}.retryAfter"),
                    "must be non-negative",
                );
            }
            if a.retry_limit.is_some_and(|n| n < 0) {
                v.push(
                    ViolationKind::Action,
                    format!("{path}.retryLimit"),
                    "must be non-negative",
                );
            }
        }
    }

    if let Some(criteria) = a.criteria {
        validate_criteria_list(v, &format!("{path}.criteria"), criteria);
    }
}

/// goto/retry targets must resolve. `scope` is `None` for component definitions,
/// where a `stepId` cannot be checked until the action is used.
fn validate_action_targets(
    v: &mut Validator,
    index: &DocumentIndex<'_>,
    scope: Option<&Workflow>,
    path: &str,
    a: &ActionView<'_>,
) {
    if a.kind == ActionKind::End {
        return;
    }
    if let Some(workflow_id) = a.workflow_id {
        validate_workflow_target(v, index, &format!("{path}.workflowId"), workflow_id);
    }
    if let (Some(step_id), Some(scope)) = (a.step_id, scope) {
        if let Err(e) = index.resolve_step(scope, step_id) {
            v.push(
                ViolationKind::Reference,
                format!("{path}.stepId"),
                format!("must reference a stepId in the current workflow ({e})"),
            );
        }
    }
}
