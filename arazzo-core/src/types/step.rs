use std::collections::BTreeMap;

use crate::types::{
    Criterion, Extensions, FailureAction, Parameter, RequestBody, Reusable, RuntimeExpression,
    SuccessAction,
};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "stepId")]
    pub step_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "operationPath")]
    pub operation_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "workflowId")]
    pub workflow_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Reusable<Parameter>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "successCriteria")]
    pub success_criteria: Option<Vec<Criterion>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "onSuccess")]
    pub on_success: Option<Vec<Reusable<SuccessAction>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "onFailure")]
    pub on_failure: Option<Vec<Reusable<FailureAction>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<BTreeMap<String, RuntimeExpression>>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

/// What a step calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTarget<'a> {
    OperationId(&'a str),
    OperationPath(&'a str),
    Workflow(&'a str),
}

impl Step {
    /// Every call-target field that is set, in declaration order.
    pub fn call_targets(&self) -> Vec<CallTarget<'_>> {
        let mut out = Vec::with_capacity(1);
        if let Some(id) = &self.operation_id {
            out.push(CallTarget::OperationId(id));
        }
        if let Some(path) = &self.operation_path {
            out.push(CallTarget::OperationPath(path));
        }
        if let Some(id) = &self.workflow_id {
            out.push(CallTarget::Workflow(id));
        }
        out
    }

    /// The call target when exactly one is set.
    pub fn call_target(&self) -> Option<CallTarget<'_>> {
        match self.call_targets().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}
