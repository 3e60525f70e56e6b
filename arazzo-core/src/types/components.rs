use std::collections::BTreeMap;

use crate::types::{Extensions, FailureAction, JsonSchema, Parameter, Reusable, SuccessAction};

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<BTreeMap<String, JsonSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, Reusable<Parameter>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "successActions")]
    pub success_actions: Option<BTreeMap<String, Reusable<SuccessAction>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "failureActions")]
    pub failure_actions: Option<BTreeMap<String, Reusable<FailureAction>>>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl Components {
    pub fn input(&self, name: &str) -> Option<&JsonSchema> {
        self.inputs.as_ref()?.get(name)
    }

    pub fn parameter(&self, name: &str) -> Option<&Reusable<Parameter>> {
        self.parameters.as_ref()?.get(name)
    }

    pub fn success_action(&self, name: &str) -> Option<&Reusable<SuccessAction>> {
        self.success_actions.as_ref()?.get(name)
    }

    pub fn failure_action(&self, name: &str) -> Option<&Reusable<FailureAction>> {
        self.failure_actions.as_ref()?.get(name)
    }
}
