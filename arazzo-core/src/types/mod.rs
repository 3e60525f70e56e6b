mod actions;
mod common;
mod components;
mod criterion;
mod document;
mod parameter;
mod request_body;
mod reusable;
mod source_description;
mod step;
mod workflow;

pub use actions::{FailureAction, FailureActionType, SuccessAction, SuccessActionType};
pub use common::{AnyValue, Extensions, JsonSchema, RuntimeExpression};
pub use components::Components;
pub use criterion::{Criterion, CriterionExpressionType, CriterionKind, CriterionType};
pub use document::{ArazzoDocument, Info};
pub use parameter::{Parameter, ParameterLocation};
pub use request_body::{PayloadReplacement, RequestBody};
pub use reusable::{Reference, Reusable, ReusableObject};
pub use source_description::{SourceDescription, SourceDescriptionType};
pub use step::{CallTarget, Step};
pub use workflow::Workflow;
