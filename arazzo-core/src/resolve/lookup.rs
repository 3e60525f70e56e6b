use serde::Serialize;

use crate::expressions::{ComponentRef, ComponentSection};
use crate::types::{AnyValue, Components, FailureAction, Parameter, Reusable, SuccessAction};

/// Outcome of looking a reference up in `components`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lookup<T> {
    Found(T),
    /// The entry exists but is itself a reference (carried here).
    Chained(String),
    Missing,
}

impl<T> Lookup<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(v) => Lookup::Found(f(v)),
            Self::Chained(next) => Lookup::Chained(next),
            Self::Missing => Lookup::Missing,
        }
    }
}

fn entry<T: Clone>(entry: Option<&Reusable<T>>) -> Lookup<T> {
    match entry {
        None => Lookup::Missing,
        Some(Reusable::Literal(v)) => Lookup::Found(v.clone()),
        Some(Reusable::Reference(r)) => Lookup::Chained(r.object.reference.clone()),
    }
}

fn to_value<T: Serialize>(found: Lookup<T>) -> Lookup<AnyValue> {
    match found {
        Lookup::Found(v) => serde_json::to_value(v).map_or(Lookup::Missing, Lookup::Found),
        Lookup::Chained(next) => Lookup::Chained(next),
        Lookup::Missing => Lookup::Missing,
    }
}

/// Parameter references may override the component's `value` locally; the
/// override lands on the copy only.
pub(crate) fn parameter(
    components: &Components,
    target: &ComponentRef,
    local_value: Option<&AnyValue>,
) -> Lookup<Parameter> {
    entry(components.parameter(&target.name)).map(|mut p| {
        if let Some(v) = local_value {
            p.value = v.clone();
        }
        p
    })
}

pub(crate) fn success_action(
    components: &Components,
    target: &ComponentRef,
    _local_value: Option<&AnyValue>,
) -> Lookup<SuccessAction> {
    entry(components.success_action(&target.name))
}

pub(crate) fn failure_action(
    components: &Components,
    target: &ComponentRef,
    _local_value: Option<&AnyValue>,
) -> Lookup<FailureAction> {
    entry(components.failure_action(&target.name))
}

pub(crate) fn input(
    components: &Components,
    target: &ComponentRef,
    _local_value: Option<&AnyValue>,
) -> Lookup<AnyValue> {
    components
        .input(&target.name)
        .cloned()
        .map_or(Lookup::Missing, Lookup::Found)
}

/// Any section, in JSON form. Used for payload replacement values.
pub(crate) fn any_value(
    components: &Components,
    target: &ComponentRef,
    local_value: Option<&AnyValue>,
) -> Lookup<AnyValue> {
    match target.section {
        ComponentSection::Inputs => input(components, target, local_value),
        ComponentSection::Parameters => to_value(parameter(components, target, local_value)),
        ComponentSection::SuccessActions => to_value(success_action(components, target, local_value)),
        ComponentSection::FailureActions => to_value(failure_action(components, target, local_value)),
    }
}
