mod index;
mod lookup;

use crate::error::{ReferenceError, ResolutionError};
use crate::expressions::{ComponentRef, ComponentSection};
use crate::types::{
    AnyValue, ArazzoDocument, Components, FailureAction, Parameter, Reusable, Step, SuccessAction,
    Workflow,
};

use lookup::Lookup;

pub use index::{ActionTarget, DocumentIndex, TargetError};
pub(crate) use index::is_external;

pub trait Resolve {
    fn resolve(&mut self) -> Result<(), ResolutionError>;
}

impl Resolve for ArazzoDocument {
    fn resolve(&mut self) -> Result<(), ResolutionError> {
        resolve_document(self)
    }
}

/// One reference bound by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Binding {
    /// Where the reference sits, e.g. `$.workflows[0].steps[1].parameters[0]`.
    pub location: String,
    pub reference: String,
    pub section: ComponentSection,
}

/// Bind every `reference` in the document's workflows to a deep copy of its
/// component.
///
/// All broken references are collected before returning. Running it again on a
/// resolved document recomputes the same values.
pub fn resolve_document(doc: &mut ArazzoDocument) -> Result<(), ResolutionError> {
    resolve_bindings(doc).map(|_| ())
}

/// [`resolve_document`], also reporting each reference that was bound, in document order.
pub fn resolve_bindings(doc: &mut ArazzoDocument) -> Result<Vec<Binding>, ResolutionError> {
    let ArazzoDocument {
        workflows,
        components,
        ..
    } = doc;

    let mut resolver = Resolver {
        components: components.as_ref(),
        bound: Vec::new(),
        errors: Vec::new(),
    };
    for (idx, wf) in workflows.iter_mut().enumerate() {
        resolver.workflow(wf, &format!("$.workflows[{idx}]"));
    }

    if resolver.errors.is_empty() {
        Ok(resolver.bound)
    } else {
        Err(ResolutionError {
            errors: resolver.errors,
        })
    }
}

type LookupFn<T> = fn(&Components, &ComponentRef, Option<&AnyValue>) -> Lookup<T>;

struct Resolver<'a> {
    components: Option<&'a Components>,
    bound: Vec<Binding>,
    errors: Vec<ReferenceError>,
}

impl Resolver<'_> {
    fn workflow(&mut self, wf: &mut Workflow, path: &str) {
        if let Some(inputs) = &mut wf.inputs {
            self.bind(
                inputs,
                format!("{path}.inputs"),
                Some(ComponentSection::Inputs),
                lookup::input,
            );
        }
        if let Some(params) = &mut wf.parameters {
            self.parameters(params, &format!("{path}.parameters"));
        }
        if let Some(actions) = &mut wf.success_actions {
            self.success_actions(actions, &format!("{path}.successActions"));
        }
        if let Some(actions) = &mut wf.failure_actions {
            self.failure_actions(actions, &format!("{path}.failureActions"));
        }
        for (idx, step) in wf.steps.iter_mut().enumerate() {
            self.step(step, &format!("{path}.steps[{idx}]"));
        }
    }

    fn step(&mut self, step: &mut Step, path: &str) {
        if let Some(params) = &mut step.parameters {
            self.parameters(params, &format!("{path}.parameters"));
        }
        if let Some(actions) = &mut step.on_success {
            self.success_actions(actions, &format!("{path}.onSuccess"));
        }
        if let Some(actions) = &mut step.on_failure {
            self.failure_actions(actions, &format!("{path}.onFailure"));
        }
        if let Some(replacements) = step
            .request_body
            .as_mut()
            .and_then(|rb| rb.replacements.as_mut())
        {
            for (idx, rep) in replacements.iter_mut().enumerate() {
                self.bind(
                    &mut rep.value,
                    format!("{path}.requestBody.replacements[{idx}].value"),
                    None,
                    lookup::any_value,
                );
            }
        }
    }

    fn parameters(&mut self, params: &mut [Reusable<Parameter>], path: &str) {
        for (idx, p) in params.iter_mut().enumerate() {
            self.bind(
                p,
                format!("{path}[{idx}]"),
                Some(ComponentSection::Parameters),
                lookup::parameter,
            );
        }
    }

    fn success_actions(&mut self, actions: &mut [Reusable<SuccessAction>], path: &str) {
        for (idx, a) in actions.iter_mut().enumerate() {
            self.bind(
                a,
                format!("{path}[{idx}]"),
                Some(ComponentSection::SuccessActions),
                lookup::success_action,
            );
        }
    }

    fn failure_actions(&mut self, actions: &mut [Reusable<FailureAction>], path: &str) {
        for (idx, a) in actions.iter_mut().enumerate() {
            self.bind(
                a,
                format!("{path}[{idx}]"),
                Some(ComponentSection::FailureActions),
                lookup::failure_action,
            );
        }
    }

    /// Resolve one slot. Literals are left alone; `expected` of `None` accepts any section.
    fn bind<T>(
        &mut self,
        slot: &mut Reusable<T>,
        location: String,
        expected: Option<ComponentSection>,
        find: LookupFn<T>,
    ) {
        let Reusable::Reference(reference) = slot else {
            return;
        };
        reference.resolved = None;
        let path = reference.object.reference.as_str();

        let target = match ComponentRef::parse(path) {
            Ok(target) => target,
            Err(e) => return self.unresolved(path, location, e.to_string()),
        };
        if let Some(expected) = expected {
            if target.section != expected {
                return self.unresolved(
                    path,
                    location,
                    format!("expected a reference into $components.{expected}"),
                );
            }
        }
        let Some(components) = self.components else {
            return self.unresolved(path, location, "document has no components".to_string());
        };

        match find(components, &target, reference.object.value.as_ref()) {
            Lookup::Found(value) => {
                reference.resolved = Some(value);
                self.bound.push(Binding {
                    location,
                    reference: path.to_string(),
                    section: target.section,
                });
            }
            Lookup::Chained(next) => self.errors.push(ReferenceError::Chained {
                path: path.to_string(),
                location,
                target: next,
            }),
            Lookup::Missing => self.unresolved(
                path,
                location,
                format!("no {} entry named {:?}", target.section, target.name),
            ),
        }
    }

    fn unresolved(&mut self, path: &str, location: String, reason: String) {
        self.errors.push(ReferenceError::Unresolved {
            path: path.to_string(),
            location,
            reason,
        });
    }
}
