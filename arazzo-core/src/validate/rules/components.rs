use std::collections::BTreeMap;

use crate::error::ViolationKind;
use crate::resolve::DocumentIndex;
use crate::types::{Components, Reusable};
use crate::validate::rules::actions::validate_component_action;
use crate::validate::rules::common::validate_map_keys;
use crate::validate::rules::parameters::validate_parameter;
use crate::validate::validator::Validator;

pub(crate) fn validate_components(
    v: &mut Validator,
    index: &DocumentIndex<'_>,
    components: &Components,
    path: &str,
) {
    v.validate_extensions(path, &components.extensions);

    if let Some(inputs) = &components.inputs {
        validate_map_keys(v, &format!("{path}.inputs"), inputs.keys());
        for k in inputs.iter().filter(|(_, s)| !s.is_object()).map(|(k, _)| k) {
            v.push(
                ViolationKind::Structure,
                format!("{path}.inputs.{k}"),
                "must be a JSON Schema object",
            );
        }
    }

    if let Some(parameters) = &components.parameters {
        let section = format!("{path}.parameters");
        for (entry_path, p) in inline_entries(v, &section, parameters) {
            validate_parameter(v, &entry_path, p);
        }
    }
    if let Some(actions) = &components.success_actions {
        let section = format!("{path}.successActions");
        for (entry_path, a) in inline_entries(v, &section, actions) {
            validate_component_action(v, index, &entry_path, a);
        }
    }
    if let Some(actions) = &components.failure_actions {
        let section = format!("{path}.failureActions");
        for (entry_path, a) in inline_entries(v, &section, actions) {
            validate_component_action(v, index, &entry_path, a);
        }
    }
}

/// Check the keys of one section and report entries that are themselves references.
/// Returns the inline entries with their paths.
fn inline_entries<'c, T>(
    v: &mut Validator,
    path: &str,
    section: &'c BTreeMap<String, Reusable<T>>,
) -> Vec<(String, &'c T)> {
    validate_map_keys(v, path, section.keys());

    let mut out = Vec::with_capacity(section.len());
    for (name, entry) in section {
        let entry_path = format!("{path}.{name}");
        match entry {
            Reusable::Literal(item) => out.push((entry_path, item)),
            Reusable::Reference(r) => v.push(
                ViolationKind::Reference,
                entry_path,
                format!(
                    "component entries must be defined inline, found reference {:?}",
                    r.object.reference
                ),
            ),
        }
    }
    out
}
