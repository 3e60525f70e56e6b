use std::collections::HashSet;

use crate::error::ViolationKind;
use crate::resolve::DocumentIndex;
use crate::types::{ArazzoDocument, Info};
use crate::validate::rules::{
    common::validate_workflow_target, components, graph, workflow,
};
use crate::validate::validator::{Validator, ID_RE};

pub(crate) fn validate_document(v: &mut Validator, doc: &ArazzoDocument) {
    let index = DocumentIndex::new(doc);

    v.validate_extensions("$", &doc.extensions);
    v.validate_spec_version("$.arazzo", &doc.arazzo);
    validate_info(v, &doc.info, "$.info");

    if doc.source_descriptions.is_empty() {
        v.push(
            ViolationKind::Structure,
            "$.sourceDescriptions",
            "must have at least one entry",
        );
    }

    let mut source_names = HashSet::<&str>::new();
    for (idx, src) in doc.source_descriptions.iter().enumerate() {
        let path = format!("$.sourceDescriptions[{idx}]");
        v.validate_extensions(&path, &src.extensions);

        if !ID_RE.is_match(&src.name) {
            v.push(
                ViolationKind::Structure,
                format!("{path}.name"),
                "must match regex [A-Za-z0-9_\\-]+",
            );
        }
        if !source_names.insert(src.name.as_str()) {
            v.push(
                ViolationKind::Uniqueness,
                format!("{path}.name"),
                format!("duplicate source description name {:?}", src.name),
            );
        }
        if src.url.trim().is_empty() {
            v.push(ViolationKind::Structure, format!("{path}.url"), "must not be empty");
        }
    }

    if doc.workflows.is_empty() {
        v.push(ViolationKind::Structure, "$.workflows", "must have at least one entry");
    }

    let mut workflow_ids = HashSet::<&str>::new();
    for (idx, wf) in doc.workflows.iter().enumerate() {
        let path = format!("$.workflows[{idx}]");
        v.validate_extensions(&path, &wf.extensions);

        if !ID_RE.is_match(&wf.workflow_id) {
            v.push(
                ViolationKind::Structure,
                format!("{path}.workflowId"),
                "must match regex [A-Za-z0-9_\\-]+",
            );
        }
        if !workflow_ids.insert(wf.workflow_id.as_str()) {
            v.push(
                ViolationKind::Uniqueness,
                format!("{path}.workflowId"),
                format!("duplicate workflowId {:?}", wf.workflow_id),
            );
        }

        for (didx, dep) in wf.depends_on().iter().enumerate() {
            validate_workflow_target(v, &index, &format!("{path}.dependsOn[{didx}]"), dep);
        }

        workflow::validate_workflow(v, &index, wf, &path);
    }

    graph::validate_depends_on_cycles(v, doc);

    if let Some(c) = &doc.components {
        components::validate_components(v, &index, c, "$.components");
    }
}

fn validate_info(v: &mut Validator, info: &Info, path: &str) {
    v.validate_extensions(path, &info.extensions);
    if info.title.trim().is_empty() {
        v.push(ViolationKind::Structure, format!("{path}.title"), "must not be empty");
    }
    if info.version.trim().is_empty() {
        v.push(ViolationKind::Structure, format!("{path}.version"), "must not be empty");
    }
}
