//! Execution order of workflows implied by `dependsOn`.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::resolve::is_external;
use crate::types::ArazzoDocument;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowOrder {
    /// Local dependencies per workflow, sorted. External ids are dropped.
    pub depends_on: BTreeMap<String, Vec<String>>,
    pub topo_order: Vec<String>,
    /// Workflows whose dependencies all sit in earlier levels.
    pub levels: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("dependsOn cycle prevents ordering workflows: {}", remaining.join(", "))]
    Cycle { remaining: Vec<String> },
}

/// Order the document's workflows so every workflow comes after its local
/// dependencies. Ties break by workflow id.
pub fn workflow_order(doc: &ArazzoDocument) -> Result<WorkflowOrder, GraphError> {
    let ids: BTreeSet<&str> = doc.workflows.iter().map(|w| w.workflow_id.as_str()).collect();

    let mut depends_on: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for wf in &doc.workflows {
        let entry = depends_on.entry(wf.workflow_id.clone()).or_default();
        entry.extend(
            wf.depends_on()
                .iter()
                .map(String::as_str)
                .filter(|d| !is_external(d) && ids.contains(d))
                .map(str::to_string),
        );
        entry.sort();
        entry.dedup();
    }

    let topo_order = topo_sort(&depends_on)?;
    let levels = compute_levels(&topo_order, &depends_on);

    Ok(WorkflowOrder {
        depends_on,
        topo_order,
        levels,
    })
}

fn topo_sort(depends_on: &BTreeMap<String, Vec<String>>) -> Result<Vec<String>, GraphError> {
    let mut indeg: BTreeMap<&str, usize> = BTreeMap::new();
    let mut outgoing: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for (n, deps) in depends_on {
        indeg.insert(n, deps.len());
        for d in deps {
            outgoing.entry(d).or_default().push(n);
        }
    }

    let mut q: VecDeque<&str> = indeg
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(n, _)| *n)
        .collect();

    let mut out = Vec::with_capacity(depends_on.len());
    while let Some(n) = q.pop_front() {
        out.push(n.to_string());
        for m in outgoing.get(n).into_iter().flatten() {
            if let Some(e) = indeg.get_mut(m) {
                *e -= 1;
                if *e == 0 {
                    q.push_back(m);
                }
            }
        }
    }

    if out.len() != depends_on.len() {
        let remaining = indeg
            .into_iter()
            .filter(|(_, d)| *d > 0)
            .map(|(n, _)| n.to_string())
            .collect();
        return Err(GraphError::Cycle { remaining });
    }
    Ok(out)
}

fn compute_levels(topo: &[String], depends_on: &BTreeMap<String, Vec<String>>) -> Vec<Vec<String>> {
    let mut level: BTreeMap<&str, usize> = BTreeMap::new();
    for node in topo {
        let deps = depends_on.get(node).map(Vec::as_slice).unwrap_or(&[]);
        let l = deps
            .iter()
            .filter_map(|d| level.get(d.as_str()).copied())
            .max()
            .map_or(0, |m| m + 1);
        level.insert(node, l);
    }

    let mut levels: Vec<Vec<String>> = Vec::new();
    for node in topo {
        let l = level.get(node.as_str()).copied().unwrap_or_default();
        if levels.len() <= l {
            levels.resize_with(l + 1, Vec::new);
        }
        levels[l].push(node.clone());
    }
    levels
}
