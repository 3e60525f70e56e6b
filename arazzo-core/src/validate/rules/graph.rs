use std::collections::HashMap;

use crate::error::ViolationKind;
use crate::resolve::is_external;
use crate::types::ArazzoDocument;
use crate::validate::validator::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Report every `dependsOn` back edge with the full cycle path.
///
/// Workflows are keyed by position, so a duplicated id still has its own edges
/// searched; edges into a duplicated id go to its first occurrence. External
/// and unknown ids are not edges; they are reported elsewhere.
pub(crate) fn validate_depends_on_cycles(v: &mut Validator, doc: &ArazzoDocument) {
    let mut first: HashMap<&str, usize> = HashMap::with_capacity(doc.workflows.len());
    for (pos, wf) in doc.workflows.iter().enumerate() {
        first.entry(wf.workflow_id.as_str()).or_insert(pos);
    }

    let edges: Vec<Vec<usize>> = doc
        .workflows
        .iter()
        .map(|wf| {
            wf.depends_on()
                .iter()
                .filter(|d| !is_external(d))
                .filter_map(|d| first.get(d.as_str()).copied())
                .collect()
        })
        .collect();

    for (owner, cycle) in find_cycles(&edges) {
        let names: Vec<&str> = cycle
            .iter()
            .map(|&pos| doc.workflows[pos].workflow_id.as_str())
            .collect();
        v.push(
            ViolationKind::Cycle,
            format!("$.workflows[{owner}].dependsOn"),
            format!("dependsOn cycle: {}", names.join(" -> ")),
        );
    }
}

/// Three-color depth-first search over `edges`, in document order.
///
/// Returns one entry per back edge: the position owning the closing edge and
/// the cycle path, which starts and ends at the same position. Uses an explicit
/// frame stack so long dependency chains cannot exhaust the call stack.
fn find_cycles(edges: &[Vec<usize>]) -> Vec<(usize, Vec<usize>)> {
    let mut color = vec![Color::White; edges.len()];
    let mut cycles = Vec::new();
    // (node, index of the next outgoing edge to follow)
    let mut frames: Vec<(usize, usize)> = Vec::new();

    for root in 0..edges.len() {
        if color[root] != Color::White {
            continue;
        }
        color[root] = Color::Gray;
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let (node, next) = *frame;
            let Some(&to) = edges[node].get(next) else {
                color[node] = Color::Black;
                frames.pop();
                continue;
            };
            frame.1 += 1;

            match color[to] {
                Color::White => {
                    color[to] = Color::Gray;
                    frames.push((to, 0));
                }
                Color::Gray => {
                    let start = frames.iter().rposition(|(n, _)| *n == to).unwrap_or_default();
                    let mut cycle: Vec<usize> = frames[start..].iter().map(|(n, _)| *n).collect();
                    cycle.push(to);
                    cycles.push((node, cycle));
                }
                Color::Black => {}
            }
        }
    }
    cycles
}
