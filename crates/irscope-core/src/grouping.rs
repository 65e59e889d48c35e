//! Edge rewrites for the pass dependency graph.
use std::collections::HashMap;

use crate::ir::{DependencyEdge, DependencyEdgeKind, NodeId};

/// Merge parallel edges into one edge per ordered `(from, to)` pair.
///
/// The merged type name joins the sorted constituent names with `/`; the kind
/// is kept for a single edge and becomes `Unknown` for a real merge. Pairs
/// come out in order of first appearance. Grouping grouped edges is a no-op.
pub fn group_edges(edges: &[DependencyEdge]) -> Vec<DependencyEdge> {
    let mut groups: Vec<((NodeId, NodeId), Vec<&DependencyEdge>)> = Vec::new();
    let mut slots: HashMap<(NodeId, NodeId), usize> = HashMap::new();

    for edge in edges {
        let key = (edge.from, edge.to);
        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(edge);
    }

    groups
        .into_iter()
        .map(|((from, to), members)| {
            let mut names: Vec<&str> = members.iter().map(|e| e.type_name.as_str()).collect();
            names.sort_unstable();
            let kind = match members.as_slice() {
                [single] => single.kind,
                _ => DependencyEdgeKind::Unknown,
            };
            DependencyEdge {
                from,
                to,
                type_name: names.join("/"),
                kind,
            }
        })
        .collect()
}

/// Flip `schedule-before` and `schedule-imm-before` edges into their `after`
/// form so every schedule edge points the same way.
pub fn canonicalize_schedule(edges: &[DependencyEdge]) -> Vec<DependencyEdge> {
    edges
        .iter()
        .map(|edge| match edge.kind.reversed() {
            Some(kind) => DependencyEdge {
                from: edge.to,
                to: edge.from,
                type_name: kind.as_str().to_string(),
                kind,
            },
            None => edge.clone(),
        })
        .collect()
}
