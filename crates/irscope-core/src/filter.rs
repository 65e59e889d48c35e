//! Removing nodes from a raw graph before it is built.
use std::collections::HashSet;

use crate::graph_builder::{GraphEdgeRecord, GraphNodeRecord};
use crate::ir::NodeId;

/// Borrowed view of the records that survived a filter.
#[derive(Debug)]
pub struct Retained<'r, N, E> {
    pub nodes: Vec<&'r N>,
    pub edges: Vec<&'r E>,
}

/// Ids of the nodes matching `remove`.
pub fn removal_set<N: GraphNodeRecord>(nodes: &[N], remove: impl Fn(&N) -> bool) -> HashSet<NodeId> {
    nodes
        .iter()
        .filter(|n| remove(n))
        .map(GraphNodeRecord::node_id)
        .collect()
}

/// Drop the nodes in `removal` and every edge touching one of them. An empty
/// set keeps everything.
pub fn remove_nodes<'r, N, E>(
    nodes: &'r [N],
    edges: &'r [E],
    removal: &HashSet<NodeId>,
) -> Retained<'r, N, E>
where
    N: GraphNodeRecord,
    E: GraphEdgeRecord,
{
    Retained {
        nodes: nodes
            .iter()
            .filter(|n| !removal.contains(&n.node_id()))
            .collect(),
        edges: edges
            .iter()
            .filter(|e| !removal.contains(&e.source()) && !removal.contains(&e.target()))
            .collect(),
    }
}
