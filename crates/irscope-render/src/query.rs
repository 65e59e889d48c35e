//! Lookups the front end runs against a built graph.
use std::collections::HashSet;

use irscope_core::{DisplayGraph, NodeId};

/// Nodes whose label contains `needle`, ignoring case, in graph order. An
/// empty needle matches nothing.
pub fn search_by_label<N, E>(graph: &DisplayGraph<N, E>, needle: &str) -> Vec<NodeId> {
    if needle.is_empty() {
        return Vec::new();
    }
    let needle = needle.to_lowercase();
    graph
        .nodes
        .iter()
        .filter(|n| n.label.to_lowercase().contains(&needle))
        .map(|n| n.id)
        .collect()
}

/// The node plus every node sharing an edge with it, in graph order. Empty
/// when the node does not exist.
pub fn neighborhood<N, E>(graph: &DisplayGraph<N, E>, id: NodeId) -> Vec<NodeId> {
    if graph.node(id).is_none() {
        return Vec::new();
    }
    let mut around: HashSet<NodeId> = HashSet::from([id]);
    for edge in &graph.edges {
        if edge.from == id {
            around.insert(edge.to);
        }
        if edge.to == id {
            around.insert(edge.from);
        }
    }
    graph
        .nodes
        .iter()
        .map(|n| n.id)
        .filter(|n| around.contains(n))
        .collect()
}

/// Copy of the graph with everything outside the neighborhood of `id` hidden.
pub fn focus<N: Clone, E: Clone>(graph: &DisplayGraph<N, E>, id: NodeId) -> DisplayGraph<N, E> {
    let keep: HashSet<NodeId> = neighborhood(graph, id).into_iter().collect();
    let mut focused = graph.clone();
    for node in &mut focused.nodes {
        node.hidden |= !keep.contains(&node.id);
    }
    for edge in &mut focused.edges {
        edge.hidden |= !keep.contains(&edge.from) || !keep.contains(&edge.to);
    }
    focused
}

#[cfg(test)]
mod tests {
    use super::*;
    use irscope_core::views::cfg_legend;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_search_is_case_insensitive() {
        let legend = cfg_legend();
        assert_eq!(search_by_label(&legend, "bb"), vec![NodeId(1), NodeId(3)]);
        assert_eq!(search_by_label(&legend, "RETURN"), vec![NodeId(4)]);
        assert!(search_by_label(&legend, "").is_empty());
        assert!(search_by_label(&legend, "phi").is_empty());
    }

    #[test]
    fn test_neighborhood_follows_both_directions() {
        let legend = cfg_legend();
        assert_eq!(
            neighborhood(&legend, NodeId(3)),
            vec![NodeId(2), NodeId(3)]
        );
        assert_eq!(
            neighborhood(&legend, NodeId(2)),
            vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)]
        );
        assert!(neighborhood(&legend, NodeId(42)).is_empty());
    }

    #[test]
    fn test_focus_hides_the_rest() {
        let focused = focus(&cfg_legend(), NodeId(4));
        let hidden: Vec<_> = focused
            .nodes
            .iter()
            .filter(|n| n.hidden)
            .map(|n| n.id)
            .collect();
        assert_eq!(hidden, vec![NodeId(1), NodeId(3)]);
        let shown: Vec<_> = focused
            .edges
            .iter()
            .filter(|e| !e.hidden)
            .map(|e| (e.from, e.to))
            .collect();
        assert_eq!(shown, vec![(NodeId(2), NodeId(4))]);
    }
}
