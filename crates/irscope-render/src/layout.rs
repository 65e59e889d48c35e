//! Input for an external hierarchical layout engine.
use std::collections::{HashMap, HashSet};

use serde::Serialize;

use irscope_core::{DisplayGraph, NodeId};

pub const DEFAULT_NODE_WIDTH: u32 = 200;
pub const DEFAULT_NODE_HEIGHT: u32 = 45;

const CHAR_WIDTH: u32 = 10;
const LINE_HEIGHT: u32 = 25;
const HORIZONTAL_PADDING: u32 = 50;
const VERTICAL_PADDING: u32 = 20;

/// Box size of a node label: `50 + 10 * longest line` wide and `20 + 25 *
/// lines` high. An empty label gets the default size.
pub fn node_size(label: &str) -> (u32, u32) {
    if label.is_empty() {
        return (DEFAULT_NODE_WIDTH, DEFAULT_NODE_HEIGHT);
    }
    let lines = label.split('\n').count() as u32;
    let longest = label
        .split('\n')
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0) as u32;
    (
        HORIZONTAL_PADDING + CHAR_WIDTH * longest,
        VERTICAL_PADDING + LINE_HEIGHT * lines,
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutNode {
    pub id: NodeId,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Layout engines should not let backedges pull nodes upwards.
    pub is_backedge: bool,
}

/// Nodes the engine should draw inside one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerHint {
    pub id: String,
    pub members: Vec<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutInput {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub containers: Vec<ContainerHint>,
}

/// Translate a display graph into layout input. Hidden nodes, hidden edges
/// and edges touching a hidden node are excluded.
pub fn layout_input<N, E>(graph: &DisplayGraph<N, E>) -> LayoutInput {
    let mut input = LayoutInput::default();
    let mut shown = HashSet::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for node in graph.nodes.iter().filter(|n| !n.hidden) {
        let (width, height) = node_size(&node.label);
        shown.insert(node.id);
        input.nodes.push(LayoutNode {
            id: node.id,
            width,
            height,
            level: node.level,
            container: node.container_group_id.clone(),
        });

        if let Some(container) = node.container_group_id.as_deref() {
            let slot = *slots.entry(container).or_insert_with(|| {
                input.containers.push(ContainerHint {
                    id: container.to_string(),
                    members: Vec::new(),
                });
                input.containers.len() - 1
            });
            input.containers[slot].members.push(node.id);
        }
    }

    input.edges = graph
        .edges
        .iter()
        .filter(|e| !e.hidden && shown.contains(&e.from) && shown.contains(&e.to))
        .map(|e| LayoutEdge {
            from: e.from,
            to: e.to,
            is_backedge: e.is_backedge,
        })
        .collect();

    tracing::trace!(
        nodes = input.nodes.len(),
        edges = input.edges.len(),
        containers = input.containers.len(),
        "prepared layout input"
    );
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use irscope_core::views::{DetailViewOptions, build_detail_view};
    use irscope_core::{HirEdge, HirGraph, HirNode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_node_size() {
        assert_eq!(node_size(""), (200, 45));
        assert_eq!(node_size("abc"), (80, 45));
        assert_eq!(node_size("BB #1 ⇒ #2\nRETURN"), (150, 70));
    }

    #[test]
    fn test_hidden_nodes_excluded() {
        let hir = HirGraph::new(
            vec![
                HirNode::new(1, "BeginInst").with_root().with_basic_block(0),
                HirNode::new(2, "RETURNInst").with_basic_block(0),
                HirNode::new(3, "CONSTInst").with_constant(1.0),
            ],
            vec![HirEdge::new(1, 2, "bb"), HirEdge::new(2, 3, "op")],
        );
        let mut graph = build_detail_view(&hir, &DetailViewOptions::new());
        graph.nodes[2].hidden = true;

        let input = layout_input(&graph);
        let ids: Vec<_> = input.nodes.iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(input.edges.len(), 1);
        assert_eq!(
            input.containers,
            vec![ContainerHint {
                id: "0".into(),
                members: vec![NodeId(1), NodeId(2)],
            }]
        );
    }
}
