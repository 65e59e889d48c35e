use crate::display::{DisplayEdge, DisplayGraph, DisplayNode};
use crate::filter::{remove_nodes, removal_set};
use crate::graph_builder::{BuildStrategy, RootSelector, build};
use crate::grouping::{canonicalize_schedule, group_edges};
use crate::ir::{DependencyEdge, DependencyEdgeKind, DependencyGraph, DependencyNode, OptimizedMethod};
use crate::style;

/// Toggles of the pass dependency view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyViewOptions {
    /// Merge parallel edges between the same pair of nodes.
    pub group_edges: bool,
    /// Drop disabled passes instead of drawing them dashed.
    pub only_enabled: bool,
    pub hide_requires: bool,
    pub hide_provides: bool,
    pub hide_modifies: bool,
    pub hide_schedule: bool,
    /// Point every schedule edge the `after` way.
    pub canonical_schedule: bool,
    pub assign_levels: bool,
}

impl Default for DependencyViewOptions {
    fn default() -> Self {
        Self {
            group_edges: true,
            only_enabled: true,
            hide_requires: false,
            hide_provides: false,
            hide_modifies: false,
            hide_schedule: false,
            canonical_schedule: true,
            assign_levels: true,
        }
    }
}

impl DependencyViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_edges(mut self, group_edges: bool) -> Self {
        self.group_edges = group_edges;
        self
    }

    pub fn with_only_enabled(mut self, only_enabled: bool) -> Self {
        self.only_enabled = only_enabled;
        self
    }

    pub fn with_hide_requires(mut self, hide: bool) -> Self {
        self.hide_requires = hide;
        self
    }

    pub fn with_hide_provides(mut self, hide: bool) -> Self {
        self.hide_provides = hide;
        self
    }

    pub fn with_hide_modifies(mut self, hide: bool) -> Self {
        self.hide_modifies = hide;
        self
    }

    pub fn with_hide_schedule(mut self, hide: bool) -> Self {
        self.hide_schedule = hide;
        self
    }

    pub fn with_canonical_schedule(mut self, canonical: bool) -> Self {
        self.canonical_schedule = canonical;
        self
    }

    pub fn with_levels(mut self, assign_levels: bool) -> Self {
        self.assign_levels = assign_levels;
        self
    }

    fn hides(&self, kind: DependencyEdgeKind) -> bool {
        match kind {
            DependencyEdgeKind::Requires => self.hide_requires,
            DependencyEdgeKind::Provides => self.hide_provides,
            DependencyEdgeKind::Modifies => self.hide_modifies,
            kind if kind.is_schedule() => self.hide_schedule,
            _ => false,
        }
    }
}

fn dependency_node(node: &DependencyNode) -> DisplayNode<DependencyNode> {
    let mut result =
        DisplayNode::new(node.clone(), node.name.clone()).with_color(style::dependency_node_color(node));
    result.dashed_border = !node.enabled;
    result
}

fn dependency_edge(edge: &DependencyEdge) -> DisplayEdge<DependencyEdge> {
    DisplayEdge::new(edge.clone(), edge.type_name.clone())
        .with_color(style::dependency_edge_color(edge.kind))
}

/// Build the pass dependency view. Edge hiding runs before grouping, so a
/// hidden kind never shows up inside a merged label. `root_name` names the
/// node leveling starts from.
pub fn build_dependency_view(
    graph: &DependencyGraph,
    root_name: Option<&str>,
    options: &DependencyViewOptions,
) -> DisplayGraph<DependencyNode, DependencyEdge> {
    let mut edges: Vec<DependencyEdge> = graph
        .edges
        .iter()
        .filter(|e| !options.hides(e.kind))
        .cloned()
        .collect();
    if options.canonical_schedule {
        edges = canonicalize_schedule(&edges);
    }

    let removal = removal_set(&graph.nodes, |node| options.only_enabled && !node.enabled);
    let kept = remove_nodes(&graph.nodes, &edges, &removal);
    let mut edges: Vec<DependencyEdge> = kept.edges.into_iter().cloned().collect();
    if options.group_edges {
        edges = group_edges(&edges);
    }

    let mut strategy = BuildStrategy::new(dependency_node, dependency_edge);
    if let Some(name) = root_name {
        strategy = strategy
            .with_root(RootSelector::Named(name.to_string()))
            .with_levels(options.assign_levels);
    }

    let result = build(kept.nodes, &edges, &strategy);
    tracing::debug!(
        nodes = result.nodes.len(),
        edges = result.edges.len(),
        removed = removal.len(),
        "built dependency view"
    );
    result
}

/// Dependency view of a method, rooted at its last pass.
pub fn dependency_view(
    method: &OptimizedMethod,
    options: &DependencyViewOptions,
) -> DisplayGraph<DependencyNode, DependencyEdge> {
    let root = method.last_pass().map(|pass| pass.name.as_str());
    build_dependency_view(&method.dependency_graph, root, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::NodeId;
    use pretty_assertions::assert_eq;

    fn sample() -> DependencyGraph {
        DependencyGraph {
            nodes: vec![
                DependencyNode::pass(1, "ParsePass"),
                DependencyNode::artifact(2, "HIR"),
                DependencyNode::pass(3, "DeadCodePass").disabled(),
                DependencyNode::pass(4, "CodeGenPass"),
            ],
            edges: vec![
                DependencyEdge::new(1, 2, "provides"),
                DependencyEdge::new(4, 2, "requires"),
                DependencyEdge::new(4, 2, "modifies"),
                DependencyEdge::new(3, 2, "modifies"),
                DependencyEdge::new(1, 4, "schedule-before"),
            ],
        }
    }

    #[test]
    fn test_disabled_nodes_removed_by_default() {
        let graph = build_dependency_view(&sample(), None, &DependencyViewOptions::new());
        assert!(graph.node(NodeId(3)).is_none());
        assert!(graph.edges.iter().all(|e| e.from != NodeId(3)));
        assert_eq!(graph.nodes.len(), 3);
    }

    #[test]
    fn test_disabled_nodes_dashed_when_kept() {
        let options = DependencyViewOptions::new().with_only_enabled(false);
        let graph = build_dependency_view(&sample(), None, &options);
        let disabled = graph.node(NodeId(3)).unwrap();
        assert!(disabled.dashed_border);
        assert_eq!(disabled.color.as_ref().unwrap().background, "#DCDCDC");
        assert!(graph.edge(NodeId(3), NodeId(2)).is_some());
        assert!(!graph.node(NodeId(1)).unwrap().dashed_border);
    }

    #[test]
    fn test_grouping_and_canonical_schedule() {
        let graph = build_dependency_view(&sample(), None, &DependencyViewOptions::new());
        let labels: Vec<_> = graph
            .edges
            .iter()
            .map(|e| (e.from.0, e.to.0, e.label.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                (1, 2, "provides"),
                (4, 2, "modifies/requires"),
                (4, 1, "schedule-after"),
            ]
        );
        let schedule = graph.edge(NodeId(4), NodeId(1)).unwrap();
        assert_eq!(schedule.color.as_ref().unwrap().background, "#66CDAA");
    }

    #[test]
    fn test_immediate_schedule_keeps_its_color_when_flipped() {
        let deps = DependencyGraph {
            nodes: vec![
                DependencyNode::pass(1, "InlinePass"),
                DependencyNode::pass(2, "LoopPass"),
            ],
            edges: vec![DependencyEdge::new(1, 2, "schedule-imm-before")],
        };
        let graph = build_dependency_view(&deps, None, &DependencyViewOptions::new());
        let edges: Vec<_> = graph
            .edges
            .iter()
            .map(|e| {
                (
                    e.from.0,
                    e.to.0,
                    e.label.as_str(),
                    e.color.as_ref().map(|c| c.background.as_str()),
                )
            })
            .collect();
        assert_eq!(edges, vec![(2, 1, "schedule-imm-after", Some("#FF7F50"))]);
    }

    #[test]
    fn test_hidden_kinds_never_reach_merged_labels() {
        let options = DependencyViewOptions::new()
            .with_hide_requires(true)
            .with_hide_schedule(true)
            .with_canonical_schedule(false);
        let graph = build_dependency_view(&sample(), None, &options);
        let merged = graph.edge(NodeId(4), NodeId(2)).unwrap();
        assert_eq!(merged.label, "modifies");
        assert_eq!(merged.color.as_ref().unwrap().background, "#DC143C");
        assert!(graph.edge(NodeId(1), NodeId(4)).is_none());
    }

    #[test]
    fn test_ungrouped_edges_stay_parallel() {
        let options = DependencyViewOptions::new().with_group_edges(false);
        let graph = build_dependency_view(&sample(), None, &options);
        let parallel = graph
            .edges
            .iter()
            .filter(|e| e.from == NodeId(4) && e.to == NodeId(2))
            .count();
        assert_eq!(parallel, 2);
    }

    #[test]
    fn test_levels_from_named_root() {
        let graph =
            build_dependency_view(&sample(), Some("CodeGenPass"), &DependencyViewOptions::new());
        assert_eq!(graph.node(NodeId(4)).unwrap().level, Some(0));
        assert_eq!(graph.node(NodeId(2)).unwrap().level, Some(1));
        assert_eq!(graph.node(NodeId(1)).unwrap().level, Some(1));
        assert!(!graph.diagnostics.missing_root);

        let graph = build_dependency_view(&sample(), Some("Nope"), &DependencyViewOptions::new());
        assert!(graph.diagnostics.missing_root);
        assert!(graph.nodes.iter().all(|n| n.level.is_none()));
    }
}
