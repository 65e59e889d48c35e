use crate::display::{ArrowStyle, DisplayGraph, DisplayNode};
use crate::filter::{remove_nodes, removal_set};
use crate::graph_builder::{BuildStrategy, build};
use crate::ir::{EdgeKind, HirEdge, HirGraph, HirNode, NodeKind, Pass};
use crate::style;

use super::{hir_display_edge, hir_display_node};

/// Number of distinct block styles before groups repeat.
const GROUP_PALETTE: i64 = 8;

/// Toggles of the full instruction view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailViewOptions {
    pub hide_source_states: bool,
    /// Hide instructions not pinned to a basic block.
    pub hide_floating: bool,
    pub mark_backedges: bool,
}

impl Default for DetailViewOptions {
    fn default() -> Self {
        Self {
            hide_source_states: true,
            hide_floating: false,
            mark_backedges: false,
        }
    }
}

impl DetailViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hide_source_states(mut self, hide: bool) -> Self {
        self.hide_source_states = hide;
        self
    }

    pub fn with_hide_floating(mut self, hide: bool) -> Self {
        self.hide_floating = hide;
        self
    }

    pub fn with_backedges(mut self, mark_backedges: bool) -> Self {
        self.mark_backedges = mark_backedges;
        self
    }
}

/// Instruction label plus a second line with the value type and, for pinned
/// instructions, the basic block right-aligned under the first line.
pub fn detail_label(node: &HirNode) -> String {
    let primary = style::node_label(node);
    let type_name = style::display_type(&node.type_name);
    match node.basic_block {
        Some(block) => {
            let block = format!("BB {}", block);
            let secondary = type_name.chars().count() + block.chars().count();
            let width = primary.chars().count().max(secondary) + 2;
            format!(
                "{}\n\n{}{}{}",
                primary,
                type_name,
                " ".repeat(width - secondary),
                block
            )
        }
        None => format!("{}\n\n{}", primary, type_name),
    }
}

fn detail_node(node: &HirNode) -> DisplayNode<HirNode> {
    let mut result = hir_display_node(node, detail_label(node));
    match node.basic_block {
        None => {
            result.dashed_border = true;
            result.border_width = Some(1);
        }
        Some(block) => {
            result.container_group_id = Some(block.to_string());
            result.group_id = Some(block.rem_euclid(GROUP_PALETTE).to_string());
            result.border_width = Some(if node.kind.is_control() { 3 } else { 2 });
        }
    }
    result
}

/// Build the view of every instruction with all edge kinds.
pub fn build_detail_view(
    hir: &HirGraph,
    options: &DetailViewOptions,
) -> DisplayGraph<HirNode, HirEdge> {
    let removal = removal_set(&hir.nodes, |node| {
        (options.hide_source_states && node.kind == NodeKind::SourceState)
            || (options.hide_floating && node.basic_block.is_none())
    });
    let kept = remove_nodes(&hir.nodes, &hir.edges, &removal);

    let strategy = BuildStrategy::new(detail_node, |edge: &HirEdge| {
        let mut result = hir_display_edge(edge, style::edge_kind_label(edge));
        result.arrow = match edge.kind {
            EdgeKind::Operand => ArrowStyle::Circle,
            EdgeKind::BasicBlock => ArrowStyle::None,
            _ => ArrowStyle::Arrow,
        };
        result
    })
    .with_traversal_filter(|edge: &HirEdge| edge.kind != EdgeKind::Operand)
    .with_backedges(options.mark_backedges);

    let graph = build(kept.nodes, kept.edges, &strategy);
    tracing::debug!(
        nodes = graph.nodes.len(),
        removed = removal.len(),
        "built detail view"
    );
    graph
}

/// Detail view of a pass, or `None` when the pass carries no HIR.
pub fn detail_view(
    pass: &Pass,
    options: &DetailViewOptions,
) -> Option<DisplayGraph<HirNode, HirEdge>> {
    pass.hir.as_ref().map(|hir| build_detail_view(hir, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::NodeId;
    use pretty_assertions::assert_eq;

    fn sample() -> HirGraph {
        HirGraph::new(
            vec![
                HirNode::new(1, "BeginInst")
                    .with_root()
                    .with_basic_block(9)
                    .with_type_name("VOIDTypeID"),
                HirNode::new(2, "CONSTInst")
                    .with_constant(3.0)
                    .with_type_name("INTTypeID"),
                HirNode::new(3, "RETURNInst")
                    .with_basic_block(9)
                    .with_operands([2])
                    .with_type_name("INTTypeID"),
                HirNode::new(4, "SourceStateInst").with_basic_block(9),
            ],
            vec![
                HirEdge::new(1, 3, "bb"),
                HirEdge::new(3, 2, "op"),
                HirEdge::new(4, 3, "sched"),
            ],
        )
    }

    #[test]
    fn test_detail_label_alignment() {
        let node = HirNode::new(3, "RETURNInst")
            .with_basic_block(9)
            .with_operands([2])
            .with_type_name("INTTypeID");
        // "[3]: RETURNInst[#2]" is 19 wide, the block sits at column 21
        assert_eq!(
            detail_label(&node),
            "[3]: RETURNInst[#2]\n\nINT              BB 9"
        );
        let floating = HirNode::new(2, "CONSTInst")
            .with_constant(3.0)
            .with_type_name("INTTypeID");
        assert_eq!(detail_label(&floating), "[2]: CONSTInst: 3\n\nINT");
    }

    #[test]
    fn test_source_states_hidden_by_default() {
        let graph = build_detail_view(&sample(), &DetailViewOptions::new());
        assert_eq!(graph.nodes.len(), 3);
        assert!(graph.node(NodeId(4)).is_none());
        assert!(graph.edges.iter().all(|e| e.from != NodeId(4)));

        let options = DetailViewOptions::new().with_hide_source_states(false);
        let graph = build_detail_view(&sample(), &options);
        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.edges.len(), 3);
    }

    #[test]
    fn test_floating_and_pinned_presentation() {
        let graph = build_detail_view(&sample(), &DetailViewOptions::new());

        let floating = graph.node(NodeId(2)).unwrap();
        assert!(floating.dashed_border);
        assert_eq!(floating.border_width, Some(1));
        assert_eq!(floating.group_id, None);
        assert_eq!(floating.container_group_id, None);

        let begin = graph.node(NodeId(1)).unwrap();
        assert_eq!(begin.container_group_id.as_deref(), Some("9"));
        assert_eq!(begin.group_id.as_deref(), Some("1"));
        assert_eq!(begin.border_width, Some(3));
    }

    #[test]
    fn test_hide_floating() {
        let options = DetailViewOptions::new().with_hide_floating(true);
        let graph = build_detail_view(&sample(), &options);
        assert!(graph.node(NodeId(2)).is_none());
        assert!(graph.edge(NodeId(3), NodeId(2)).is_none());
    }

    #[test]
    fn test_edge_presentation() {
        let graph = build_detail_view(&sample(), &DetailViewOptions::new());

        let bb = graph.edge(NodeId(1), NodeId(3)).unwrap();
        assert_eq!(bb.label, "bb");
        assert_eq!(bb.arrow, ArrowStyle::None);
        assert!(bb.dashed);

        let op = graph.edge(NodeId(3), NodeId(2)).unwrap();
        assert_eq!(op.label, "op");
        assert_eq!(op.arrow, ArrowStyle::Circle);
        assert_eq!(op.color.as_ref().unwrap().background, "#808080");
    }
}
