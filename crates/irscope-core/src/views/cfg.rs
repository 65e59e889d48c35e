use crate::display::{DisplayGraph, DisplayNode};
use crate::graph_builder::{BlockSummary, BuildStrategy, CollapsePolicy, build};
use crate::ir::{EdgeKind, HirEdge, HirGraph, HirNode, NodeKind, Pass};
use crate::style;

use super::{hir_display_edge, hir_display_node};

/// Toggles of the control flow view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfgViewOptions {
    /// Show one node per basic block instead of one per control instruction.
    pub collapse_blocks: bool,
    /// Label conditional edges with `T`/`F`.
    pub show_branch_labels: bool,
    pub mark_backedges: bool,
    pub assign_levels: bool,
}

impl Default for CfgViewOptions {
    fn default() -> Self {
        Self {
            collapse_blocks: true,
            show_branch_labels: true,
            mark_backedges: true,
            assign_levels: true,
        }
    }
}

impl CfgViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collapse_blocks(mut self, collapse_blocks: bool) -> Self {
        self.collapse_blocks = collapse_blocks;
        self
    }

    pub fn with_branch_labels(mut self, show_branch_labels: bool) -> Self {
        self.show_branch_labels = show_branch_labels;
        self
    }

    pub fn with_backedges(mut self, mark_backedges: bool) -> Self {
        self.mark_backedges = mark_backedges;
        self
    }

    pub fn with_levels(mut self, assign_levels: bool) -> Self {
        self.assign_levels = assign_levels;
        self
    }
}

/// `BB #entry ⇒ #end`, followed by the terminator on a second line unless the
/// block simply falls through with a `GOTOInst`.
fn summarize_block(entry: &DisplayNode<HirNode>, end: &DisplayNode<HirNode>) -> BlockSummary {
    let terminator = end.record();
    let mut label = format!("BB #{} ⇒ #{}", entry.id, end.id);
    if terminator.kind != NodeKind::Goto {
        label.push('\n');
        label.push_str(&style::simple_node_label(terminator));
    }
    BlockSummary {
        label,
        color: style::node_color(terminator.kind, true).to_string(),
    }
}

/// Build the control flow view from the control instructions and `bb`/`cfg`
/// edges of a HIR graph.
pub fn build_cfg_view(hir: &HirGraph, options: &CfgViewOptions) -> DisplayGraph<HirNode, HirEdge> {
    let show_branch_labels = options.show_branch_labels;
    let mut strategy = BuildStrategy::new(
        |node: &HirNode| hir_display_node(node, style::node_label(node)),
        move |edge: &HirEdge| {
            let label = match show_branch_labels {
                true => style::branch_label(edge).unwrap_or_default(),
                false => "",
            };
            hir_display_edge(edge, label)
        },
    )
    .with_traversal_filter(|edge: &HirEdge| edge.kind != EdgeKind::Operand)
    .with_backedges(options.mark_backedges)
    .with_levels(options.assign_levels);

    if options.collapse_blocks {
        strategy = strategy.with_collapse(CollapsePolicy::BasicBlocks(Box::new(summarize_block)));
    }

    let graph = build(
        hir.nodes.iter().filter(|n| n.kind.is_control()),
        hir.edges.iter().filter(|e| e.kind.is_cfg()),
        &strategy,
    );
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        backedges = graph.diagnostics.backedges,
        collapsed = options.collapse_blocks,
        "built cfg view"
    );
    graph
}

/// CFG view of a pass, or `None` when the pass carries no HIR.
pub fn cfg_view(pass: &Pass, options: &CfgViewOptions) -> Option<DisplayGraph<HirNode, HirEdge>> {
    pass.hir.as_ref().map(|hir| build_cfg_view(hir, options))
}
