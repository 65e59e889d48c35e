//! View configurations. Each view is a [`BuildStrategy`] fed into the shared
//! pipeline, plus the record preparation that view needs.
//!
//! [`BuildStrategy`]: crate::graph_builder::BuildStrategy
mod cfg;
mod dependency;
mod detail;
mod legend;
mod lir;

use strum_macros::{Display, EnumIter, EnumString};

pub use cfg::{CfgViewOptions, build_cfg_view, cfg_view};
pub use dependency::{DependencyViewOptions, build_dependency_view, dependency_view};
pub use detail::{DetailViewOptions, build_detail_view, detail_label, detail_view};
pub use legend::{cfg_legend, dependency_legend};
pub use lir::{
    BlockSuccessor, BranchKind, LirView, MachineBlock, MachineBlockEdge, block_edges, block_label,
    build_lir_view, instruction_listing, lir_view, reconstruct_blocks,
};

use crate::display::{DisplayEdge, DisplayNode};
use crate::ir::{HirEdge, HirNode};
use crate::style;

/// The views a dump can be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Default)]
#[strum(serialize_all = "snake_case")]
pub enum ViewKind {
    /// Control flow graph of a pass, optionally collapsed to basic blocks.
    #[default]
    Cfg,
    /// Every HIR instruction with all edge kinds.
    Detail,
    /// Machine basic blocks of a LIR listing.
    Lir,
    /// The method-wide pass dependency graph.
    #[strum(to_string = "deps", serialize = "dependency")]
    Dependency,
}

impl ViewKind {
    /// Whether the view is built from a single pass.
    pub fn needs_pass(self) -> bool {
        !matches!(self, ViewKind::Dependency)
    }
}

/// Wrap a HIR node with its full label and kind color.
pub(crate) fn hir_display_node(node: &HirNode, label: String) -> DisplayNode<HirNode> {
    DisplayNode::new(node.clone(), label).with_color(style::node_color(node.kind, false))
}

/// Wrap a HIR edge with its kind color and dash style.
pub(crate) fn hir_display_edge(edge: &HirEdge, label: &str) -> DisplayEdge<HirEdge> {
    let mut result = DisplayEdge::new(edge.clone(), label).with_color(style::edge_color(edge));
    result.dashed = style::edge_dashed(edge.kind);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_kind_names() {
        assert_eq!("cfg".parse::<ViewKind>().unwrap(), ViewKind::Cfg);
        assert_eq!("detail".parse::<ViewKind>().unwrap(), ViewKind::Detail);
        assert_eq!("lir".parse::<ViewKind>().unwrap(), ViewKind::Lir);
        assert_eq!("deps".parse::<ViewKind>().unwrap(), ViewKind::Dependency);
        assert_eq!("dependency".parse::<ViewKind>().unwrap(), ViewKind::Dependency);
        assert!("graph".parse::<ViewKind>().is_err());
        assert_eq!(ViewKind::Dependency.to_string(), "deps");
        assert!(!ViewKind::Dependency.needs_pass());
    }
}
