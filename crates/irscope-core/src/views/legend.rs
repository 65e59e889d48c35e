use crate::display::{DisplayEdge, DisplayNode, LegendEdge, LegendGraph, LegendNode};
use crate::ir::NodeId;
use crate::style;

fn node(id: i64, name: &str, color: &str) -> DisplayNode<LegendNode> {
    let record = LegendNode {
        id: NodeId(id),
        name: name.to_string(),
    };
    DisplayNode::new(record, name).with_color(color)
}

fn edge(from: i64, to: i64, label: &str, color: &str) -> DisplayEdge<LegendEdge> {
    let record = LegendEdge {
        from: NodeId(from),
        to: NodeId(to),
    };
    DisplayEdge::new(record, label).with_color(color)
}

/// Legend of the control flow and detail views: a loop around an `IF` with
/// both branch colors and the backedge color.
pub fn cfg_legend() -> LegendGraph {
    let mut backedge = edge(3, 2, "", style::BACKEDGE_COLOR).with_title("backedge");
    backedge.is_backedge = true;

    LegendGraph {
        nodes: vec![
            node(1, "BB", style::GOTO_INSTRUCTION_COLOR)
                .with_level(0)
                .with_title("basic block with \"GOTO\" as EndInst"),
            node(2, "IF", style::IF_COLOR)
                .with_level(1)
                .with_title("if statement"),
            node(3, "BB", style::GOTO_INSTRUCTION_COLOR).with_level(2),
            node(4, "Return", style::RETURN_COLOR)
                .with_level(2)
                .with_title("return statement"),
        ],
        edges: vec![
            edge(1, 2, "", style::CONTROL_FLOW_COLOR),
            edge(2, 4, "T", style::TRUE_BRANCH_COLOR).with_title("true branch of an if statement"),
            edge(2, 3, "F", style::FALSE_BRANCH_COLOR).with_title("false branch of an if statement"),
            backedge,
        ],
        diagnostics: Default::default(),
    }
}

/// Legend of the pass dependency view: one node per pass/artifact flavor and
/// one edge per edge color.
pub fn dependency_legend() -> LegendGraph {
    let mut disabled = node(4, "disabled", style::DISABLED_DEPENDENCY_COLOR);
    disabled.dashed_border = true;

    LegendGraph {
        nodes: vec![
            node(1, "pass", style::PASS_COLOR),
            node(2, "artifact", style::ARTIFACT_COLOR),
            node(3, "pass + artifact", style::PASS_ARTIFACT_COLOR),
            disabled,
        ],
        edges: vec![
            edge(1, 2, "requires", style::DEPENDENCY_EDGE_COLOR),
            edge(3, 2, "modifies", style::MODIFIES_COLOR),
            edge(3, 1, "schedule-after", style::SCHEDULE_DEPENDENCY_COLOR),
            edge(4, 1, "schedule-imm-before", style::SCHEDULE_IMMEDIATE_COLOR),
        ],
        diagnostics: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cfg_legend_shape() {
        let legend = cfg_legend();
        let names: Vec<_> = legend.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(names, vec!["BB", "IF", "BB", "Return"]);
        let levels: Vec<_> = legend.nodes.iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![Some(0), Some(1), Some(2), Some(2)]);

        let back: Vec<_> = legend.backedges().map(|e| (e.from, e.to)).collect();
        assert_eq!(back, vec![(NodeId(3), NodeId(2))]);
        assert_eq!(
            legend.edge(NodeId(2), NodeId(4)).unwrap().color.as_ref().unwrap().background,
            "#5aa52b"
        );
    }

    #[test]
    fn test_dependency_legend_covers_every_node_color() {
        let legend = dependency_legend();
        let colors: Vec<_> = legend
            .nodes
            .iter()
            .map(|n| n.color.as_ref().unwrap().background.as_str())
            .collect();
        assert_eq!(colors, vec!["#87CEEB", "#8FBC8F", "#BA55D3", "#DCDCDC"]);
        assert!(legend.node(NodeId(4)).unwrap().dashed_border);
        assert_eq!(legend.edges.len(), 4);
    }
}
