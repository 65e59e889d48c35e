use pretty_assertions::assert_eq;

use irscope_core::views::{DetailViewOptions, build_detail_view};
use irscope_core::{HirEdge, HirGraph, HirNode, NodeId};
use irscope_render::{OutputFormat, RenderOptions, focus, render, search_by_label};

fn two_blocks() -> HirGraph {
    HirGraph::new(
        vec![
            HirNode::new(1, "BeginInst").with_root().with_basic_block(0),
            HirNode::new(2, "IFInst")
                .with_basic_block(0)
                .with_operands([5, 6])
                .with_condition("GE"),
            HirNode::new(3, "BeginInst").with_basic_block(1),
            HirNode::new(4, "RETURNInst").with_basic_block(1),
            HirNode::new(5, "CONSTInst").with_constant(0.0),
            HirNode::new(6, "CONSTInst").with_constant(7.5),
        ],
        vec![
            HirEdge::new(1, 2, "bb"),
            HirEdge::new(2, 3, "cfg").with_branch(true),
            HirEdge::new(3, 4, "bb"),
            HirEdge::new(2, 5, "op"),
            HirEdge::new(2, 6, "op"),
        ],
    )
}

#[test]
fn detail_view_renders_one_cluster_per_block() {
    let graph = build_detail_view(&two_blocks(), &DetailViewOptions::new());
    let out = render(&graph, &RenderOptions::new().with_graph_name("method")).unwrap();

    assert!(out.starts_with("digraph method {\n"));
    assert!(out.contains("subgraph cluster_0 {"));
    assert!(out.contains("subgraph cluster_1 {"));
    assert_eq!(out.matches("subgraph").count(), 2);
    assert!(out.contains("n2 -> n5 [label=\"op\", color=\"#808080\", arrowhead=\"dot\"];"));
    assert!(out.contains("n1 -> n2 [label=\"bb\", color=\"#000000\", style=\"dashed\", arrowhead=\"none\"];"));
    assert!(out.ends_with("}\n"));
}

#[test]
fn search_then_focus_limits_output() {
    let graph = build_detail_view(&two_blocks(), &DetailViewOptions::new());
    let hits = search_by_label(&graph, "constinst: 7.5");
    assert_eq!(hits, vec![NodeId(6)]);

    let focused = focus(&graph, hits[0]);
    let text = render(&focused, &RenderOptions::new().with_format(OutputFormat::Text)).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("[-] 2: [2]: IFInst[#5 >= #6]"));
    assert_eq!(lines[2], "2 -> 6 op");
}
