//! DOT output for display graphs.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use irscope_core::{ArrowStyle, DisplayEdge, DisplayGraph, DisplayNode, NodeId};

/// Sanitize a string to be a valid DOT identifier.
/// Replaces any non-alphanumeric character with underscore.
pub fn sanitize_id(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Escape special characters for DOT labels.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// DOT identifier of a node.
pub fn node_ref(id: NodeId) -> String {
    sanitize_id(&format!("n{}", id))
}

/// A DOT graph builder for constructing valid DOT output.
pub struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    /// Create a new DOT graph with the given name.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {} {{", sanitize_id(name));
        Self { output, indent: 1 }
    }

    /// Add a graph attribute.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape_label(value));
        self
    }

    /// Add a node style default.
    pub fn node_style(&mut self, attrs: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "node [{attrs}];");
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    pub fn node(&mut self, id: &str, attrs: &[(&str, String)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{id}[");
        write_attrs(&mut self.output, attrs);
        self.output.push_str("];\n");
        self
    }

    pub fn edge(&mut self, from: &str, to: &str, attrs: &[(&str, String)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{from} -> {to}");
        if !attrs.is_empty() {
            self.output.push_str(" [");
            write_attrs(&mut self.output, attrs);
            self.output.push(']');
        }
        self.output.push_str(";\n");
        self
    }

    /// Start a subgraph cluster.
    pub fn start_cluster(&mut self, id: &str, label: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "subgraph cluster_{} {{", sanitize_id(id));
        self.indent += 1;
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "label=\"{}\";", escape_label(label));
        self
    }

    /// End the current subgraph cluster.
    pub fn end_cluster(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        write_indent(&mut self.output, self.indent);
        self.output.push_str("}\n");
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

fn write_attrs(output: &mut String, attrs: &[(&str, String)]) {
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        let _ = write!(output, "{}=\"{}\"", key, escape_label(value));
    }
}

fn node_attrs<N>(node: &DisplayNode<N>) -> Vec<(&'static str, String)> {
    let mut attrs = vec![("label", node.label.clone())];
    if let Some(color) = &node.color {
        attrs.push(("fillcolor", color.background.clone()));
    }
    let style = match node.dashed_border {
        true => "filled,dashed",
        false => "filled",
    };
    attrs.push(("style", style.to_string()));
    if let Some(width) = node.border_width {
        attrs.push(("penwidth", width.to_string()));
    }
    if let Some(title) = &node.title {
        attrs.push(("tooltip", title.clone()));
    }
    if let Some(level) = node.level {
        attrs.push(("comment", format!("level {}", level)));
    }
    attrs
}

fn edge_attrs<E>(edge: &DisplayEdge<E>) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    if !edge.label.is_empty() {
        attrs.push(("label", edge.label.clone()));
    }
    if let Some(color) = &edge.color {
        attrs.push(("color", color.background.clone()));
    }
    if edge.dashed {
        attrs.push(("style", "dashed".to_string()));
    }
    match edge.arrow {
        ArrowStyle::Arrow => {}
        ArrowStyle::Circle => attrs.push(("arrowhead", "dot".to_string())),
        ArrowStyle::None => attrs.push(("arrowhead", "none".to_string())),
    }
    if let Some(width) = edge.width {
        attrs.push(("penwidth", width.to_string()));
    }
    if let Some(title) = &edge.title {
        attrs.push(("tooltip", title.clone()));
    }
    if edge.is_backedge {
        attrs.push(("constraint", "false".to_string()));
    }
    attrs
}

/// Render a display graph as DOT. Hidden nodes and every edge touching one are
/// left out; nodes sharing a container are drawn inside one cluster.
pub fn render_dot<N, E>(graph: &DisplayGraph<N, E>, name: &str, cluster: bool) -> String {
    let mut dot = DotBuilder::new(name);
    dot.attr("rankdir", "TB");
    dot.node_style("shape=box, fontname=\"monospace\"");
    dot.blank();

    let visible: Vec<&DisplayNode<N>> = graph.nodes.iter().filter(|n| !n.hidden).collect();
    let shown: HashSet<NodeId> = visible.iter().map(|n| n.id).collect();

    // container id -> member indices, in order of first appearance
    let mut containers: Vec<(&str, Vec<&DisplayNode<N>>)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut loose = Vec::new();
    for node in visible {
        match node.container_group_id.as_deref() {
            Some(container) if cluster => {
                let slot = *slots.entry(container).or_insert_with(|| {
                    containers.push((container, Vec::new()));
                    containers.len() - 1
                });
                containers[slot].1.push(node);
            }
            _ => loose.push(node),
        }
    }

    for (container, members) in &containers {
        dot.start_cluster(container, container);
        for node in members {
            dot.node(&node_ref(node.id), &node_attrs(node));
        }
        dot.end_cluster();
    }
    for node in loose {
        dot.node(&node_ref(node.id), &node_attrs(node));
    }
    dot.blank();

    for edge in &graph.edges {
        if edge.hidden || !shown.contains(&edge.from) || !shown.contains(&edge.to) {
            continue;
        }
        dot.edge(&node_ref(edge.from), &node_ref(edge.to), &edge_attrs(edge));
    }
    dot.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use irscope_core::views::cfg_legend;
    use irscope_core::{HirEdge, HirNode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_and_escape() {
        assert_eq!(sanitize_id("n-3"), "n_3");
        assert_eq!(node_ref(NodeId(-3)), "n_3");
        assert_eq!(escape_label("BB #1 ⇒ #2\n\"x\""), "BB #1 ⇒ #2\\n\\\"x\\\"");
    }

    #[test]
    fn test_builder_output() {
        let mut dot = DotBuilder::new("g");
        dot.node("n1", &[("label", "a".to_string())]);
        dot.edge("n1", "n2", &[]);
        assert_eq!(dot.build(), "digraph g {\n  n1[label=\"a\"];\n  n1 -> n2;\n}\n");
    }

    #[test]
    fn test_legend_renders_backedge_unconstrained() {
        let out = render_dot(&cfg_legend(), "legend", true);
        assert!(out.starts_with("digraph legend {"));
        assert!(out.contains("n1[label=\"BB\", fillcolor=\"#C7E2FC\", style=\"filled\""));
        assert!(out.contains("n3 -> n2 [color=\"#EE0000\", tooltip=\"backedge\", constraint=\"false\"];"));
        assert!(out.contains("n2 -> n4 [label=\"T\", color=\"#5aa52b\""));
    }

    #[test]
    fn test_containers_become_clusters_and_hidden_nodes_vanish() {
        let mut a = DisplayNode::new(HirNode::new(1, "BeginInst"), "a");
        a.container_group_id = Some("4".into());
        let mut b = DisplayNode::new(HirNode::new(2, "RETURNInst"), "b");
        b.container_group_id = Some("4".into());
        let mut c = DisplayNode::new(HirNode::new(3, "CONSTInst"), "c");
        c.hidden = true;
        let graph: DisplayGraph<HirNode, HirEdge> = DisplayGraph {
            nodes: vec![a, b, c],
            edges: vec![
                DisplayEdge::new(HirEdge::new(1, 2, "bb"), ""),
                DisplayEdge::new(HirEdge::new(2, 3, "op"), ""),
            ],
            diagnostics: Default::default(),
        };

        let out = render_dot(&graph, "g", true);
        assert!(out.contains("  subgraph cluster_4 {\n    label=\"4\";\n    n1["));
        assert!(out.contains("n1 -> n2;"));
        assert!(!out.contains("n3"));

        let flat = render_dot(&graph, "g", false);
        assert!(!flat.contains("subgraph"));
    }

    #[test]
    fn test_level_is_carried_as_comment() {
        let node = DisplayNode::new(HirNode::new(1, "BeginInst"), "a").with_level(2);
        let graph: DisplayGraph<HirNode, HirEdge> = DisplayGraph {
            nodes: vec![node],
            edges: Vec::new(),
            diagnostics: Default::default(),
        };

        let out = render_dot(&graph, "g", true);
        assert!(out.contains("n1[label=\"a\", style=\"filled\", comment=\"level 2\"];"));
        assert!(!out.contains("level=\""));
    }
}
