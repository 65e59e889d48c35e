//! Plain text dump of a display graph, one element per line.
use std::fmt::Write;

use irscope_core::DisplayGraph;

fn one_line(label: &str) -> String {
    label.split('\n').filter(|l| !l.is_empty()).collect::<Vec<_>>().join(" | ")
}

/// Nodes first (`[level] id: label`), then edges (`from -> to label`), with
/// multi-line labels folded onto one line. Hidden elements are skipped.
pub fn render_text<N, E>(graph: &DisplayGraph<N, E>) -> String {
    let mut output = String::new();
    for node in graph.nodes.iter().filter(|n| !n.hidden) {
        match node.level {
            Some(level) => {
                let _ = write!(output, "[{}] ", level);
            }
            None => output.push_str("[-] "),
        }
        let _ = writeln!(output, "{}: {}", node.id, one_line(&node.label));
    }
    for edge in graph.edges.iter().filter(|e| !e.hidden) {
        let _ = write!(output, "{} -> {}", edge.from, edge.to);
        if !edge.label.is_empty() {
            let _ = write!(output, " {}", one_line(&edge.label));
        }
        if edge.is_backedge {
            output.push_str(" (backedge)");
        }
        output.push('\n');
    }
    output
}
