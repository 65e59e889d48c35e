//! Display-ready graph types handed to the presentation layer.
use serde::Serialize;

use crate::graph_builder::{GraphEdgeRecord, GraphNodeRecord};
use crate::ir::NodeId;

/// Fill color plus the color used when the element is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Color {
    pub background: String,
    pub highlight: String,
}

impl Color {
    /// Same color for both states.
    pub fn uniform(color: &str) -> Self {
        Self {
            background: color.to_string(),
            highlight: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowStyle {
    #[default]
    Arrow,
    Circle,
    None,
}

/// A node as shown on screen. Wraps the raw record it was built from; the
/// record is never modified, all presentation lives in the other fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayNode<N> {
    pub id: NodeId,
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Styling group, e.g. the basic block modulo the palette size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Container the layout engine should draw the node inside.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_group_id: Option<String>,
    pub dashed_border: bool,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    /// Terminator of a collapsed basic block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_link: Option<NodeId>,
    #[serde(skip)]
    record: N,
}

impl<N: GraphNodeRecord> DisplayNode<N> {
    pub fn new(record: N, label: impl Into<String>) -> Self {
        Self {
            id: record.node_id(),
            name: record.name().to_string(),
            label: label.into(),
            title: None,
            color: None,
            group_id: None,
            container_group_id: None,
            dashed_border: false,
            hidden: false,
            border_width: None,
            level: None,
            end_link: None,
            record,
        }
    }
}

impl<N> DisplayNode<N> {
    pub fn record(&self) -> &N {
        &self.record
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = Some(Color::uniform(color));
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.set_color(color);
        self
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEdge<E> {
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    pub dashed: bool,
    pub hidden: bool,
    pub arrow: ArrowStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    pub is_backedge: bool,
    #[serde(skip)]
    record: E,
}

impl<E: GraphEdgeRecord> DisplayEdge<E> {
    pub fn new(record: E, label: impl Into<String>) -> Self {
        Self {
            from: record.source(),
            to: record.target(),
            label: label.into(),
            title: None,
            color: None,
            dashed: false,
            hidden: false,
            arrow: ArrowStyle::Arrow,
            width: None,
            is_backedge: false,
            record,
        }
    }
}

impl<E> DisplayEdge<E> {
    pub fn record(&self) -> &E {
        &self.record
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = Some(Color::uniform(color));
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.set_color(color);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// What a build skipped or repaired. Algorithms never log warnings themselves;
/// callers decide what to report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BuildDiagnostics {
    /// Block entries left as-is because their terminator could not be found.
    pub skipped_collapses: Vec<NodeId>,
    /// Edges dropped because an endpoint does not exist.
    pub dropped_edges: usize,
    /// No root node, so backedge detection and leveling were skipped.
    pub missing_root: bool,
    pub backedges: usize,
    /// Nodes the leveling pass could not reach from the root.
    pub unreached_nodes: usize,
}

impl BuildDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.skipped_collapses.is_empty() && self.dropped_edges == 0 && !self.missing_root
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct DisplayGraph<N, E> {
    pub nodes: Vec<DisplayNode<N>>,
    pub edges: Vec<DisplayEdge<E>>,
    #[serde(skip)]
    pub diagnostics: BuildDiagnostics,
}

impl<N, E> Default for DisplayGraph<N, E> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            diagnostics: BuildDiagnostics::default(),
        }
    }
}

impl<N, E> DisplayGraph<N, E> {
    pub fn node(&self, id: NodeId) -> Option<&DisplayNode<N>> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&DisplayEdge<E>> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }

    pub fn backedges(&self) -> impl Iterator<Item = &DisplayEdge<E>> {
        self.edges.iter().filter(|e| e.is_backedge)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Record behind a legend node: just an id and a caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendNode {
    pub id: NodeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEdge {
    pub from: NodeId,
    pub to: NodeId,
}

impl GraphNodeRecord for LegendNode {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl GraphEdgeRecord for LegendEdge {
    fn source(&self) -> NodeId {
        self.from
    }

    fn target(&self) -> NodeId {
        self.to
    }
}

/// Fixed explanatory graph shown next to a view.
pub type LegendGraph = DisplayGraph<LegendNode, LegendEdge>;
