//! The generic build pipeline shared by every view.
//!
//! A view does not subclass anything: it hands [`build`] a [`BuildStrategy`]
//! value saying how records become display elements, which edges traversals
//! may follow, and whether basic blocks are collapsed.
use std::collections::{HashMap, HashSet};

use crate::display::{BuildDiagnostics, DisplayEdge, DisplayGraph, DisplayNode};
use crate::ir::NodeId;
use crate::style::BACKEDGE_COLOR;
use crate::traversal::{self, Adjacency};

/// A raw node record the pipeline can wrap.
pub trait GraphNodeRecord: Clone {
    fn node_id(&self) -> NodeId;

    fn name(&self) -> &str;

    /// Traversals start at the flagged root.
    fn is_root(&self) -> bool {
        false
    }

    /// Nodes that survive basic-block collapse.
    fn is_block_entry(&self) -> bool {
        false
    }
}

/// A raw edge record the pipeline can wrap.
pub trait GraphEdgeRecord: Clone {
    fn source(&self) -> NodeId;

    fn target(&self) -> NodeId;

    /// Edge from a block entry to the terminator of the same block.
    fn is_block_link(&self) -> bool {
        false
    }
}

/// Label and color of a collapsed basic block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    pub label: String,
    pub color: String,
}

pub type SummarizeBlock<'a, N> = dyn Fn(&DisplayNode<N>, &DisplayNode<N>) -> BlockSummary + 'a;

pub enum CollapsePolicy<'a, N> {
    Keep,
    /// Merge every block into its entry node; the closure receives the entry
    /// and the terminator.
    BasicBlocks(Box<SummarizeBlock<'a, N>>),
}

/// How the traversal root is found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RootSelector {
    /// First node whose record reports [`GraphNodeRecord::is_root`].
    #[default]
    Flagged,
    /// First node with this display name.
    Named(String),
}

/// Everything that distinguishes one view from another.
pub struct BuildStrategy<'a, N, E> {
    pub to_display_node: Box<dyn Fn(&N) -> DisplayNode<N> + 'a>,
    pub to_display_edge: Box<dyn Fn(&E) -> DisplayEdge<E> + 'a>,
    /// Edges backedge detection and leveling may follow.
    pub traversal_filter: Box<dyn Fn(&E) -> bool + 'a>,
    pub collapse: CollapsePolicy<'a, N>,
    pub root: RootSelector,
    pub mark_backedges: bool,
    pub assign_levels: bool,
}

impl<'a, N, E> BuildStrategy<'a, N, E> {
    pub fn new(
        to_display_node: impl Fn(&N) -> DisplayNode<N> + 'a,
        to_display_edge: impl Fn(&E) -> DisplayEdge<E> + 'a,
    ) -> Self {
        Self {
            to_display_node: Box::new(to_display_node),
            to_display_edge: Box::new(to_display_edge),
            traversal_filter: Box::new(|_| true),
            collapse: CollapsePolicy::Keep,
            root: RootSelector::Flagged,
            mark_backedges: false,
            assign_levels: false,
        }
    }

    pub fn with_traversal_filter(mut self, filter: impl Fn(&E) -> bool + 'a) -> Self {
        self.traversal_filter = Box::new(filter);
        self
    }

    pub fn with_collapse(mut self, collapse: CollapsePolicy<'a, N>) -> Self {
        self.collapse = collapse;
        self
    }

    pub fn with_root(mut self, root: RootSelector) -> Self {
        self.root = root;
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

/// Working state of one build: display elements plus lookup maps.
#[derive(Debug)]
pub struct GraphBuilder<N, E> {
    pub(crate) nodes: Vec<DisplayNode<N>>,
    pub(crate) edges: Vec<DisplayEdge<E>>,
    /// node id -> index into `nodes`
    node_index: HashMap<NodeId, usize>,
    /// edge `from` id -> indices into `edges`, in insertion order
    edges_from: HashMap<NodeId, Vec<usize>>,
    pub(crate) diagnostics: BuildDiagnostics,
}

impl<N: GraphNodeRecord, E: GraphEdgeRecord> GraphBuilder<N, E> {
    /// Wrap every record and build the lookup maps.
    pub fn init<'r>(
        nodes: impl IntoIterator<Item = &'r N>,
        edges: impl IntoIterator<Item = &'r E>,
        strategy: &BuildStrategy<'_, N, E>,
    ) -> Self
    where
        N: 'r,
        E: 'r,
    {
        let mut builder = Self {
            nodes: nodes
                .into_iter()
                .map(|n| (strategy.to_display_node)(n))
                .collect(),
            edges: edges
                .into_iter()
                .map(|e| (strategy.to_display_edge)(e))
                .collect(),
            node_index: HashMap::new(),
            edges_from: HashMap::new(),
            diagnostics: BuildDiagnostics::default(),
        };
        builder.rebuild_lookup();
        builder
    }

    /// Recompute both lookup maps from scratch. Required after any change to
    /// the node or edge lists.
    pub fn rebuild_lookup(&mut self) {
        self.node_index.clear();
        self.edges_from.clear();

        for (index, node) in self.nodes.iter().enumerate() {
            self.node_index.entry(node.id).or_insert(index);
        }
        for (index, edge) in self.edges.iter().enumerate() {
            self.edges_from.entry(edge.from).or_default().push(index);
        }
    }

    pub fn nodes(&self) -> &[DisplayNode<N>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DisplayEdge<E>] {
        &self.edges
    }

    pub fn diagnostics(&self) -> &BuildDiagnostics {
        &self.diagnostics
    }

    pub fn node(&self, id: NodeId) -> Option<&DisplayNode<N>> {
        self.node_index.get(&id).map(|&index| &self.nodes[index])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    /// Indices of the edges leaving `id`, as of the last lookup rebuild.
    pub fn outgoing(&self, id: NodeId) -> &[usize] {
        self.edges_from.get(&id).map_or(&[], Vec::as_slice)
    }

    pub fn find_root(&self, selector: &RootSelector) -> Option<NodeId> {
        let found = match selector {
            RootSelector::Flagged => self.nodes.iter().find(|n| n.record().is_root()),
            RootSelector::Named(name) => self.nodes.iter().find(|n| &n.name == name),
        };
        found.map(|n| n.id)
    }

    /// Drop edges whose endpoints are not in the node list.
    pub fn drop_dangling_edges(&mut self) -> usize {
        let before = self.edges.len();
        let known: HashSet<NodeId> = self.nodes.iter().map(|n| n.id).collect();
        self.edges
            .retain(|e| known.contains(&e.from) && known.contains(&e.to));
        let dropped = before - self.edges.len();
        if dropped > 0 {
            tracing::debug!(dropped, "dropped dangling edges");
            self.diagnostics.dropped_edges += dropped;
            self.rebuild_lookup();
        }
        dropped
    }

    fn adjacency(&self, filter: &dyn Fn(&E) -> bool) -> Adjacency {
        Adjacency::new(
            self.nodes.iter().map(|n| n.id),
            self.edges
                .iter()
                .enumerate()
                .filter(|(_, e)| filter(e.record()))
                .map(|(index, e)| (index, e.from, e.to)),
        )
    }

    /// Flag and color every backedge reachable from `root`.
    pub fn mark_backedges(&mut self, root: NodeId, filter: &dyn Fn(&E) -> bool) -> usize {
        let found = traversal::find_backedges(&self.adjacency(filter), root);
        for &index in &found {
            let edge = &mut self.edges[index];
            edge.is_backedge = true;
            edge.set_color(BACKEDGE_COLOR);
        }
        self.diagnostics.backedges = found.len();
        found.len()
    }

    /// Assign hierarchical levels starting at `root`.
    pub fn assign_levels(&mut self, root: NodeId, filter: &dyn Fn(&E) -> bool) {
        let result = traversal::assign_levels(&self.adjacency(filter), root);
        for node in &mut self.nodes {
            node.level = result.levels.get(&node.id).copied();
        }
        self.diagnostics.unreached_nodes = result.unreached;
    }

    pub fn finish(self) -> DisplayGraph<N, E> {
        DisplayGraph {
            nodes: self.nodes,
            edges: self.edges,
            diagnostics: self.diagnostics,
        }
    }
}

/// Run the full pipeline: wrap, collapse, drop dangling edges, then mark
/// backedges and assign levels from the root when the strategy asks for it.
pub fn build<'r, N, E>(
    nodes: impl IntoIterator<Item = &'r N>,
    edges: impl IntoIterator<Item = &'r E>,
    strategy: &BuildStrategy<'_, N, E>,
) -> DisplayGraph<N, E>
where
    N: GraphNodeRecord + 'r,
    E: GraphEdgeRecord + 'r,
{
    let mut builder = GraphBuilder::init(nodes, edges, strategy);

    if let CollapsePolicy::BasicBlocks(summarize) = &strategy.collapse {
        builder.collapse_blocks(summarize.as_ref());
    }
    builder.drop_dangling_edges();

    if strategy.mark_backedges || strategy.assign_levels {
        match builder.find_root(&strategy.root) {
            Some(root) => {
                let filter = strategy.traversal_filter.as_ref();
                if strategy.mark_backedges {
                    builder.mark_backedges(root, filter);
                }
                if strategy.assign_levels {
                    builder.assign_levels(root, filter);
                }
            }
            None => {
                tracing::debug!(root = ?strategy.root, "no root node, skipping traversals");
                builder.diagnostics.missing_root = true;
            }
        }
    }

    let graph = builder.finish();
    tracing::trace!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "built display graph"
    );
    graph
}
