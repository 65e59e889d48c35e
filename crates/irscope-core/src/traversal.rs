//! Graph traversals over display graphs: backedge detection and leveling.
//!
//! Both run iteratively with an explicit stack, so deeply nested control flow
//! cannot overflow the native stack. All traversal state lives in a context
//! struct owned by a single call.
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::ir::NodeId;

/// Successor lists restricted to the edges a traversal may follow.
#[derive(Debug, Default)]
pub struct Adjacency {
    order: Vec<NodeId>,
    known: HashSet<NodeId>,
    successors: HashMap<NodeId, Vec<(usize, NodeId)>>,
}

impl Adjacency {
    /// `edges` yields `(edge index, from, to)`; successor order follows the
    /// iteration order.
    pub fn new(
        nodes: impl IntoIterator<Item = NodeId>,
        edges: impl IntoIterator<Item = (usize, NodeId, NodeId)>,
    ) -> Self {
        let mut adjacency = Self::default();
        for id in nodes {
            if adjacency.known.insert(id) {
                adjacency.order.push(id);
            }
        }
        for (index, from, to) in edges {
            adjacency
                .successors
                .entry(from)
                .or_default()
                .push((index, to));
        }
        adjacency
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.known.contains(&id)
    }

    pub fn successors(&self, id: NodeId) -> &[(usize, NodeId)] {
        self.successors.get(&id).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

struct Frame {
    node: NodeId,
    next: usize,
}

/// DFS state for one backedge search.
struct BackedgeSearch<'a> {
    graph: &'a Adjacency,
    /// Nodes currently on the DFS stack.
    active: HashSet<NodeId>,
    finished: HashSet<NodeId>,
    backedges: BTreeSet<usize>,
}

impl<'a> BackedgeSearch<'a> {
    fn new(graph: &'a Adjacency) -> Self {
        Self {
            graph,
            active: HashSet::new(),
            finished: HashSet::new(),
            backedges: BTreeSet::new(),
        }
    }

    fn run(mut self, root: NodeId) -> BTreeSet<usize> {
        let graph = self.graph;
        let mut stack = vec![Frame { node: root, next: 0 }];
        self.active.insert(root);

        while let Some(frame) = stack.last_mut() {
            let successors = graph.successors(frame.node);
            let Some(&(edge, target)) = successors.get(frame.next) else {
                let node = frame.node;
                stack.pop();
                self.active.remove(&node);
                self.finished.insert(node);
                continue;
            };
            frame.next += 1;

            if self.active.contains(&target) {
                self.backedges.insert(edge);
            } else if !self.finished.contains(&target) && graph.contains(target) {
                self.active.insert(target);
                stack.push(Frame {
                    node: target,
                    next: 0,
                });
            }
        }
        self.backedges
    }
}

/// Indices of all edges that close a cycle when walking depth-first from
/// `root`. Every edge into a node on the current DFS path is reported, so
/// several backedges into the same loop header are all found. Empty when
/// `root` is not part of the graph.
pub fn find_backedges(graph: &Adjacency, root: NodeId) -> BTreeSet<usize> {
    if !graph.contains(root) {
        return BTreeSet::new();
    }
    BackedgeSearch::new(graph).run(root)
}

/// Result of [`assign_levels`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelAssignment {
    pub levels: HashMap<NodeId, i64>,
    /// Nodes not reachable from the root; their level was inferred.
    pub unreached: usize,
}

/// Relaxation state for one leveling run.
struct Leveling<'a> {
    graph: &'a Adjacency,
    levels: HashMap<NodeId, i64>,
    max_depth: i64,
}

impl<'a> Leveling<'a> {
    fn new(graph: &'a Adjacency) -> Self {
        Self {
            graph,
            levels: HashMap::new(),
            max_depth: graph.len() as i64,
        }
    }

    /// A node takes the smallest depth it is reached at; its children are only
    /// revisited when that depth goes down.
    fn relax_from(&mut self, root: NodeId) {
        let mut stack = vec![(root, 0_i64)];
        while let Some((node, depth)) = stack.pop() {
            if depth > self.max_depth {
                continue;
            }
            if self.levels.get(&node).is_some_and(|&level| level <= depth) {
                continue;
            }
            self.levels.insert(node, depth);
            for &(_, target) in self.graph.successors(node).iter().rev() {
                if self.graph.contains(target) {
                    stack.push((target, depth + 1));
                }
            }
        }
    }

    /// Place unreached nodes one level above their highest leveled successor,
    /// repeating until nothing changes; whatever is left goes to the bottom.
    fn place_unreached(&mut self) {
        loop {
            let mut progress = false;
            for &node in &self.graph.order {
                if self.levels.contains_key(&node) {
                    continue;
                }
                let above = self
                    .graph
                    .successors(node)
                    .iter()
                    .filter_map(|(_, target)| self.levels.get(target))
                    .min()
                    .copied();
                if let Some(level) = above {
                    self.levels.insert(node, level - 1);
                    progress = true;
                }
            }
            if !progress {
                break;
            }
        }

        if let Some(max) = self.levels.values().max().copied() {
            for &node in &self.graph.order {
                self.levels.entry(node).or_insert(max);
            }
        }
    }
}

/// Hierarchical levels from `root`. Missing root leaves every node unleveled.
pub fn assign_levels(graph: &Adjacency, root: NodeId) -> LevelAssignment {
    if !graph.contains(root) {
        return LevelAssignment::default();
    }
    let mut leveling = Leveling::new(graph);
    leveling.relax_from(root);
    let unreached = graph
        .order
        .iter()
        .filter(|id| !leveling.levels.contains_key(id))
        .count();
    leveling.place_unreached();

    LevelAssignment {
        levels: leveling.levels,
        unreached,
    }
}
