//! Basic-block collapse: one node per block instead of one per instruction.
use std::collections::HashMap;

use crate::graph_builder::{GraphBuilder, GraphEdgeRecord, GraphNodeRecord, SummarizeBlock};
use crate::ir::NodeId;

impl<N: GraphNodeRecord, E: GraphEdgeRecord> GraphBuilder<N, E> {
    /// Merge each basic block into its entry node.
    ///
    /// The entry's first block link names the terminator. Edges leaving the
    /// terminator are re-pointed to leave the entry, and the entry takes label
    /// and color from `summarize`. Afterwards only entry nodes remain, block
    /// links are gone and edges left without an endpoint are dropped. Entries
    /// whose terminator cannot be found keep their original presentation.
    ///
    /// Applying this twice is the same as applying it once.
    pub fn collapse_blocks(&mut self, summarize: &SummarizeBlock<'_, N>) {
        // edge index -> entry the edge now leaves from
        let mut redirects: HashMap<usize, NodeId> = HashMap::new();
        let mut summaries = Vec::new();
        let mut skipped = Vec::new();

        for (index, entry) in self.nodes.iter().enumerate() {
            if !entry.record().is_block_entry() {
                continue;
            }
            let terminator = self
                .outgoing(entry.id)
                .iter()
                .map(|&e| &self.edges[e])
                .find(|e| e.record().is_block_link())
                .and_then(|link| self.node(link.to));

            let Some(terminator) = terminator else {
                tracing::trace!(entry = %entry.id, "no terminator, block left as is");
                skipped.push(entry.id);
                continue;
            };
            for &e in self.outgoing(terminator.id) {
                redirects.insert(e, entry.id);
            }
            summaries.push((index, terminator.id, summarize(entry, terminator)));
        }

        for (index, terminator, summary) in summaries {
            let entry = &mut self.nodes[index];
            entry.label = summary.label;
            entry.set_color(&summary.color);
            entry.end_link = Some(terminator);
        }
        for (edge_index, entry) in redirects {
            self.edges[edge_index].from = entry;
        }
        self.diagnostics.skipped_collapses.extend(skipped);

        let before = self.nodes.len();
        self.nodes.retain(|n| n.record().is_block_entry());
        self.edges.retain(|e| !e.record().is_block_link());
        self.rebuild_lookup();
        tracing::debug!(
            blocks = self.nodes.len(),
            removed = before - self.nodes.len(),
            "collapsed basic blocks"
        );
        self.drop_dangling_edges();
    }
}

#[cfg(test)]
mod tests {
    use crate::display::{DisplayEdge, DisplayNode};
    use crate::graph_builder::{BlockSummary, BuildStrategy, GraphBuilder};
    use crate::ir::{HirEdge, HirNode, NodeId};

    fn strategy<'a>() -> BuildStrategy<'a, HirNode, HirEdge> {
        BuildStrategy::new(
            |n: &HirNode| DisplayNode::new(n.clone(), n.name.clone()),
            |e: &HirEdge| DisplayEdge::new(e.clone(), ""),
        )
    }

    fn summarize(entry: &DisplayNode<HirNode>, end: &DisplayNode<HirNode>) -> BlockSummary {
        BlockSummary {
            label: format!("{}..{}", entry.id, end.id),
            color: "#123456".into(),
        }
    }

    fn diamond() -> (Vec<HirNode>, Vec<HirEdge>) {
        let nodes = vec![
            HirNode::new(1, "BeginInst").with_root(),
            HirNode::new(2, "IFInst"),
            HirNode::new(3, "BeginInst"),
            HirNode::new(4, "GOTOInst"),
            HirNode::new(5, "BeginInst"),
            HirNode::new(6, "RETURNInst"),
        ];
        let edges = vec![
            HirEdge::new(1, 2, "bb"),
            HirEdge::new(2, 3, "cfg").with_branch(true),
            HirEdge::new(2, 5, "cfg").with_branch(false),
            HirEdge::new(3, 4, "bb"),
            HirEdge::new(4, 5, "cfg"),
            HirEdge::new(5, 6, "bb"),
        ];
        (nodes, edges)
    }

    #[test]
    fn test_collapse_keeps_entries_and_repoints_edges() {
        let (nodes, edges) = diamond();
        let mut builder = GraphBuilder::init(&nodes, &edges, &strategy());
        builder.collapse_blocks(&summarize);

        let ids: Vec<_> = builder.nodes().iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        let pairs: Vec<_> = builder
            .edges()
            .iter()
            .map(|e| (e.from.0, e.to.0))
            .collect();
        assert_eq!(pairs, vec![(1, 3), (1, 5), (3, 5)]);

        let first = builder.node(NodeId(1)).unwrap();
        assert_eq!(first.label, "1..2");
        assert_eq!(first.end_link, Some(NodeId(2)));
        assert_eq!(first.color.as_ref().unwrap().background, "#123456");
    }

    #[test]
    fn test_raw_records_are_not_modified() {
        let (nodes, edges) = diamond();
        let mut builder = GraphBuilder::init(&nodes, &edges, &strategy());
        builder.collapse_blocks(&summarize);

        let edge = &builder.edges()[0];
        assert_eq!(edge.from, NodeId(1));
        assert_eq!(edge.record().from, NodeId(2));
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let (nodes, edges) = diamond();
        let mut builder = GraphBuilder::init(&nodes, &edges, &strategy());
        builder.collapse_blocks(&summarize);
        let once = (builder.nodes().to_vec(), builder.edges().to_vec());

        builder.collapse_blocks(&summarize);
        assert_eq!(builder.nodes(), once.0.as_slice());
        assert_eq!(builder.edges(), once.1.as_slice());
    }

    #[test]
    fn test_entry_without_terminator_is_untouched() {
        let nodes = vec![
            HirNode::new(1, "BeginInst"),
            HirNode::new(3, "BeginInst"),
        ];
        let edges = vec![HirEdge::new(1, 2, "bb"), HirEdge::new(1, 3, "cfg")];
        let mut builder = GraphBuilder::init(&nodes, &edges, &strategy());
        builder.collapse_blocks(&summarize);

        assert_eq!(builder.nodes()[0].label, "BeginInst");
        assert_eq!(builder.nodes()[0].end_link, None);
        assert_eq!(builder.diagnostics().skipped_collapses, vec![NodeId(1), NodeId(3)]);
        assert_eq!(builder.edges().len(), 1);
    }
}
