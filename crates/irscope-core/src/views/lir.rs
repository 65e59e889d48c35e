use std::collections::HashMap;

use crate::display::{DisplayEdge, DisplayGraph, DisplayNode};
use crate::graph_builder::{BuildStrategy, GraphEdgeRecord, GraphNodeRecord, build};
use crate::ir::{LirGraph, MachineInstruction, NodeId, Pass};
use crate::style;

/// How control leaves a block towards one successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchKind {
    #[default]
    Unconditional,
    Then,
    Else,
}

impl BranchKind {
    fn from_successor(raw: &str) -> Self {
        if raw.contains("then") {
            BranchKind::Then
        } else if raw.contains("else") {
            BranchKind::Else
        } else {
            BranchKind::Unconditional
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            BranchKind::Then => style::TRUE_BRANCH_COLOR,
            BranchKind::Else => style::FALSE_BRANCH_COLOR,
            BranchKind::Unconditional => style::CONTROL_FLOW_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSuccessor {
    /// Target block label with any `prefix=` marker removed.
    pub label: String,
    pub branch: BranchKind,
}

impl BlockSuccessor {
    fn parse(raw: &str) -> Self {
        let label = match raw.find('=') {
            Some(index) => &raw[index + 1..],
            None => raw,
        };
        Self {
            label: label.to_string(),
            branch: BranchKind::from_successor(raw),
        }
    }
}

/// A run of consecutive instructions sharing one block label.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineBlock {
    /// Position of the block in the listing.
    pub id: NodeId,
    pub label: String,
    pub instructions: Vec<MachineInstruction>,
}

impl MachineBlock {
    /// Successors named by the block's last instruction.
    pub fn successors(&self) -> Vec<BlockSuccessor> {
        self.instructions
            .last()
            .map(|last| last.successors.iter().map(|s| BlockSuccessor::parse(s)).collect())
            .unwrap_or_default()
    }
}

impl GraphNodeRecord for MachineBlock {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn name(&self) -> &str {
        &self.label
    }

    fn is_root(&self) -> bool {
        self.id == NodeId(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineBlockEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub branch: BranchKind,
}

impl GraphEdgeRecord for MachineBlockEdge {
    fn source(&self) -> NodeId {
        self.from
    }

    fn target(&self) -> NodeId {
        self.to
    }
}

/// Split a listing into blocks; a new block starts whenever the label changes.
pub fn reconstruct_blocks(instructions: &[MachineInstruction]) -> Vec<MachineBlock> {
    let mut blocks: Vec<MachineBlock> = Vec::new();
    for instruction in instructions {
        let continues = blocks
            .last()
            .is_some_and(|block| block.label == instruction.block_label);
        if continues {
            if let Some(block) = blocks.last_mut() {
                block.instructions.push(instruction.clone());
            }
            continue;
        }
        let id = NodeId(blocks.len() as i64);
        blocks.push(MachineBlock {
            id,
            label: instruction.block_label.clone(),
            instructions: vec![instruction.clone()],
        });
    }
    blocks
}

/// Edges between blocks. A successor label resolves to the first block with
/// that label; labels naming no block are skipped.
pub fn block_edges(blocks: &[MachineBlock]) -> Vec<MachineBlockEdge> {
    let mut by_label: HashMap<&str, NodeId> = HashMap::new();
    for block in blocks {
        by_label.entry(block.label.as_str()).or_insert(block.id);
    }

    let mut edges = Vec::new();
    for block in blocks {
        for successor in block.successors() {
            match by_label.get(successor.label.as_str()) {
                Some(&to) => edges.push(MachineBlockEdge {
                    from: block.id,
                    to,
                    branch: successor.branch,
                }),
                None => {
                    tracing::debug!(block = %block.label, successor = %successor.label, "unknown successor block")
                }
            }
        }
    }
    edges
}

fn id_width(instructions: &[MachineInstruction]) -> usize {
    instructions
        .iter()
        .map(|i| i.id)
        .max()
        .map_or(1, |max| max.to_string().len())
}

fn markdown_instruction(instruction: &MachineInstruction, width: usize) -> String {
    let mut line = format!("{:0width$}: *{}*", instruction.id, instruction.name);
    if !instruction.operands.is_empty() {
        line.push_str(&format!(" _{}_", instruction.operands.join(",")));
    }
    if let Some(result) = instruction.result.as_deref().filter(|r| !r.is_empty()) {
        line.push_str(&format!(" *->* _{}_", result));
    }
    if !instruction.successors.is_empty() {
        line.push_str(&format!(" _{}_", instruction.successors.join(",")));
    }
    line
}

/// Node label of a block: `*label*` followed by one line per instruction with
/// ids zero-padded to `width`.
pub fn block_label(block: &MachineBlock, width: usize) -> String {
    let mut lines = vec![format!("*{}*", block.label)];
    lines.extend(
        block
            .instructions
            .iter()
            .map(|i| markdown_instruction(i, width)),
    );
    lines.join("\n")
}

/// Plain text listing, one instruction per line.
pub fn instruction_listing(lir: &LirGraph) -> String {
    let width = id_width(&lir.instructions);
    lir.instructions
        .iter()
        .map(|i| {
            let mut line = format!("{:0width$}: {}", i.id, i.name);
            if !i.operands.is_empty() {
                line.push_str(&format!(" {}", i.operands.join(",")));
            }
            if let Some(result) = i.result.as_deref().filter(|r| !r.is_empty()) {
                line.push_str(&format!(" -> {}", result));
            }
            if !i.successors.is_empty() {
                line.push_str(&format!(" {}", i.successors.join(",")));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Machine blocks of one pass together with their graph and listing.
#[derive(Debug, Clone)]
pub struct LirView {
    pub blocks: Vec<MachineBlock>,
    pub graph: DisplayGraph<MachineBlock, MachineBlockEdge>,
    pub listing: String,
}

impl LirView {
    pub fn instruction_count(&self) -> usize {
        self.blocks.iter().map(|b| b.instructions.len()).sum()
    }
}

pub fn build_lir_view(lir: &LirGraph) -> LirView {
    let width = id_width(&lir.instructions);
    let blocks = reconstruct_blocks(&lir.instructions);
    let edges = block_edges(&blocks);

    let strategy = BuildStrategy::new(
        |block: &MachineBlock| DisplayNode::new(block.clone(), block_label(block, width)),
        |edge: &MachineBlockEdge| DisplayEdge::new(edge.clone(), "").with_color(edge.branch.color()),
    )
    .with_backedges(true)
    .with_levels(true);
    let graph = build(&blocks, &edges, &strategy);
    tracing::debug!(
        blocks = blocks.len(),
        instructions = lir.instructions.len(),
        "built lir view"
    );

    LirView {
        listing: instruction_listing(lir),
        blocks,
        graph,
    }
}

/// LIR view of a pass, or `None` when the pass carries no LIR.
pub fn lir_view(pass: &Pass) -> Option<LirView> {
    pass.lir.as_ref().map(build_lir_view)
}
