use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::graph_builder::{GraphEdgeRecord, GraphNodeRecord};

/// Identifier of a node inside one graph. Ids are only unique per graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// HIR instruction kind. The wire name is the instruction class name emitted
/// by the compiler; anything not listed here decodes to `Unknown`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
    Default,
)]
pub enum NodeKind {
    #[default]
    Unknown,
    #[strum(serialize = "ADDInst")]
    Add,
    #[strum(serialize = "ALOADInst")]
    ALoad,
    #[strum(serialize = "AREFInst")]
    ARef,
    #[strum(serialize = "ARRAYBOUNDSCHECKInst")]
    ArrayBoundsCheck,
    #[strum(serialize = "ARRAYLENGTHInst")]
    ArrayLength,
    #[strum(serialize = "ASTOREInst")]
    AStore,
    #[strum(serialize = "BeginInst")]
    Begin,
    #[strum(serialize = "CONSTInst")]
    Const,
    #[strum(serialize = "GOTOInst")]
    Goto,
    #[strum(serialize = "IFInst")]
    If,
    #[strum(serialize = "LOADInst")]
    Load,
    #[strum(serialize = "PHIInst")]
    Phi,
    #[strum(serialize = "RETURNInst")]
    Return,
    #[strum(serialize = "SUBInst")]
    Sub,
    #[strum(serialize = "IFAssumptionInst")]
    IfAssumption,
    #[strum(serialize = "SourceStateInst")]
    SourceState,
}

impl NodeKind {
    /// Map a wire name to its kind. Total: unrecognized names yield `Unknown`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Kinds that begin or terminate a basic block.
    pub fn is_control(self) -> bool {
        matches!(
            self,
            NodeKind::Begin | NodeKind::Goto | NodeKind::Return | NodeKind::If
        )
    }
}

/// HIR edge kind, decoded from the edge `type` field.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
    Default,
)]
pub enum EdgeKind {
    #[default]
    Unknown,
    /// Links a `BeginInst` to the terminator of its block.
    #[strum(serialize = "bb")]
    BasicBlock,
    /// Control flow between blocks.
    #[strum(serialize = "cfg")]
    ControlFlow,
    /// Data dependency from a user to its operand.
    #[strum(serialize = "op")]
    Operand,
    /// Scheduling dependency.
    #[strum(serialize = "sched")]
    Schedule,
}

impl EdgeKind {
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Edges that make up the control flow graph.
    pub fn is_cfg(self) -> bool {
        matches!(self, EdgeKind::BasicBlock | EdgeKind::ControlFlow)
    }
}

/// Relation between two nodes of the pass dependency graph.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
    Default,
)]
#[strum(serialize_all = "kebab-case")]
pub enum DependencyEdgeKind {
    #[default]
    #[strum(serialize = "Unknown")]
    Unknown,
    Requires,
    Provides,
    Modifies,
    ScheduleBefore,
    ScheduleAfter,
    #[strum(serialize = "schedule-imm-before")]
    ScheduleImmediateBefore,
    #[strum(serialize = "schedule-imm-after")]
    ScheduleImmediateAfter,
}

impl DependencyEdgeKind {
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn is_schedule(self) -> bool {
        matches!(
            self,
            DependencyEdgeKind::ScheduleBefore
                | DependencyEdgeKind::ScheduleAfter
                | DependencyEdgeKind::ScheduleImmediateBefore
                | DependencyEdgeKind::ScheduleImmediateAfter
        )
    }

    /// The `after` counterpart of a `before` kind, used when an edge is flipped.
    pub fn reversed(self) -> Option<Self> {
        match self {
            DependencyEdgeKind::ScheduleBefore => Some(DependencyEdgeKind::ScheduleAfter),
            DependencyEdgeKind::ScheduleImmediateBefore => {
                Some(DependencyEdgeKind::ScheduleImmediateAfter)
            }
            _ => None,
        }
    }
}

/// One HIR instruction as found in the dump.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HirNode {
    pub id: NodeId,
    pub name: String,
    pub type_name: String,
    pub kind: NodeKind,
    pub basic_block: Option<i64>,
    pub is_root: bool,
    pub operands: Vec<NodeId>,
    pub constant_value: Option<f64>,
    pub condition: Option<String>,
    pub has_side_effects: Option<bool>,
}

impl HirNode {
    /// Create a node whose kind is derived from `name`.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: NodeId(id),
            kind: NodeKind::from_name(&name),
            name,
            ..Default::default()
        }
    }

    pub fn with_basic_block(mut self, block: i64) -> Self {
        self.basic_block = Some(block);
        self
    }

    pub fn with_root(mut self) -> Self {
        self.is_root = true;
        self
    }

    pub fn with_operands(mut self, operands: impl IntoIterator<Item = i64>) -> Self {
        self.operands = operands.into_iter().map(NodeId).collect();
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    pub fn with_constant(mut self, value: f64) -> Self {
        self.constant_value = Some(value);
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HirEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub type_name: String,
    pub kind: EdgeKind,
    pub true_branch: Option<bool>,
}

impl HirEdge {
    /// Create an edge whose kind is derived from `type_name`.
    pub fn new(from: i64, to: i64, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            from: NodeId(from),
            to: NodeId(to),
            kind: EdgeKind::from_name(&type_name),
            type_name,
            true_branch: None,
        }
    }

    pub fn with_branch(mut self, taken: bool) -> Self {
        self.true_branch = Some(taken);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HirGraph {
    pub nodes: Vec<HirNode>,
    pub edges: Vec<HirEdge>,
}

impl HirGraph {
    pub fn new(nodes: Vec<HirNode>, edges: Vec<HirEdge>) -> Self {
        Self { nodes, edges }
    }
}

/// One machine instruction of a LIR listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MachineInstruction {
    pub id: i64,
    pub name: String,
    pub type_name: String,
    pub block_label: String,
    pub operands: Vec<String>,
    pub result: Option<String>,
    pub successors: Vec<String>,
}

impl MachineInstruction {
    pub fn new(id: i64, name: impl Into<String>, block_label: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            block_label: block_label.into(),
            ..Default::default()
        }
    }

    pub fn with_operands<S: Into<String>>(mut self, operands: impl IntoIterator<Item = S>) -> Self {
        self.operands = operands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn with_successors<S: Into<String>>(
        mut self,
        successors: impl IntoIterator<Item = S>,
    ) -> Self {
        self.successors = successors.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LirGraph {
    pub instructions: Vec<MachineInstruction>,
}

/// A pass or an artifact in the pass dependency graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DependencyNode {
    pub id: NodeId,
    pub name: String,
    pub is_pass: bool,
    pub is_artifact: bool,
    pub enabled: bool,
}

impl DependencyNode {
    pub fn pass(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            name: name.into(),
            is_pass: true,
            is_artifact: false,
            enabled: true,
        }
    }

    pub fn artifact(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            name: name.into(),
            is_pass: false,
            is_artifact: true,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DependencyEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub type_name: String,
    pub kind: DependencyEdgeKind,
}

impl DependencyEdge {
    pub fn new(from: i64, to: i64, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            from: NodeId(from),
            to: NodeId(to),
            kind: DependencyEdgeKind::from_name(&type_name),
            type_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DependencyGraph {
    pub nodes: Vec<DependencyNode>,
    pub edges: Vec<DependencyEdge>,
}

/// One compiler pass and the IR snapshots it dumped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pass {
    /// Position in the dump, 0-based.
    pub index: usize,
    pub name: String,
    pub elapsed_nanos: u64,
    pub hir: Option<HirGraph>,
    pub lir: Option<LirGraph>,
}

/// Everything the compiler dumped for one method. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptimizedMethod {
    pub class_name: String,
    pub method_name: String,
    pub descriptor: String,
    pub dependency_graph: DependencyGraph,
    pub passes: Vec<Pass>,
}

impl GraphNodeRecord for HirNode {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_root(&self) -> bool {
        self.is_root
    }

    fn is_block_entry(&self) -> bool {
        self.kind == NodeKind::Begin
    }
}

impl GraphEdgeRecord for HirEdge {
    fn source(&self) -> NodeId {
        self.from
    }

    fn target(&self) -> NodeId {
        self.to
    }

    fn is_block_link(&self) -> bool {
        self.kind == EdgeKind::BasicBlock
    }
}

impl GraphNodeRecord for DependencyNode {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl GraphEdgeRecord for DependencyEdge {
    fn source(&self) -> NodeId {
        self.from
    }

    fn target(&self) -> NodeId {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_node_kind_names_round_trip() {
        for kind in NodeKind::iter() {
            assert_eq!(NodeKind::from_name(kind.as_str()), kind, "{kind:?}");
        }
        assert_eq!(NodeKind::from_name("BeginInst"), NodeKind::Begin);
        assert_eq!(NodeKind::from_name("IFAssumptionInst"), NodeKind::IfAssumption);
    }

    #[test]
    fn test_unknown_names_map_to_unknown() {
        assert_eq!(NodeKind::from_name("MULInst"), NodeKind::Unknown);
        assert_eq!(NodeKind::from_name(""), NodeKind::Unknown);
        assert_eq!(NodeKind::from_name("begininst"), NodeKind::Unknown);
        assert_eq!(EdgeKind::from_name("data"), EdgeKind::Unknown);
        assert_eq!(
            DependencyEdgeKind::from_name("invalidates"),
            DependencyEdgeKind::Unknown
        );
    }

    #[test]
    fn test_edge_kind_names() {
        assert_eq!(EdgeKind::from_name("bb"), EdgeKind::BasicBlock);
        assert_eq!(EdgeKind::from_name("cfg"), EdgeKind::ControlFlow);
        assert_eq!(EdgeKind::from_name("op"), EdgeKind::Operand);
        assert_eq!(EdgeKind::from_name("sched"), EdgeKind::Schedule);
        assert_eq!(EdgeKind::ControlFlow.to_string(), "cfg");
        assert!(EdgeKind::BasicBlock.is_cfg());
        assert!(!EdgeKind::Operand.is_cfg());
    }

    #[test]
    fn test_dependency_edge_kind_names() {
        let expected = [
            ("requires", DependencyEdgeKind::Requires),
            ("provides", DependencyEdgeKind::Provides),
            ("modifies", DependencyEdgeKind::Modifies),
            ("schedule-before", DependencyEdgeKind::ScheduleBefore),
            ("schedule-after", DependencyEdgeKind::ScheduleAfter),
            ("schedule-imm-before", DependencyEdgeKind::ScheduleImmediateBefore),
            ("schedule-imm-after", DependencyEdgeKind::ScheduleImmediateAfter),
        ];
        for (name, kind) in expected {
            assert_eq!(DependencyEdgeKind::from_name(name), kind);
            assert_eq!(kind.as_str(), name);
        }
        for kind in DependencyEdgeKind::iter() {
            assert_eq!(DependencyEdgeKind::from_name(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_control_kinds() {
        let control: Vec<_> = NodeKind::iter().filter(|k| k.is_control()).collect();
        assert_eq!(
            control,
            vec![NodeKind::Begin, NodeKind::Goto, NodeKind::If, NodeKind::Return]
        );
    }

    #[test]
    fn test_schedule_reversal() {
        assert_eq!(
            DependencyEdgeKind::ScheduleBefore.reversed(),
            Some(DependencyEdgeKind::ScheduleAfter)
        );
        assert_eq!(
            DependencyEdgeKind::ScheduleImmediateBefore.reversed(),
            Some(DependencyEdgeKind::ScheduleImmediateAfter)
        );
        assert_eq!(DependencyEdgeKind::ScheduleAfter.reversed(), None);
        assert_eq!(DependencyEdgeKind::Requires.reversed(), None);
    }

    #[test]
    fn test_builders_derive_kind() {
        let node = HirNode::new(3, "RETURNInst").with_basic_block(1).with_operands([2]);
        assert_eq!(node.kind, NodeKind::Return);
        assert_eq!(node.operands, vec![NodeId(2)]);

        let edge = HirEdge::new(1, 2, "cfg").with_branch(true);
        assert_eq!(edge.kind, EdgeKind::ControlFlow);
        assert_eq!(edge.true_branch, Some(true));
    }
}
