//! Visual attributes derived from node and edge kinds.
//!
//! Everything here is a pure function of the raw record so views can share it.
use crate::ir::{DependencyEdgeKind, DependencyNode, EdgeKind, HirEdge, HirNode, NodeId, NodeKind};

pub const BACKEDGE_COLOR: &str = "#EE0000";

pub const IF_COLOR: &str = "#A1EC76";
pub const RETURN_COLOR: &str = "#FFA807";
pub const DEFAULT_NODE_COLOR: &str = "#97C2FC";
pub const GOTO_INSTRUCTION_COLOR: &str = "#C7E2FC";
pub const PHI_COLOR: &str = "#FFCA66";

pub const TRUE_BRANCH_COLOR: &str = "#5aa52b";
pub const FALSE_BRANCH_COLOR: &str = "#7C29F0";
pub const CONTROL_FLOW_COLOR: &str = "#87B2EC";
pub const OPERAND_COLOR: &str = "#808080";
pub const SCHEDULE_COLOR: &str = "#FDBFC9";
pub const UNKNOWN_EDGE_COLOR: &str = "#000000";

/// Background color of a HIR node. In block mode a node stands for a whole
/// basic block and `GOTOInst` blocks use the regular node color.
pub fn node_color(kind: NodeKind, block_mode: bool) -> &'static str {
    match kind {
        NodeKind::Goto if !block_mode => GOTO_INSTRUCTION_COLOR,
        NodeKind::If => IF_COLOR,
        NodeKind::Return => RETURN_COLOR,
        NodeKind::Phi => PHI_COLOR,
        _ => DEFAULT_NODE_COLOR,
    }
}

pub fn edge_color(edge: &HirEdge) -> &'static str {
    match edge.kind {
        EdgeKind::ControlFlow => match edge.true_branch {
            Some(true) => TRUE_BRANCH_COLOR,
            Some(false) => FALSE_BRANCH_COLOR,
            None => CONTROL_FLOW_COLOR,
        },
        EdgeKind::Operand => OPERAND_COLOR,
        EdgeKind::Schedule => SCHEDULE_COLOR,
        EdgeKind::BasicBlock | EdgeKind::Unknown => UNKNOWN_EDGE_COLOR,
    }
}

pub fn edge_dashed(kind: EdgeKind) -> bool {
    kind == EdgeKind::BasicBlock
}

/// `T`/`F` for conditional edges.
pub fn branch_label(edge: &HirEdge) -> Option<&'static str> {
    edge.true_branch.map(|taken| if taken { "T" } else { "F" })
}

/// Edge label in the detail view: branch marker for conditional control flow,
/// the kind name otherwise.
pub fn edge_kind_label(edge: &HirEdge) -> &'static str {
    if edge.kind == EdgeKind::ControlFlow {
        if let Some(label) = branch_label(edge) {
            return label;
        }
    }
    match edge.kind {
        EdgeKind::Unknown => "unknown",
        kind => kind.as_str(),
    }
}

pub fn condition_symbol(condition: Option<&str>) -> &'static str {
    match condition {
        Some("GE") => ">=",
        Some("GT") => ">",
        Some("LE") => "<=",
        Some("LT") => "<",
        Some("EQ") => "==",
        Some("NE") => "!=",
        _ => "?",
    }
}

/// Integral values print without a fractional part.
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn operand_ref(operands: &[NodeId], index: usize) -> String {
    match operands.get(index) {
        Some(id) => format!("#{}", id),
        None => "#?".to_string(),
    }
}

fn comparison(node: &HirNode) -> String {
    format!(
        "{} {} {}",
        operand_ref(&node.operands, 0),
        condition_symbol(node.condition.as_deref()),
        operand_ref(&node.operands, 1)
    )
}

fn operand_list(operands: &[NodeId]) -> String {
    operands
        .iter()
        .map(|id| format!("#{}", id))
        .collect::<Vec<_>>()
        .join(",")
}

/// Full instruction label, e.g. `[7]: IFInst[#3 < #5]`.
pub fn node_label(node: &HirNode) -> String {
    let mut label = format!("[{}]: {}", node.id, node.name);
    if node.kind == NodeKind::Const {
        if let Some(value) = node.constant_value {
            label.push_str(&format!(": {}", format_value(value)));
        }
    }
    if !node.operands.is_empty() {
        let operands = match node.kind {
            NodeKind::If | NodeKind::IfAssumption => comparison(node),
            _ => operand_list(&node.operands),
        };
        label.push_str(&format!("[{}]", operands));
    }
    label
}

/// Short label used as the second line of a collapsed basic block.
pub fn simple_node_label(node: &HirNode) -> String {
    match node.kind {
        NodeKind::Const => match node.constant_value {
            Some(value) => format!("Const: {}", format_value(value)),
            None => "Const".to_string(),
        },
        NodeKind::Return => match node.operands.first() {
            Some(id) => format!("RETURN #{}", id),
            None => "RETURN".to_string(),
        },
        NodeKind::If => format!("IF [{}]", comparison(node)),
        NodeKind::IfAssumption => format!("IFAssumption [{}]", comparison(node)),
        _ if node.operands.is_empty() => node.name.clone(),
        _ => format!("{} {}", node.name, operand_list(&node.operands)),
    }
}

/// Type name without the `TypeID` suffix the compiler appends.
pub fn display_type(type_name: &str) -> String {
    type_name.replace("TypeID", "")
}

pub const DISABLED_DEPENDENCY_COLOR: &str = "#DCDCDC";
pub const PASS_ARTIFACT_COLOR: &str = "#BA55D3";
pub const PASS_COLOR: &str = "#87CEEB";
pub const ARTIFACT_COLOR: &str = "#8FBC8F";

pub const MODIFIES_COLOR: &str = "#DC143C";
pub const SCHEDULE_DEPENDENCY_COLOR: &str = "#66CDAA";
pub const SCHEDULE_IMMEDIATE_COLOR: &str = "#FF7F50";
pub const DEPENDENCY_EDGE_COLOR: &str = "#A9A9A9";

pub fn dependency_node_color(node: &DependencyNode) -> &'static str {
    if !node.enabled {
        DISABLED_DEPENDENCY_COLOR
    } else if node.is_pass && node.is_artifact {
        PASS_ARTIFACT_COLOR
    } else if node.is_pass {
        PASS_COLOR
    } else {
        ARTIFACT_COLOR
    }
}

pub fn dependency_edge_color(kind: DependencyEdgeKind) -> &'static str {
    match kind {
        DependencyEdgeKind::Modifies => MODIFIES_COLOR,
        DependencyEdgeKind::ScheduleBefore | DependencyEdgeKind::ScheduleAfter => {
            SCHEDULE_DEPENDENCY_COLOR
        }
        DependencyEdgeKind::ScheduleImmediateBefore
        | DependencyEdgeKind::ScheduleImmediateAfter => SCHEDULE_IMMEDIATE_COLOR,
        _ => DEPENDENCY_EDGE_COLOR,
    }
}
