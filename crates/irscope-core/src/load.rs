//! Decoding of the compiler's JSON dump into the typed model.
//!
//! The wire structs mirror the dump layout field for field and stay private;
//! kinds are mapped through the closed tables in [`crate::ir`], so a dump with
//! unfamiliar instruction or edge names still loads.
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use irscope_error::{Error, Result};

use crate::ir::{
    DependencyEdge, DependencyEdgeKind, DependencyGraph, DependencyNode, EdgeKind, HirEdge,
    HirGraph, HirNode, LirGraph, MachineInstruction, NodeId, NodeKind, OptimizedMethod, Pass,
};

#[derive(Deserialize)]
struct WireMethod {
    #[serde(default)]
    class: String,
    #[serde(default)]
    method: String,
    #[serde(default)]
    desc: String,
    #[serde(rename = "passDependencyGraph", default)]
    dependency_graph: WireDependencyGraph,
    #[serde(default)]
    passes: Vec<WirePass>,
}

#[derive(Deserialize, Default)]
struct WireDependencyGraph {
    #[serde(default)]
    nodes: Vec<WireDependencyNode>,
    #[serde(default)]
    edges: Vec<WireEdge>,
}

#[derive(Deserialize)]
struct WireDependencyNode {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    pass: Flag,
    #[serde(default)]
    artifact: Flag,
    #[serde(default = "Flag::set")]
    enabled: Flag,
}

/// Dependency node booleans come either as JSON booleans or as the strings
/// `"true"`/`"false"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

impl Default for Flag {
    fn default() -> Self {
        Flag::Bool(false)
    }
}

impl Flag {
    fn set() -> Self {
        Flag::Bool(true)
    }

    fn value(&self) -> bool {
        match self {
            Flag::Bool(value) => *value,
            Flag::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        }
    }
}

#[derive(Deserialize)]
struct WirePass {
    #[serde(default)]
    name: String,
    #[serde(default)]
    time: f64,
    #[serde(rename = "HIR")]
    hir: Option<WireHirGraph>,
    #[serde(rename = "LIR")]
    lir: Option<WireLirGraph>,
}

#[derive(Deserialize)]
struct WireHirGraph {
    #[serde(default)]
    nodes: Vec<WireHirNode>,
    #[serde(default)]
    edges: Vec<WireEdge>,
}

#[derive(Deserialize)]
struct WireHirNode {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    type_name: String,
    #[serde(rename = "BB")]
    basic_block: Option<i64>,
    #[serde(default)]
    root: Option<bool>,
    #[serde(default)]
    operands: Option<Vec<i64>>,
    value: Option<f64>,
    condition: Option<String>,
    #[serde(rename = "sideEffects")]
    side_effects: Option<bool>,
}

/// Edge shape shared by HIR and dependency graphs.
#[derive(Deserialize)]
struct WireEdge {
    from: i64,
    to: i64,
    #[serde(rename = "type", default)]
    type_name: String,
    #[serde(rename = "trueBranch")]
    true_branch: Option<bool>,
}

#[derive(Deserialize)]
struct WireLirGraph {
    #[serde(default)]
    instructions: Vec<WireInstruction>,
}

#[derive(Deserialize)]
struct WireInstruction {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    type_name: String,
    #[serde(rename = "BB", default)]
    block_label: String,
    result: Option<String>,
    operands: Option<Vec<String>>,
    successors: Option<Vec<String>>,
}

impl From<WireHirNode> for HirNode {
    fn from(wire: WireHirNode) -> Self {
        HirNode {
            id: NodeId(wire.id),
            kind: NodeKind::from_name(&wire.name),
            name: wire.name,
            type_name: wire.type_name,
            basic_block: wire.basic_block,
            is_root: wire.root.unwrap_or(false),
            operands: wire
                .operands
                .unwrap_or_default()
                .into_iter()
                .map(NodeId)
                .collect(),
            constant_value: wire.value,
            condition: wire.condition,
            has_side_effects: wire.side_effects,
        }
    }
}

impl From<WireEdge> for HirEdge {
    fn from(wire: WireEdge) -> Self {
        HirEdge {
            from: NodeId(wire.from),
            to: NodeId(wire.to),
            kind: EdgeKind::from_name(&wire.type_name),
            type_name: wire.type_name,
            true_branch: wire.true_branch,
        }
    }
}

impl From<WireEdge> for DependencyEdge {
    fn from(wire: WireEdge) -> Self {
        DependencyEdge {
            from: NodeId(wire.from),
            to: NodeId(wire.to),
            kind: DependencyEdgeKind::from_name(&wire.type_name),
            type_name: wire.type_name,
        }
    }
}

impl From<WireDependencyNode> for DependencyNode {
    fn from(wire: WireDependencyNode) -> Self {
        DependencyNode {
            id: NodeId(wire.id),
            name: wire.name,
            is_pass: wire.pass.value(),
            is_artifact: wire.artifact.value(),
            enabled: wire.enabled.value(),
        }
    }
}

impl From<WireInstruction> for MachineInstruction {
    fn from(wire: WireInstruction) -> Self {
        MachineInstruction {
            id: wire.id,
            name: wire.name,
            type_name: wire.type_name,
            block_label: wire.block_label,
            operands: wire.operands.unwrap_or_default(),
            result: wire.result,
            successors: wire.successors.unwrap_or_default(),
        }
    }
}

impl WirePass {
    fn into_pass(self, index: usize) -> Pass {
        Pass {
            index,
            name: self.name,
            elapsed_nanos: nanos(self.time),
            hir: self.hir.map(|hir| HirGraph {
                nodes: hir.nodes.into_iter().map(HirNode::from).collect(),
                edges: hir.edges.into_iter().map(HirEdge::from).collect(),
            }),
            lir: self.lir.map(|lir| LirGraph {
                instructions: lir
                    .instructions
                    .into_iter()
                    .map(MachineInstruction::from)
                    .collect(),
            }),
        }
    }
}

fn nanos(time: f64) -> u64 {
    if time.is_finite() && time > 0.0 {
        time.round() as u64
    } else {
        0
    }
}

impl From<WireMethod> for OptimizedMethod {
    fn from(wire: WireMethod) -> Self {
        OptimizedMethod {
            class_name: wire.class,
            method_name: wire.method,
            descriptor: wire.desc,
            dependency_graph: DependencyGraph {
                nodes: wire
                    .dependency_graph
                    .nodes
                    .into_iter()
                    .map(DependencyNode::from)
                    .collect(),
                edges: wire
                    .dependency_graph
                    .edges
                    .into_iter()
                    .map(DependencyEdge::from)
                    .collect(),
            },
            passes: wire
                .passes
                .into_iter()
                .enumerate()
                .map(|(index, pass)| pass.into_pass(index))
                .collect(),
        }
    }
}

fn parse_error(err: serde_json::Error) -> Error {
    Error::parse_failed(err.to_string())
        .with_context("line", err.line().to_string())
        .with_context("column", err.column().to_string())
        .set_source(err)
}

/// Decode one method dump from JSON text.
pub fn from_json(text: &str) -> Result<OptimizedMethod> {
    let wire: WireMethod =
        serde_json::from_str(text).map_err(|e| parse_error(e).with_operation("load::from_json"))?;
    let method = OptimizedMethod::from(wire);
    tracing::debug!(
        class = %method.class_name,
        method = %method.method_name,
        passes = method.passes.len(),
        "decoded method dump"
    );
    Ok(method)
}

/// Decode one method dump from a reader.
pub fn from_reader<R: Read>(reader: R) -> Result<OptimizedMethod> {
    let wire: WireMethod = serde_json::from_reader(reader)
        .map_err(|e| parse_error(e).with_operation("load::from_reader"))?;
    Ok(OptimizedMethod::from(wire))
}

/// Read and decode a dump file.
pub fn from_path(path: impl AsRef<Path>) -> Result<OptimizedMethod> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()).with_operation("load::from_path"));
    }
    let text = std::fs::read_to_string(path).map_err(|e| {
        Error::from(e)
            .with_operation("load::from_path")
            .with_context("path", path.display().to_string())
    })?;
    from_json(&text).map_err(|e| {
        e.with_operation("load::from_path")
            .with_context("path", path.display().to_string())
    })
}
