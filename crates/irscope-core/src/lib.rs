//! Graph construction and transformation core for compiler IR dumps.
//!
//! Raw dump records ([`ir`]) are turned into display graphs ([`display`]) by one
//! generic pipeline ([`graph_builder`]) configured per view ([`views`]).
pub mod collapse;
pub mod descriptor;
pub mod display;
pub mod filter;
pub mod graph_builder;
pub mod grouping;
pub mod ir;
pub mod load;
pub mod method;
pub mod style;
pub mod traversal;
pub mod views;

pub use display::{
    ArrowStyle, BuildDiagnostics, Color, DisplayEdge, DisplayGraph, DisplayNode, LegendGraph,
};
pub use graph_builder::{
    BlockSummary, BuildStrategy, CollapsePolicy, GraphBuilder, GraphEdgeRecord, GraphNodeRecord,
    RootSelector,
};
pub use ir::{
    DependencyEdge, DependencyEdgeKind, DependencyGraph, DependencyNode, EdgeKind, HirEdge,
    HirGraph, HirNode, LirGraph, MachineInstruction, NodeId, NodeKind, OptimizedMethod, Pass,
};
pub use irscope_error::{Error, ErrorKind, Result};
pub use views::{
    CfgViewOptions, DependencyViewOptions, DetailViewOptions, LirView, MachineBlock,
    MachineBlockEdge, ViewKind,
};
