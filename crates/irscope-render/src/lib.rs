//! Presentation adapter: turns display graphs into DOT, JSON, layout input or
//! plain text, and answers the front end's search and neighborhood queries.
//!
//! - [`dot`]: DOT output with container clustering
//! - [`layout`]: node sizes and container hints for a layout engine
//! - [`query`]: label search, neighborhood and focus
//! - [`text`]: line-oriented dump
pub mod dot;
pub mod layout;
pub mod query;
pub mod text;

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

use irscope_core::DisplayGraph;
use irscope_error::{Error, Result};

pub use dot::{DotBuilder, render_dot};
pub use layout::{ContainerHint, LayoutEdge, LayoutInput, LayoutNode, layout_input, node_size};
pub use query::{focus, neighborhood, search_by_label};
pub use text::render_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Dot,
    Json,
    Layout,
    Text,
}

/// Options for graph rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Graph name in DOT output.
    pub graph_name: String,
    /// Draw nodes sharing a container inside one DOT cluster.
    pub cluster_containers: bool,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Dot,
            graph_name: "irscope".to_string(),
            cluster_containers: true,
            pretty: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    pub fn with_cluster_containers(mut self, cluster: bool) -> Self {
        self.cluster_containers = cluster;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let encoded = match pretty {
        true => serde_json::to_string_pretty(value),
        false => serde_json::to_string(value),
    };
    encoded.map_err(|err| {
        Error::serialization_failed(err.to_string())
            .with_operation("render::to_json")
            .set_source(err)
    })
}

/// Render a display graph in the requested format.
pub fn render<N, E>(graph: &DisplayGraph<N, E>, options: &RenderOptions) -> Result<String> {
    tracing::debug!(
        format = %options.format,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "rendering graph"
    );
    match options.format {
        OutputFormat::Dot => Ok(render_dot(
            graph,
            &options.graph_name,
            options.cluster_containers,
        )),
        OutputFormat::Json => to_json(graph, options.pretty),
        OutputFormat::Layout => to_json(&layout_input(graph), options.pretty),
        OutputFormat::Text => Ok(render_text(graph)),
    }
}
