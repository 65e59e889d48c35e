//! View pipeline: select pass → build view → query → render.

use std::fmt::Write;

use irscope_core::views::{
    cfg_legend, cfg_view, dependency_legend, dependency_view, detail_view, lir_view,
};
use irscope_core::{DisplayGraph, LegendGraph, NodeId, OptimizedMethod, Pass, ViewKind};
use irscope_error::{Error, Result};
use irscope_render::{OutputFormat, RenderOptions, focus, render, search_by_label};

use crate::IrscopeOptions;

fn carries_view(pass: &Pass, view: ViewKind) -> bool {
    match view {
        ViewKind::Cfg | ViewKind::Detail => pass.has_hir(),
        ViewKind::Lir => pass.has_lir(),
        ViewKind::Dependency => true,
    }
}

/// Pass a view is built from. An explicit selector is an index or a name;
/// without one the last pass carrying the view's IR is used. The dependency
/// view is method-wide and has no pass.
pub fn select_pass<'m>(
    method: &'m OptimizedMethod,
    view: ViewKind,
    selector: Option<&str>,
) -> Result<Option<&'m Pass>> {
    if !view.needs_pass() {
        return Ok(None);
    }
    match selector {
        Some(selector) => method.find_pass(selector).map(Some),
        None => method
            .passes
            .iter()
            .rev()
            .find(|p| carries_view(p, view))
            .map(Some)
            .ok_or_else(|| {
                Error::view_unavailable(view.to_string(), "any")
                    .with_operation("pipeline::select_pass")
            }),
    }
}

fn unavailable(view: ViewKind, pass: &Pass) -> Error {
    Error::view_unavailable(view.to_string(), pass.name.clone())
        .with_operation("pipeline::render_view")
}

fn render_options(method: &OptimizedMethod, opts: &IrscopeOptions) -> RenderOptions {
    let name = match method.method_name.is_empty() {
        true => "irscope",
        false => method.method_name.as_str(),
    };
    RenderOptions::new()
        .with_format(opts.format)
        .with_graph_name(name)
        .with_cluster_containers(opts.cluster)
}

/// Build the selected view and render it, or its legend, or the search hits.
pub fn render_view(method: &OptimizedMethod, opts: &IrscopeOptions) -> Result<String> {
    let pass = select_pass(method, opts.view, opts.pass.as_deref())?;
    if let Some(pass) = pass {
        tracing::info!(pass = %pass.name, index = pass.index, view = %opts.view, "building view");
    }
    let render_options = render_options(method, opts);

    match (opts.view, pass) {
        (ViewKind::Dependency, _) => finish(
            dependency_view(method, &opts.dependency),
            dependency_legend(),
            opts,
            &render_options,
        ),
        (ViewKind::Cfg, Some(pass)) => {
            let graph = cfg_view(pass, &opts.cfg).ok_or_else(|| unavailable(opts.view, pass))?;
            finish(graph, cfg_legend(), opts, &render_options)
        }
        (ViewKind::Detail, Some(pass)) => {
            let graph =
                detail_view(pass, &opts.detail).ok_or_else(|| unavailable(opts.view, pass))?;
            finish(graph, cfg_legend(), opts, &render_options)
        }
        (ViewKind::Lir, Some(pass)) => {
            let view = lir_view(pass).ok_or_else(|| unavailable(opts.view, pass))?;
            let plain = opts.format == OutputFormat::Text
                && !opts.legend
                && opts.search.is_none()
                && opts.focus.is_none();
            if plain {
                return Ok(format!("{}\n", view.listing));
            }
            finish(view.graph, cfg_legend(), opts, &render_options)
        }
        (view, None) => Err(Error::unexpected(format!("no pass selected for the {} view", view))
            .with_operation("pipeline::render_view")),
    }
}

fn finish<N: Clone, E: Clone>(
    graph: DisplayGraph<N, E>,
    legend: LegendGraph,
    opts: &IrscopeOptions,
    render_options: &RenderOptions,
) -> Result<String> {
    if opts.legend {
        return render(&legend, render_options);
    }

    let diagnostics = &graph.diagnostics;
    if !diagnostics.is_clean() {
        tracing::warn!(
            skipped_collapses = diagnostics.skipped_collapses.len(),
            dropped_edges = diagnostics.dropped_edges,
            missing_root = diagnostics.missing_root,
            "graph built with repairs"
        );
    }

    if let Some(needle) = &opts.search {
        let mut output = String::new();
        for id in search_by_label(&graph, needle) {
            if let Some(node) = graph.node(id) {
                let first = node.label.lines().next().unwrap_or_default();
                let _ = writeln!(output, "{}: {}", id, first);
            }
        }
        return Ok(output);
    }

    match opts.focus {
        Some(id) => {
            let id = NodeId(id);
            if graph.node(id).is_none() {
                return Err(Error::invalid_argument(format!("no node with id {} in this view", id))
                    .with_operation("pipeline::focus"));
            }
            render(&focus(&graph, id), render_options)
        }
        None => render(&graph, render_options),
    }
}
