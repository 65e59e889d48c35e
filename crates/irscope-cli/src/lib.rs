//! irscope command-line interface.
//!
pub mod config;
pub mod options;
pub mod output;
pub mod pipeline;

use std::path::PathBuf;

use irscope_core::load::from_path;
use irscope_core::{CfgViewOptions, DependencyViewOptions, DetailViewOptions, ViewKind};
use irscope_error::{Error, Result};
use irscope_render::OutputFormat;

pub use config::{IrscopeConfig, load_config};
pub use options::{CfgArgs, DependencyArgs, DetailArgs, ViewArgs};
pub use output::{pass_listing, write_output};
pub use pipeline::{render_view, select_pass};

/// Options for running irscope, with command line and config already merged.
#[derive(Debug, Clone)]
pub struct IrscopeOptions {
    pub file: PathBuf,
    pub view: ViewKind,
    /// Pass index or name; defaults to the last pass carrying the view's IR.
    pub pass: Option<String>,
    pub format: OutputFormat,
    pub cfg: CfgViewOptions,
    pub detail: DetailViewOptions,
    pub dependency: DependencyViewOptions,
    /// Render the view's legend instead of the view.
    pub legend: bool,
    /// Print nodes whose label contains this text.
    pub search: Option<String>,
    /// Hide everything outside this node's neighborhood.
    pub focus: Option<i64>,
    pub list_passes: bool,
    pub ignore_printers: bool,
    /// Draw DOT clusters for nodes sharing a container.
    pub cluster: bool,
}

impl IrscopeOptions {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            view: ViewKind::default(),
            pass: None,
            format: OutputFormat::default(),
            cfg: CfgViewOptions::default(),
            detail: DetailViewOptions::default(),
            dependency: DependencyViewOptions::default(),
            legend: false,
            search: None,
            focus: None,
            list_passes: false,
            ignore_printers: false,
            cluster: true,
        }
    }

    pub fn with_view(mut self, view: ViewKind) -> Self {
        self.view = view;
        self
    }

    pub fn with_pass(mut self, pass: impl Into<String>) -> Self {
        self.pass = Some(pass.into());
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

pub fn parse_view(name: &str) -> Result<ViewKind> {
    name.parse().map_err(|_| {
        Error::invalid_argument(format!(
            "unknown view '{}', use 'cfg', 'detail', 'lir' or 'deps'",
            name
        ))
        .with_operation("cli::parse_view")
    })
}

pub fn parse_format(name: &str) -> Result<OutputFormat> {
    name.parse().map_err(|_| {
        Error::invalid_argument(format!(
            "unknown format '{}', use 'dot', 'json', 'layout' or 'text'",
            name
        ))
        .with_operation("cli::parse_format")
    })
}

/// Main entry point: load the dump and produce the requested output.
pub fn run_main(opts: &IrscopeOptions) -> Result<String> {
    let method = from_path(&opts.file)?;
    tracing::info!(
        class = %method.class_name,
        method = %method.method_name,
        passes = method.passes.len(),
        "loaded dump"
    );

    if opts.list_passes {
        return Ok(pass_listing(&method, opts.ignore_printers));
    }
    render_view(&method, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use irscope_error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_view("deps").unwrap(), ViewKind::Dependency);
        assert_eq!(parse_format("layout").unwrap(), OutputFormat::Layout);
        assert_eq!(parse_view("tree").unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(parse_format("svg").unwrap_err().kind(), ErrorKind::InvalidArgument);
    }
}
