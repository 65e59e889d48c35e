use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use irscope_cli::{
    IrscopeOptions, ViewArgs, load_config, parse_format, parse_view, run_main, write_output,
};
use irscope_error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "irscope",
    about = "irscope: look inside compiler IR dumps",
    version
)]
pub struct Cli {
    /// Compiler dump (JSON) of one optimized method
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: PathBuf,

    /// View to build: 'cfg', 'detail', 'lir' or 'deps'
    #[arg(long, value_name = "VIEW")]
    view: Option<String>,

    /// Pass index or name (default: last pass carrying the view's IR)
    #[arg(short = 'p', long, value_name = "PASS")]
    pass: Option<String>,

    /// Output format: 'dot', 'json', 'layout' or 'text'
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Render the view's legend instead of the view
    #[arg(long, default_value_t = false)]
    legend: bool,

    /// Print nodes whose label contains TEXT (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    search: Option<String>,

    /// Show only this node and its direct neighbors
    #[arg(long, value_name = "NODE_ID", allow_negative_numbers = true)]
    focus: Option<i64>,

    /// List the passes of the dump instead of rendering a view
    #[arg(long = "list-passes", default_value_t = false)]
    list_passes: bool,

    /// Leave printer passes out of the pass list
    #[arg(long = "ignore-printers", default_value_t = false)]
    ignore_printers: bool,

    /// Do not group nodes into DOT clusters
    #[arg(long = "no-clusters", default_value_t = false)]
    no_clusters: bool,

    /// Config file (default: ./irscope.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    toggles: ViewArgs,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

fn options(args: &Cli) -> Result<IrscopeOptions> {
    let cwd = std::env::current_dir()?;
    let config = load_config(args.config.as_deref(), &cwd)?;

    let view = args.view.as_deref().or(config.view.as_deref()).unwrap_or("cfg");
    let format = args.format.as_deref().or(config.format.as_deref()).unwrap_or("dot");
    let toggles = &args.toggles;

    let mut opts = IrscopeOptions::new(&args.file)
        .with_view(parse_view(view)?)
        .with_format(parse_format(format)?);
    opts.pass = args.pass.clone();
    opts.cfg = toggles.cfg.apply(config.cfg_options());
    opts.detail = toggles
        .detail
        .apply(config.detail_options(), toggles.cfg.backedges);
    opts.dependency = toggles
        .dependency
        .apply(config.dependency_options(), toggles.cfg.levels);
    opts.legend = args.legend;
    opts.search = args.search.clone();
    opts.focus = args.focus;
    opts.list_passes = args.list_passes;
    opts.ignore_printers = args.ignore_printers || config.ignore_printers.unwrap_or(false);
    opts.cluster = !args.no_clusters;
    Ok(opts)
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = options(&args)?;
    let output = run_main(&opts)?;
    match &args.output {
        Some(path) => write_output(path, &output)?,
        None => print!("{output}"),
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

pub fn main() {
    let args = Cli::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        tracing::error!(error = %err, "execution failed");
        std::process::exit(if err.kind().is_user_error() { 2 } else { 1 });
    }
}
