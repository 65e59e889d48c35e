//! Output generation: pass listing and writing results.

use std::fmt::Write;
use std::path::Path;

use irscope_core::OptimizedMethod;
use irscope_error::{Error, Result};

/// Method header followed by one row per pass: index, display name, time in
/// milliseconds, share of the method total and the IR the pass carries.
pub fn pass_listing(method: &OptimizedMethod, ignore_printers: bool) -> String {
    let total = method.total_nanos();
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{} {}",
        method.class_name,
        method.display_signature()
    );

    let passes: Vec<_> = method.visible_passes(ignore_printers).collect();
    let width = passes
        .iter()
        .map(|p| p.display_name().chars().count())
        .max()
        .unwrap_or(0);
    for pass in passes {
        let mut ir = Vec::new();
        if pass.has_hir() {
            ir.push("HIR");
        }
        if pass.has_lir() {
            ir.push("LIR");
        }
        let row = format!(
            "{:>3}  {:<width$}  {:>10.3} ms  {:>5.1}%  {}",
            pass.index,
            pass.display_name(),
            pass.elapsed_nanos as f64 / 1_000_000.0,
            pass.time_share(total),
            ir.join(" "),
        );
        let _ = writeln!(output, "{}", row.trim_end());
    }
    output
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    let attach = |err: std::io::Error| {
        Error::from(err)
            .with_operation("output::write")
            .with_context("path", path.display().to_string())
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(attach)?;
    }
    std::fs::write(path, content).map_err(attach)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "output written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use irscope_core::{HirGraph, Pass};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_listing_rows() {
        let method = OptimizedMethod {
            class_name: "Demo".into(),
            method_name: "max".into(),
            descriptor: "(II)I".into(),
            passes: vec![
                Pass {
                    index: 0,
                    name: "SSAConstructionPass".into(),
                    elapsed_nanos: 3_000_000,
                    hir: Some(HirGraph::default()),
                    ..Default::default()
                },
                Pass {
                    index: 1,
                    name: "ListingPrinterPass".into(),
                    elapsed_nanos: 1_000_000,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let listing = pass_listing(&method, false);
        let lines: Vec<_> = listing.lines().collect();
        assert_eq!(lines[0], "Demo int max(int, int)");
        assert_eq!(lines[1], "  0  SSAConstruction       3.000 ms   75.0%  HIR");
        assert_eq!(lines[2], "  1  ListingPrinter        1.000 ms   25.0%");

        let listing = pass_listing(&method, true);
        assert_eq!(listing.lines().count(), 2);
    }
}
