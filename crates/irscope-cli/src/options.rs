//! Shared CLI options for the view toggles.
//!
//! Every toggle is optional: a flag given on the command line overrides the
//! value from `irscope.toml`, which overrides the built-in default. A bare
//! flag such as `--hide-floating` means `true`.

use clap::Args;

use irscope_core::{CfgViewOptions, DependencyViewOptions, DetailViewOptions};

/// Toggles of the control flow view.
#[derive(Args, Debug, Clone, Default)]
pub struct CfgArgs {
    /// Show one node per basic block.
    #[arg(long = "collapse-blocks", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub collapse_blocks: Option<bool>,

    /// Label conditional edges with T/F.
    #[arg(long = "branch-labels", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub branch_labels: Option<bool>,

    /// Mark and color loop backedges. Also applies to the detail view unless
    /// `--detail-backedges` is given.
    #[arg(long = "backedges", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub backedges: Option<bool>,

    /// Assign hierarchical levels from the root. Also applies to the pass
    /// dependency view unless `--dependency-levels` is given.
    #[arg(long = "levels", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub levels: Option<bool>,
}

/// Toggles of the detail view.
#[derive(Args, Debug, Clone, Default)]
pub struct DetailArgs {
    /// Hide SourceStateInst nodes.
    #[arg(long = "hide-source-states", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub hide_source_states: Option<bool>,

    /// Hide instructions not pinned to a basic block.
    #[arg(long = "hide-floating", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub hide_floating: Option<bool>,

    /// Mark loop backedges in the detail view.
    #[arg(id = "detail_backedges", long = "detail-backedges", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub backedges: Option<bool>,
}

/// Toggles of the pass dependency view.
#[derive(Args, Debug, Clone, Default)]
pub struct DependencyArgs {
    /// Merge parallel edges between two nodes.
    #[arg(long = "group-edges", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub group_edges: Option<bool>,

    /// Drop disabled passes instead of drawing them dashed.
    #[arg(long = "only-enabled", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub only_enabled: Option<bool>,

    #[arg(long = "hide-requires", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub hide_requires: Option<bool>,

    #[arg(long = "hide-provides", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub hide_provides: Option<bool>,

    #[arg(long = "hide-modifies", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub hide_modifies: Option<bool>,

    #[arg(long = "hide-schedule", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub hide_schedule: Option<bool>,

    /// Point every schedule edge the `after` way.
    #[arg(long = "canonical-schedule", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub canonical_schedule: Option<bool>,

    /// Level the pass dependency graph from the last pass.
    #[arg(id = "dependency_levels", long = "dependency-levels", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub levels: Option<bool>,
}

/// All view toggles, flattened into one command.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    #[command(flatten)]
    pub cfg: CfgArgs,

    #[command(flatten)]
    pub detail: DetailArgs,

    #[command(flatten)]
    pub dependency: DependencyArgs,
}

impl CfgArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collapse_blocks(mut self, collapse: bool) -> Self {
        self.collapse_blocks = Some(collapse);
        self
    }

    pub fn with_backedges(mut self, backedges: bool) -> Self {
        self.backedges = Some(backedges);
        self
    }

    /// Apply the given toggles on top of `base`.
    pub fn apply(&self, base: CfgViewOptions) -> CfgViewOptions {
        CfgViewOptions {
            collapse_blocks: self.collapse_blocks.unwrap_or(base.collapse_blocks),
            show_branch_labels: self.branch_labels.unwrap_or(base.show_branch_labels),
            mark_backedges: self.backedges.unwrap_or(base.mark_backedges),
            assign_levels: self.levels.unwrap_or(base.assign_levels),
        }
    }
}

impl DetailArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hide_floating(mut self, hide: bool) -> Self {
        self.hide_floating = Some(hide);
        self
    }

    pub fn with_backedges(mut self, backedges: bool) -> Self {
        self.backedges = Some(backedges);
        self
    }

    /// Apply the given toggles on top of `base`. Without `--detail-backedges`
    /// the CFG `--backedges` flag is used.
    pub fn apply(&self, base: DetailViewOptions, backedges: Option<bool>) -> DetailViewOptions {
        DetailViewOptions {
            hide_source_states: self.hide_source_states.unwrap_or(base.hide_source_states),
            hide_floating: self.hide_floating.unwrap_or(base.hide_floating),
            mark_backedges: self.backedges.or(backedges).unwrap_or(base.mark_backedges),
        }
    }
}

impl DependencyArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_only_enabled(mut self, only_enabled: bool) -> Self {
        self.only_enabled = Some(only_enabled);
        self
    }

    pub fn with_group_edges(mut self, group_edges: bool) -> Self {
        self.group_edges = Some(group_edges);
        self
    }

    pub fn with_levels(mut self, levels: bool) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Apply the given toggles on top of `base`. Without `--dependency-levels`
    /// the CFG `--levels` flag is used.
    pub fn apply(&self, base: DependencyViewOptions, levels: Option<bool>) -> DependencyViewOptions {
        DependencyViewOptions {
            group_edges: self.group_edges.unwrap_or(base.group_edges),
            only_enabled: self.only_enabled.unwrap_or(base.only_enabled),
            hide_requires: self.hide_requires.unwrap_or(base.hide_requires),
            hide_provides: self.hide_provides.unwrap_or(base.hide_provides),
            hide_modifies: self.hide_modifies.unwrap_or(base.hide_modifies),
            hide_schedule: self.hide_schedule.unwrap_or(base.hide_schedule),
            canonical_schedule: self.canonical_schedule.unwrap_or(base.canonical_schedule),
            assign_levels: self.levels.or(levels).unwrap_or(base.assign_levels),
        }
    }
}
