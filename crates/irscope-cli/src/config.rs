//! `irscope.toml`: default view, output format and view toggles.
//!
//! ```toml
//! view = "detail"
//! format = "json"
//!
//! [cfg]
//! collapse_blocks = false
//!
//! [dependency]
//! only_enabled = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use irscope_core::{CfgViewOptions, DependencyViewOptions, DetailViewOptions};
use irscope_error::{Error, Result};

use crate::options::{CfgArgs, DependencyArgs, DetailArgs};

pub const CONFIG_FILE_NAME: &str = "irscope.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CfgSection {
    pub collapse_blocks: Option<bool>,
    pub branch_labels: Option<bool>,
    pub backedges: Option<bool>,
    pub levels: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetailSection {
    pub hide_source_states: Option<bool>,
    pub hide_floating: Option<bool>,
    pub backedges: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DependencySection {
    pub group_edges: Option<bool>,
    pub only_enabled: Option<bool>,
    pub hide_requires: Option<bool>,
    pub hide_provides: Option<bool>,
    pub hide_modifies: Option<bool>,
    pub hide_schedule: Option<bool>,
    pub canonical_schedule: Option<bool>,
    pub levels: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IrscopeConfig {
    pub view: Option<String>,
    pub format: Option<String>,
    pub ignore_printers: Option<bool>,
    pub cfg: CfgSection,
    pub detail: DetailSection,
    pub dependency: DependencySection,
}

impl IrscopeConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| {
            Error::config_invalid(err.message().to_string())
                .with_operation("config::parse")
                .set_source(err)
        })
    }

    pub fn cfg_options(&self) -> CfgViewOptions {
        let section = CfgArgs {
            collapse_blocks: self.cfg.collapse_blocks,
            branch_labels: self.cfg.branch_labels,
            backedges: self.cfg.backedges,
            levels: self.cfg.levels,
        };
        section.apply(CfgViewOptions::default())
    }

    pub fn detail_options(&self) -> DetailViewOptions {
        let section = DetailArgs {
            hide_source_states: self.detail.hide_source_states,
            hide_floating: self.detail.hide_floating,
            backedges: None,
        };
        section.apply(DetailViewOptions::default(), self.detail.backedges)
    }

    pub fn dependency_options(&self) -> DependencyViewOptions {
        let section = DependencyArgs {
            group_edges: self.dependency.group_edges,
            only_enabled: self.dependency.only_enabled,
            hide_requires: self.dependency.hide_requires,
            hide_provides: self.dependency.hide_provides,
            hide_modifies: self.dependency.hide_modifies,
            hide_schedule: self.dependency.hide_schedule,
            canonical_schedule: self.dependency.canonical_schedule,
            levels: None,
        };
        section.apply(DependencyViewOptions::default(), self.dependency.levels)
    }
}

/// Read the config. An explicit path must exist; otherwise `irscope.toml` in
/// `dir` is used when present, and the defaults when not.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<IrscopeConfig> {
    let path: PathBuf = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(Error::file_not_found(path.display().to_string())
                    .with_operation("config::load"));
            }
            path.to_path_buf()
        }
        None => {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                tracing::debug!(dir = %dir.display(), "no config file, using defaults");
                return Ok(IrscopeConfig::default());
            }
            candidate
        }
    };

    let text = std::fs::read_to_string(&path)
        .map_err(|err| Error::from(err).with_context("path", path.display().to_string()))?;
    let config = IrscopeConfig::parse(&text)
        .map_err(|err| err.with_context("path", path.display().to_string()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use irscope_error::ErrorKind;
    use pretty_assertions::assert_eq;
    use textwrap::dedent;

    #[test]
    fn test_parse_sections() {
        let config = IrscopeConfig::parse(&dedent(
            r#"
            view = "deps"

            [cfg]
            collapse_blocks = false

            [dependency]
            only_enabled = false
            levels = false
            "#,
        ))
        .unwrap();

        assert_eq!(config.view.as_deref(), Some("deps"));
        assert!(!config.cfg_options().collapse_blocks);
        assert!(config.cfg_options().mark_backedges);
        let deps = config.dependency_options();
        assert!(!deps.only_enabled);
        assert!(!deps.assign_levels);
        assert!(deps.group_edges);
        assert_eq!(config.detail_options(), DetailViewOptions::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = IrscopeConfig::parse("[cfg]\ncollapse = true\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.source_ref().is_some());
    }

    #[test]
    fn test_missing_default_file_gives_defaults() {
        let dir = std::env::temp_dir().join("irscope-config-test-missing");
        let config = load_config(None, &dir).unwrap();
        assert_eq!(config, IrscopeConfig::default());

        let err = load_config(Some(&dir.join("nope.toml")), &dir).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }
}
