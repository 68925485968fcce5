//! Configuration for dux with multi-source loading.
//!
//! Merges settings from defaults, a `dux.config.json` file, `DUX_`
//! environment variables and command-line flags.
//! Priority: CLI > Environment > File > Defaults
//!
//! The result only seeds the initial view state. A `--state` fragment is
//! applied on top, field by field.

mod defaults;
mod loading;
mod tests;

use dux_graph::{LayoutDirection, ViewState};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

pub use defaults::*;
pub use loading::{CONFIG_FILE_NAME, ENV_PREFIX};

/// Dux configuration, loaded from `dux.config.json`, env and flags.
///
/// Keys are snake_case in every source so that `DUX_GROUP_BY_MODULES` and
/// `"group_by_modules"` name the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DuxConfig {
    /// Fold success/error/trigger actions into ports on their epic
    #[serde(default = "default_embed_special_actions")]
    pub embed_special_actions: bool,

    /// Nest nodes in module-path clusters
    #[serde(default = "default_group_by_modules")]
    pub group_by_modules: bool,

    /// Graph flow direction (LR or TB)
    #[serde(default)]
    pub layout_direction: LayoutDirection,

    /// Output format for `dux render`
    #[serde(default)]
    pub format: OutputFormat,

    /// Show module paths with ` › ` separators in terminal output
    #[serde(default = "default_prettify_names")]
    pub prettify_names: bool,
}

impl Default for DuxConfig {
    fn default() -> Self {
        Self {
            embed_special_actions: default_embed_special_actions(),
            group_by_modules: default_group_by_modules(),
            layout_direction: LayoutDirection::default(),
            format: OutputFormat::default(),
            prettify_names: default_prettify_names(),
        }
    }
}

impl DuxConfig {
    /// The view state a session starts from before any fragment is applied.
    pub fn initial_view_state(&self) -> ViewState {
        ViewState {
            layout_direction: self.layout_direction,
            group_by_modules: self.group_by_modules,
            embed_special_actions: self.embed_special_actions,
            ..ViewState::default()
        }
    }
}

/// Values set explicitly on the command line.
///
/// `None` fields are left out when merged, so lower-priority sources keep
/// their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_special_actions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by_modules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_direction: Option<LayoutDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}
