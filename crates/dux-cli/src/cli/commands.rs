use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::config::ConfigOverrides;

/// Available dux subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the graph after replaying a view state
    ///
    /// Applies removals, reveal exceptions and focus from the view state to
    /// the (optionally embedded) initial graph and prints the result.
    Render(RenderArgs),

    /// Print the module-path cluster tree with member counts
    Clusters(ClustersArgs),

    /// Describe one node or cluster in the rendered graph
    ///
    /// Shows kind, module, visible parents and children, hidden neighbour
    /// counts, siblings and any actions folded into it.
    Inspect(InspectArgs),
}

/// Where the graph comes from and how it is prepared before viewing.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to the `{nodes, relations}` JSON payload, or `-` for stdin
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Config file (defaults to ./dux.config.json when present)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep success/error/trigger actions as separate nodes
    #[arg(long)]
    pub no_embed: bool,

    /// Rewrite node ids to `{module}/{name}` before loading
    #[arg(long)]
    pub renormalize: bool,
}

impl SourceArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            embed_special_actions: self.no_embed.then_some(false),
            ..ConfigOverrides::default()
        }
    }
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// View state as a URL fragment, e.g. `focusId=app%2Fload&layoutDirection=TB`
    ///
    /// Fields present here override the configured defaults one by one.
    #[arg(short = 's', long, value_name = "FRAGMENT")]
    pub state: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Do not nest nodes in module clusters
    #[arg(long)]
    pub no_group: bool,

    /// Graph flow direction
    #[arg(short = 'l', long, value_enum)]
    pub layout: Option<Layout>,

    /// Write to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            group_by_modules: self.no_group.then_some(false),
            layout_direction: self.layout.map(Into::into),
            format: self.format,
            ..self.source.overrides()
        }
    }
}

/// Arguments for the clusters command
#[derive(Args, Debug)]
pub struct ClustersArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Node or cluster id to inspect
    #[arg(value_name = "ID")]
    pub id: String,

    /// View state as a URL fragment
    #[arg(short = 's', long, value_name = "FRAGMENT")]
    pub state: Option<String>,
}
