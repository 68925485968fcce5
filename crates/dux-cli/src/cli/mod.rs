//! Command-line interface definition for dux.
//!
//! # Command Structure
//!
//! - `dux render` - print the rendered graph as JSON or Graphviz DOT
//! - `dux clusters` - print the module-path cluster tree
//! - `dux inspect` - describe one node or cluster in the rendered graph

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{ClustersArgs, Command, InspectArgs, RenderArgs, SourceArgs};
pub use enums::*;

/// Dux - explore maps of Redux codebases
#[derive(Parser, Debug)]
#[command(
    name = "dux",
    version,
    about = "Render and inspect Redux codebase graphs",
    long_about = "Dux reads the {nodes, relations} graph produced by static analysis of a\n\
                  Redux codebase (actions, epics, reducers, components), replays a saved\n\
                  view state against it and prints the result."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
