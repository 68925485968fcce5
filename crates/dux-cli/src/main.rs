//! Dux CLI - explore Redux codebase graphs from the terminal.
//!
//! This is the main entry point for the `dux` binary. It handles command-line
//! argument parsing, logging initialization, and command dispatch.

use clap::Parser;
use dux_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = cli::Cli::parse();

    // Initialize logging and colors based on global flags
    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Render(render_args) => commands::render_execute(render_args),
        cli::Command::Clusters(cluster_args) => commands::clusters_execute(cluster_args),
        cli::Command::Inspect(inspect_args) => commands::inspect_execute(inspect_args),
    };

    // Convert CLI errors to miette diagnostics for readable error reporting
    result.map_err(error::cli_error_to_miette)
}
