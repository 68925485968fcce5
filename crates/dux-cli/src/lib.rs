//! Dux CLI - command-line front end for `dux-graph`.
//!
//! Loads a `{nodes, relations}` payload produced by the static analysis front
//! end, restores a view state from a URL-style fragment and prints the
//! result.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions for the `dux` binary
//! - [`commands`] - `render`, `clusters` and `inspect`
//! - [`config`] - layered configuration (defaults, file, `DUX_` env, flags)
//! - [`error`] - error types with actionable hints
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - colored status messages on stderr
//!
//! # Example
//!
//! ```rust
//! use dux_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     // Command implementations...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
