//! Command implementations for the dux CLI.
//!
//! - [`render`] - print the rendered graph
//! - [`clusters`] - print the cluster tree
//! - [`inspect`] - describe one node or cluster
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod clusters;
pub mod inspect;
pub mod render;
pub(crate) mod utils;

pub use clusters::execute as clusters_execute;
pub use inspect::execute as inspect_execute;
pub use render::execute as render_execute;
