//! In-memory graph store.
//!
//! The store keeps nodes in insertion order, relations in an id-addressed
//! arena and both adjacency directions as lists of relation ids. Methods are
//! grouped by concern, each file adding an `impl Graph` block.

mod clusters;
mod construction;
mod graph;
mod mutations;
mod ports;
mod queries;
mod traversal;

pub use construction::GraphPayload;
pub use graph::Graph;
