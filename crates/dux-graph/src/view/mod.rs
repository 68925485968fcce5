//! View engine: which part of the initial graph is on screen.
//!
//! A view is never stored as a mutated graph. It is a small [`ViewState`]
//! value that [`apply_view`] replays against a fresh clone of the initial
//! graph every time, which keeps undo/redo trivial and makes the rendered
//! graph a pure function of `(initial graph, view state)`.

mod filter;
mod state;

pub use filter::{HiddenNeighbors, ViewFilter, apply_view, hidden_neighbors, removal_cascade};
pub use state::{LayoutDirection, Removal, ViewState};
