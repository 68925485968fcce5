//! # dux-graph
//!
//! In-memory graph store and view engine for maps of Redux codebases.
//!
//! The static analysis front end discovers actions, epics, reducers and
//! components and hands over a flat `{nodes, relations}` payload. This crate
//! turns that payload into a [`Graph`] and provides everything an interactive
//! viewer needs on top of it, without any I/O of its own.
//!
//! ## Overview
//!
//! - **Graph store**: nodes, directed relations kept in an arena, port
//!   annotations keyed by relation id, forward and reverse adjacency indexes.
//! - **Clusters**: a forest of module-path prefixes derived on demand and
//!   memoized until the next mutation.
//! - **Embedding**: folds synthetic success/error/trigger actions into labeled
//!   ports on their owning epic.
//! - **View filtering**: replays removals, reveal exceptions and an optional
//!   focus subtree against a clone of the initial graph.
//! - **Edit history**: undo/redo over view states, never over the graph.
//! - **Spatial navigation**: keyboard movement between on-screen rectangles.
//!
//! ## Architecture
//!
//! ```text
//!  GraphPayload ──► Graph ──► embed_action_nodes ──► initial graph
//!                                                        │
//!        GraphEditor (History<ViewState>) ──► ViewFilter ─┤
//!                                                        ▼
//!                                          apply_view ──► rendered graph
//!                                                        │
//!                              to_dot / to_json ◄────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use dux_graph::{Direction, GraphEditor, GraphPayload, Graph};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let payload: GraphPayload = serde_json::from_str(r#"{
//!     "nodes": {
//!         "a": {"type": "action", "name": "load", "location": {"url": "a.ts", "module": "app"}},
//!         "b": {"type": "component", "name": "Page", "location": {"url": "b.tsx", "module": "app"}}
//!     },
//!     "relations": {"b": ["a"]}
//! }"#)?;
//!
//! let mut editor = GraphEditor::new(Graph::from_payload(payload));
//! editor.remove_node("a", Direction::Forward);
//! assert!(!editor.rendered().contains("a"));
//!
//! editor.undo();
//! assert!(editor.rendered().contains("a"));
//! # Ok(())
//! # }
//! ```

pub mod cluster;
pub mod editor;
pub mod embed;
pub mod export;
pub mod format;
pub mod history;
pub mod id;
pub mod navigator;
pub mod node;
pub mod normalize;
pub mod params;
pub mod relation;
pub mod session;
pub mod statistics;
pub mod view;

mod store;

pub use cluster::{CLUSTER_ID_PREFIX, Cluster, ClusterMap, derive_clusters};
pub use editor::GraphEditor;
pub use embed::{
    EmbedReport, EmbeddedNodeMap, EmbeddedRole, analyze_embedded_nodes, embed_action_nodes,
    embed_action_nodes_in_place,
};
pub use export::{DotOptions, RenderedGraph, RenderedNode, RenderedRelation, to_dot, to_json};
pub use history::History;
pub use id::Id;
pub use navigator::{ArrowDirection, Rect, SpatialNavigator};
pub use node::{ApiCall, ApiRequest, HttpMethod, Location, Node, NodeKind};
pub use normalize::renormalize_ids;
pub use params::{ParamKind, VIEW_STATE_FIELDS};
pub use relation::{Direction, PortMapping, PortName, Relation, RelationId};
pub use session::{RenderSession, RenderTicket};
pub use statistics::GraphStatistics;
pub use store::{Graph, GraphPayload};
pub use view::{
    HiddenNeighbors, LayoutDirection, Removal, ViewFilter, ViewState, apply_view, hidden_neighbors,
};

/// Error types for dux graph operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The `{nodes, relations}` payload did not match the expected schema.
    #[error("Invalid graph payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    /// A graph or view state could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A view state value was rejected.
    #[error("Invalid view state: {0}")]
    InvalidViewState(String),
}

/// Result type alias for dux graph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
