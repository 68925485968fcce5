//! Last-write-wins gate for renders produced off the main thread.
//!
//! When renders are computed concurrently, a slow render started before a
//! newer one must not overwrite it. Each render takes a [`RenderTicket`]
//! before starting; publishing succeeds only if no newer ticket has
//! published already.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use crate::Graph;

/// Generation token issued by [`RenderSession::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderTicket {
    generation: u64,
}

impl RenderTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct Published {
    generation: u64,
    graph: Option<Arc<Graph>>,
}

/// Shared holder of the most recent rendered graph. Cloning shares state.
#[derive(Debug, Clone, Default)]
pub struct RenderSession {
    issued: Arc<AtomicU64>,
    published: Arc<RwLock<Published>>,
}

impl RenderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before it.
    pub fn begin(&self) -> RenderTicket {
        RenderTicket {
            generation: self.issued.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Store `graph` unless a newer ticket has already published.
    ///
    /// Returns whether the graph was accepted.
    pub fn publish(&self, ticket: RenderTicket, graph: Graph) -> bool {
        let mut published = self.published.write();
        if ticket.generation <= published.generation {
            debug!(
                ticket = ticket.generation,
                current = published.generation,
                "discarding stale render"
            );
            return false;
        }
        published.generation = ticket.generation;
        published.graph = Some(Arc::new(graph));
        true
    }

    /// The latest accepted graph, if any render has been published.
    pub fn latest(&self) -> Option<Arc<Graph>> {
        self.published.read().graph.clone()
    }

    pub fn latest_generation(&self) -> u64 {
        self.published.read().generation
    }

    /// True if no ticket newer than `ticket` has been issued yet.
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.generation
    }
}
