//! Core Graph structure definition.

use std::sync::OnceLock;

use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;

use super::super::cluster::ClusterMap;
use super::super::{Id, Node, PortMapping, Relation, RelationId};

/// Graph of domain nodes, directed relations and port annotations.
///
/// Invariants kept by every public method:
/// - every relation endpoint is present in the node map;
/// - `forward[r.from]` and `reverse[r.to]` hold `r.id` for every relation
///   `r`, and nothing else;
/// - a port mapping only exists for a live relation;
/// - at most one relation per `(from, to)` pair.
///
/// `Clone` produces a fully independent copy. Viewers mutate clones and keep
/// the original as the initial graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(super) nodes: IndexMap<Id, Node>,
    pub(super) relations: IndexMap<RelationId, Relation>,
    pub(super) port_mappings: IndexMap<RelationId, PortMapping>,
    pub(super) forward: HashMap<Id, Vec<RelationId>>,
    pub(super) reverse: HashMap<Id, Vec<RelationId>>,
    pub(super) next_relation: u32,
    /// Bumped by every structural mutation.
    pub(super) version: u64,
    pub(super) clusters: OnceLock<ClusterMap>,
}

impl Graph {
    /// Record a mutation: bump the version and drop memoized clusters.
    pub(super) fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.clusters.take();
    }

    pub(super) fn allocate_relation_id(&mut self) -> RelationId {
        let id = RelationId(self.next_relation);
        self.next_relation += 1;
        id
    }

    /// Structural version, bumped on every node, relation or port mutation.
    pub fn version(&self) -> u64 {
        self.version
    }
}
