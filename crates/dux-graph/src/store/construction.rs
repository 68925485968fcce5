//! Construction methods for Graph.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::super::{Error, Id, Node, Result};
use super::graph::Graph;

/// Flat `{nodes, relations}` form exchanged with the analysis front end.
///
/// `relations` maps a source id to its ordered target ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPayload {
    #[serde(default)]
    pub nodes: IndexMap<Id, Node>,
    #[serde(default)]
    pub relations: IndexMap<Id, Vec<Id>>,
}

impl GraphPayload {
    /// Parse a payload from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::InvalidPayload)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Serialization)
    }
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from nodes and `(from, to)` pairs.
    ///
    /// Pairs referencing unknown nodes are dropped with a warning; duplicate
    /// pairs collapse into one relation.
    pub fn from_parts<N, R>(nodes: N, relations: R) -> Self
    where
        N: IntoIterator<Item = (Id, Node)>,
        R: IntoIterator<Item = (Id, Id)>,
    {
        let mut graph = Self::new();
        for (id, node) in nodes {
            graph.nodes.insert(id, node);
        }

        let mut dropped = 0usize;
        for (from, to) in relations {
            if !graph.contains(&from) {
                warn!(from = %from, to = %to, "relation source is missing from the node map, dropping");
                dropped += 1;
                continue;
            }
            if !graph.contains(&to) {
                warn!(from = %from, to = %to, "relation target is missing from the node map, dropping");
                dropped += 1;
                continue;
            }
            graph.add_relation(&from, &to);
        }

        debug!(
            nodes = graph.node_count(),
            relations = graph.relation_count(),
            dropped,
            "graph constructed"
        );
        graph
    }

    /// Build a graph from the flat analysis payload.
    pub fn from_payload(payload: GraphPayload) -> Self {
        let GraphPayload { nodes, relations } = payload;
        let pairs = relations
            .into_iter()
            .flat_map(|(from, targets)| targets.into_iter().map(move |to| (from.clone(), to)));
        Self::from_parts(nodes, pairs)
    }

    /// Flatten the graph back into the payload form. Ports are not part of it.
    pub fn to_payload(&self) -> GraphPayload {
        let mut relations: IndexMap<Id, Vec<Id>> = IndexMap::new();
        for relation in self.relations.values() {
            relations
                .entry(relation.from.clone())
                .or_default()
                .push(relation.to.clone());
        }
        GraphPayload {
            nodes: self.nodes.clone(),
            relations,
        }
    }
}
