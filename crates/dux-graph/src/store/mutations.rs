//! Mutation methods for Graph.
//!
//! Mutations are tolerant: targeting a missing node or relation is a no-op,
//! since view edits are routinely replayed against graphs that already changed.

use super::super::{Id, Node, Relation, RelationId};
use super::graph::Graph;

impl Graph {
    /// Insert or replace a node. Replacing keeps the node's position.
    pub fn insert_node(&mut self, id: impl Into<Id>, node: Node) -> Option<Node> {
        self.touch();
        self.nodes.insert(id.into(), node)
    }

    /// Add a relation unless one already exists for the pair.
    ///
    /// Returns the id of the new or existing relation, or `None` when either
    /// endpoint is not a node of this graph.
    pub fn add_relation(&mut self, from: &str, to: &str) -> Option<RelationId> {
        if let Some(existing) = self.find_relation(from, to) {
            return Some(existing.id);
        }
        let (from, to) = match (self.nodes.get_key_value(from), self.nodes.get_key_value(to)) {
            (Some((from, _)), Some((to, _))) => (from.clone(), to.clone()),
            _ => return None,
        };

        let id = self.allocate_relation_id();
        self.forward.entry(from.clone()).or_default().push(id);
        self.reverse.entry(to.clone()).or_default().push(id);
        self.relations.insert(id, Relation { id, from, to });
        self.touch();
        Some(id)
    }

    /// Remove every relation for the pair along with its port mapping.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove_relation(&mut self, from: &str, to: &str) -> bool {
        let Some(outgoing) = self.forward.get_mut(from) else {
            return false;
        };

        let relations = &self.relations;
        let mut removed: Vec<RelationId> = Vec::new();
        outgoing.retain(|rid| {
            let matches = relations.get(rid).is_some_and(|r| r.to.as_str() == to);
            if matches {
                removed.push(*rid);
            }
            !matches
        });
        if outgoing.is_empty() {
            self.forward.remove(from);
        }
        if removed.is_empty() {
            return false;
        }

        if let Some(incoming) = self.reverse.get_mut(to) {
            incoming.retain(|rid| !removed.contains(rid));
            if incoming.is_empty() {
                self.reverse.remove(to);
            }
        }
        for rid in &removed {
            self.relations.shift_remove(rid);
            self.port_mappings.shift_remove(rid);
        }

        self.touch();
        true
    }

    /// Remove a node and every relation touching it.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let children: Vec<Id> = self.child_ids(id).cloned().collect();
        for child in children {
            self.remove_relation(id, &child);
        }
        let parents: Vec<Id> = self.parent_ids(id).cloned().collect();
        for parent in parents {
            self.remove_relation(&parent, id);
        }
        self.forward.remove(id);
        self.reverse.remove(id);

        let removed = self.nodes.shift_remove(id);
        if removed.is_some() {
            self.touch();
        }
        removed
    }
}
