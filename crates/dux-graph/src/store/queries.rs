//! Query methods for Graph.

use indexmap::{IndexMap, IndexSet};

use super::super::{Id, Node, PortMapping, Relation, RelationId};
use super::graph::Graph;

impl Graph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&Id, &Node)> {
        self.nodes.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &Id> {
        self.nodes.keys()
    }

    pub fn node_map(&self) -> &IndexMap<Id, Node> {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Relations in creation order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.get(&id)
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// `(from, to)` pairs in creation order.
    pub fn relation_pairs(&self) -> Vec<(Id, Id)> {
        self.relations
            .values()
            .map(|r| (r.from.clone(), r.to.clone()))
            .collect()
    }

    /// The live relation for a pair, if any.
    pub fn find_relation(&self, from: &str, to: &str) -> Option<&Relation> {
        self.find_children(from)
            .into_iter()
            .find(|r| r.to.as_str() == to)
    }

    /// Outgoing relations of `id`; empty when it has none.
    pub fn find_children(&self, id: &str) -> Vec<&Relation> {
        self.resolve(self.forward.get(id))
    }

    /// Incoming relations of `id`; empty when it has none.
    pub fn find_parents(&self, id: &str) -> Vec<&Relation> {
        self.resolve(self.reverse.get(id))
    }

    pub fn child_ids(&self, id: &str) -> impl Iterator<Item = &Id> {
        self.find_children(id).into_iter().map(|r| &r.to)
    }

    pub fn parent_ids(&self, id: &str) -> impl Iterator<Item = &Id> {
        self.find_parents(id).into_iter().map(|r| &r.from)
    }

    /// Children of the parents of `id`, excluding `id` itself.
    ///
    /// With `within_parent`, only that parent's children are considered.
    pub fn find_siblings(&self, id: &str, within_parent: Option<&str>) -> Vec<Id> {
        let mut siblings: IndexSet<Id> = IndexSet::new();
        for parent in self.find_parents(id) {
            if within_parent.is_some_and(|p| p != parent.from.as_str()) {
                continue;
            }
            for child in self.find_children(&parent.from) {
                siblings.insert(child.to.clone());
            }
        }
        siblings.shift_remove(id);
        siblings.into_iter().collect()
    }

    pub fn port_mapping(&self, relation: RelationId) -> Option<&PortMapping> {
        self.port_mappings.get(&relation)
    }

    /// Port mappings in the order they were first created.
    pub fn port_mappings(&self) -> impl Iterator<Item = &PortMapping> {
        self.port_mappings.values()
    }

    fn resolve(&self, ids: Option<&Vec<RelationId>>) -> Vec<&Relation> {
        ids.map(|ids| ids.iter().filter_map(|rid| self.relations.get(rid)).collect())
            .unwrap_or_default()
    }
}
