//! Crate-level tests exercising several modules together.


use crate::{Graph, Id};

/// Check the store invariants through the public query API.
pub(crate) fn assert_consistent(graph: &Graph) {
    let mut outgoing = 0;
    let mut incoming = 0;
    for id in graph.node_ids() {
        outgoing += graph.find_children(id).len();
        incoming += graph.find_parents(id).len();
    }
    assert_eq!(outgoing, graph.relation_count(), "forward index out of sync");
    assert_eq!(incoming, graph.relation_count(), "reverse index out of sync");

    for relation in graph.relations() {
        assert!(graph.contains(&relation.from), "dangling source {}", relation.from);
        assert!(graph.contains(&relation.to), "dangling target {}", relation.to);
        assert!(graph.find_children(&relation.from).iter().any(|r| r.id == relation.id));
        assert!(graph.find_parents(&relation.to).iter().any(|r| r.id == relation.id));
    }
    for mapping in graph.port_mappings() {
        assert!(graph.relation(mapping.relation).is_some(), "port mapping without relation");
    }
}

pub(crate) fn sorted_ids(graph: &Graph) -> Vec<Id> {
    let mut ids: Vec<Id> = graph.node_ids().cloned().collect();
    ids.sort();
    ids
}
