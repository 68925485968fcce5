//! Replaying a view against the initial graph.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::{Removal, ViewState};
use crate::cluster::cluster_contains_module;
use crate::{Direction, Graph, Id};

/// The part of a [`ViewState`] that decides which nodes survive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewFilter {
    pub removed_ids: Vec<Removal>,
    pub white_list_ids: Vec<Id>,
    pub focus_id: Option<Id>,
}

impl From<&ViewState> for ViewFilter {
    fn from(state: &ViewState) -> Self {
        Self {
            removed_ids: state.removed_ids.clone(),
            white_list_ids: state.white_list_ids.clone(),
            focus_id: state.focus_id.clone(),
        }
    }
}

/// Render `filter` against `initial`.
///
/// Removals replay in issue order on a clone. An id that is a node of
/// `initial` cascades through [`Graph::remove_node_recursive`]; otherwise it
/// is looked up among the clusters of `initial`, so cluster membership does
/// not drift as the clone shrinks, and every node under that module path goes.
/// Ids that resolve to neither are ignored. Whitelisted ids always survive
/// removals and focusing. `initial` is never modified.
pub fn apply_view(initial: &Graph, filter: &ViewFilter) -> Graph {
    let mut graph = initial.clone();
    let white_list = filter.white_list_ids.as_slice();

    for Removal { id, dir } in &filter.removed_ids {
        if initial.contains(id) {
            graph.remove_node_recursive(id, *dir, white_list);
        } else if let Some(cluster) = initial.cluster(id) {
            let doomed: Vec<Id> = graph
                .nodes()
                .filter(|(member, node)| {
                    cluster_contains_module(&cluster.name, node.module())
                        && !white_list.contains(*member)
                })
                .map(|(member, _)| member.clone())
                .collect();
            for id in &doomed {
                graph.remove_node(id);
            }
        } else {
            debug!(id = %id, "removal target is neither a node nor a cluster, ignoring");
        }
    }

    if let Some(focus) = &filter.focus_id {
        graph.remove_all_except_subgraph(focus, white_list);
    }

    debug!(
        initial = initial.node_count(),
        rendered = graph.node_count(),
        "applied view"
    );
    graph
}

/// Ids a removal of `id` would sweep up on `initial`.
///
/// For a cluster these are all nodes under its module path; for a node it is
/// the cascade of [`Graph::find_recursive`]. Unknown ids yield just `id`.
pub fn removal_cascade(initial: &Graph, id: &str, dir: Direction) -> IndexSet<Id> {
    if !initial.contains(id) {
        if let Some(cluster) = initial.cluster(id) {
            let mut members: IndexSet<Id> = initial
                .nodes()
                .filter(|(_, node)| cluster_contains_module(&cluster.name, node.module()))
                .map(|(id, _)| id.clone())
                .collect();
            members.insert(Id::from(id));
            return members;
        }
    }
    initial.find_recursive(id, dir)
}

/// Neighbours of a node that exist in the initial graph but are hidden in
/// the current one, shown as `▲backward ▼forward` badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenNeighbors {
    pub backward: usize,
    pub forward: usize,
}

impl HiddenNeighbors {
    pub fn any(&self) -> bool {
        self.backward > 0 || self.forward > 0
    }

    pub fn count(&self, dir: Direction) -> usize {
        match dir {
            Direction::Backward => self.backward,
            Direction::Forward => self.forward,
        }
    }
}

pub fn hidden_neighbors(initial: &Graph, current: &Graph, id: &str) -> HiddenNeighbors {
    HiddenNeighbors {
        backward: initial
            .find_parents(id)
            .len()
            .saturating_sub(current.find_parents(id).len()),
        forward: initial
            .find_children(id)
            .len()
            .saturating_sub(current.find_children(id).len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Location, Node};

    /// ui/Page -> load -> svc/books/loadEpic -> loaded -> ui/List
    fn sample() -> Graph {
        let mut graph = Graph::new();
        graph.insert_node("page", Node::component("Page", Location::new("p.tsx", "ui")));
        graph.insert_node("load", Node::action("load", Location::new("a.ts", "svc/books")));
        graph.insert_node("epic", Node::epic("loadEpic", Location::new("e.ts", "svc/books")));
        graph.insert_node("loaded", Node::action("loaded", Location::new("a.ts", "svc/books")));
        graph.insert_node("list", Node::component("List", Location::new("l.tsx", "ui")));
        graph.insert_node("audit", Node::action("audit", Location::new("x.ts", "svc")));
        for (from, to) in [
            ("page", "load"),
            ("load", "epic"),
            ("epic", "loaded"),
            ("loaded", "list"),
            ("epic", "audit"),
        ] {
            graph.add_relation(from, to);
        }
        graph
    }

    fn ids(graph: &Graph) -> Vec<&str> {
        graph.node_ids().map(Id::as_str).collect()
    }

    #[test]
    fn empty_filter_renders_everything() {
        let initial = sample();
        let rendered = apply_view(&initial, &ViewFilter::default());
        assert_eq!(rendered.node_count(), initial.node_count());
        assert_eq!(rendered.relation_pairs(), initial.relation_pairs());
    }

    #[test]
    fn node_removal_cascades_forward() {
        let initial = sample();
        let filter = ViewFilter {
            removed_ids: vec![Removal::new("epic", Direction::Forward)],
            ..Default::default()
        };
        let rendered = apply_view(&initial, &filter);
        assert_eq!(ids(&rendered), vec!["page", "load"]);
        assert_eq!(initial.node_count(), 6);
    }

    #[test]
    fn white_list_protects_cascaded_nodes() {
        let initial = sample();
        let filter = ViewFilter {
            removed_ids: vec![Removal::new("epic", Direction::Forward)],
            white_list_ids: vec![Id::from("list")],
            focus_id: None,
        };
        let rendered = apply_view(&initial, &filter);
        assert_eq!(ids(&rendered), vec!["page", "load", "list"]);
    }

    #[test]
    fn cluster_removal_takes_nested_modules() {
        let initial = sample();
        let filter = ViewFilter {
            removed_ids: vec![Removal::new("cluster_svc", Direction::Forward)],
            white_list_ids: vec![Id::from("loaded")],
            focus_id: None,
        };
        let rendered = apply_view(&initial, &filter);
        assert_eq!(ids(&rendered), vec!["page", "loaded", "list"]);
    }

    #[test]
    fn unknown_removal_is_ignored() {
        let initial = sample();
        let filter = ViewFilter {
            removed_ids: vec![Removal::new("nope", Direction::Forward)],
            ..Default::default()
        };
        assert_eq!(apply_view(&initial, &filter).node_count(), 6);
    }

    #[test]
    fn focus_keeps_reachable_subgraph_and_white_list() {
        let initial = sample();
        let filter = ViewFilter {
            removed_ids: Vec::new(),
            white_list_ids: vec![Id::from("page")],
            focus_id: Some(Id::from("epic")),
        };
        let rendered = apply_view(&initial, &filter);
        assert_eq!(ids(&rendered), vec!["page", "epic", "loaded", "list", "audit"]);
    }

    #[test]
    fn focus_on_missing_id_does_nothing() {
        let initial = sample();
        let filter = ViewFilter {
            focus_id: Some(Id::from("ghost")),
            ..Default::default()
        };
        assert_eq!(apply_view(&initial, &filter).node_count(), 6);
    }

    #[test]
    fn hidden_neighbors_count_the_difference() {
        let initial = sample();
        let filter = ViewFilter {
            removed_ids: vec![Removal::new("loaded", Direction::Forward)],
            ..Default::default()
        };
        let rendered = apply_view(&initial, &filter);
        let hidden = hidden_neighbors(&initial, &rendered, "epic");
        assert_eq!(hidden, HiddenNeighbors { backward: 0, forward: 1 });
        assert!(hidden.any());
        assert!(!hidden_neighbors(&initial, &rendered, "page").any());
    }

    #[test]
    fn cascade_for_cluster_lists_members() {
        let initial = sample();
        let cascade = removal_cascade(&initial, "cluster_svc/books", Direction::Forward);
        assert!(cascade.contains("load"));
        assert!(cascade.contains("epic"));
        assert!(!cascade.contains("audit"));

        let cascade = removal_cascade(&initial, "loaded", Direction::Forward);
        assert_eq!(cascade.len(), 2);
    }
}
