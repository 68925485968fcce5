//! Traversal methods for Graph: cascading removal and subgraph isolation.

use indexmap::IndexSet;
use rustc_hash::FxHashSet as HashSet;
use tracing::debug;

use super::super::{Direction, Id, Node};
use super::graph::Graph;

impl Graph {
    /// Ids that would go away if `start` were removed in direction `dir`.
    ///
    /// Starting from `start`, a depth-first walk follows children (forward) or
    /// parents (backward). A neighbour joins the cascade only if its sole
    /// parent (forward) or sole child (backward) is the node being walked
    /// from. Admission is judged on the graph as it is now, before anything
    /// is deleted, so a node with two parents never joins even when both
    /// parents end up in the same cascade. `start` is always included.
    pub fn find_recursive(&self, start: &str, dir: Direction) -> IndexSet<Id> {
        let mut visited: IndexSet<Id> = IndexSet::new();
        let mut stack: Vec<Id> = vec![Id::from(start)];

        while let Some(current) = stack.pop() {
            if visited.contains(&current) {
                continue;
            }
            match dir {
                Direction::Forward => {
                    for child in self.find_children(&current) {
                        if self.find_parents(&child.to).len() == 1 {
                            stack.push(child.to.clone());
                        }
                    }
                }
                Direction::Backward => {
                    for parent in self.find_parents(&current) {
                        if self.find_children(&parent.from).len() == 1 {
                            stack.push(parent.from.clone());
                        }
                    }
                }
            }
            visited.insert(current);
        }

        visited
    }

    /// Remove `start` and the private subtree that exists only to support it.
    ///
    /// Ids in `except_ids` survive. Returns the ids actually removed.
    pub fn remove_node_recursive(&mut self, start: &str, dir: Direction, except_ids: &[Id]) -> Vec<Id> {
        self.remove_node_recursive_with(start, dir, except_ids, |_, _| false)
    }

    /// Like [`Graph::remove_node_recursive`], additionally sparing every node
    /// for which `keep` returns `true`.
    pub fn remove_node_recursive_with<F>(
        &mut self,
        start: &str,
        dir: Direction,
        except_ids: &[Id],
        keep: F,
    ) -> Vec<Id>
    where
        F: Fn(&Id, &Node) -> bool,
    {
        let except: HashSet<&Id> = except_ids.iter().collect();
        let doomed: Vec<Id> = self
            .find_recursive(start, dir)
            .into_iter()
            .filter(|id| !except.contains(id))
            .filter(|id| self.node(id).is_none_or(|node| !keep(id, node)))
            .collect();

        let mut removed = Vec::with_capacity(doomed.len());
        for id in doomed {
            if self.remove_node(&id).is_some() {
                removed.push(id);
            }
        }
        debug!(start, dir = dir.as_str(), removed = removed.len(), "recursive removal");
        removed
    }

    /// Every id reachable from `root` along forward relations, `root` included.
    pub fn reachable_from(&self, root: &str) -> HashSet<Id> {
        let mut visited: HashSet<Id> = HashSet::default();
        let mut stack: Vec<Id> = vec![Id::from(root)];

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            for child in self.find_children(&current) {
                if !visited.contains(&child.to) {
                    stack.push(child.to.clone());
                }
            }
        }

        visited
    }

    /// Keep only what `root` can reach, plus `except_ids`.
    ///
    /// Does nothing when `root` is not a node of this graph. Returns the ids
    /// removed.
    pub fn remove_all_except_subgraph(&mut self, root: &str, except_ids: &[Id]) -> Vec<Id> {
        if !self.contains(root) {
            debug!(root, "focus root not present, leaving graph untouched");
            return Vec::new();
        }

        let keep = self.reachable_from(root);
        let except: HashSet<&Id> = except_ids.iter().collect();
        let doomed: Vec<Id> = self
            .nodes
            .keys()
            .filter(|id| !keep.contains(*id) && !except.contains(*id))
            .cloned()
            .collect();

        for id in &doomed {
            self.remove_node(id);
        }
        doomed
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::Location;
    use super::*;

    fn chain(extra: &[(&str, &str)]) -> Graph {
        let mut graph = Graph::new();
        for id in ["A", "B", "C", "D", "E"] {
            graph.insert_node(id, Node::action(id, Location::new("x.ts", "m")));
        }
        graph.add_relation("A", "B");
        graph.add_relation("B", "C");
        for (from, to) in extra {
            graph.add_relation(from, to);
        }
        graph
    }

    fn sorted(ids: Vec<Id>) -> Vec<String> {
        let mut out: Vec<String> = ids.into_iter().map(Id::into_string).collect();
        out.sort();
        out
    }

    #[test]
    fn forward_cascade_takes_private_chain() {
        let mut graph = chain(&[]);
        let removed = graph.remove_node_recursive("A", Direction::Forward, &[]);
        assert_eq!(sorted(removed), vec!["A", "B", "C"]);
        assert!(graph.contains("D"));
    }

    #[test]
    fn shared_child_survives_forward_cascade() {
        let mut graph = chain(&[("D", "C")]);
        let removed = graph.remove_node_recursive("A", Direction::Forward, &[]);
        assert_eq!(sorted(removed), vec!["A", "B"]);
        assert!(graph.contains("C"));
        assert!(graph.find_relation("D", "C").is_some());
    }

    #[test]
    fn node_whose_parents_are_both_in_the_cascade_is_kept() {
        // A -> B -> D and A -> C -> D: D has two parents, both doomed.
        let mut graph = Graph::new();
        for id in ["A", "B", "C", "D"] {
            graph.insert_node(id, Node::action(id, Location::new("x.ts", "m")));
        }
        graph.add_relation("A", "B");
        graph.add_relation("A", "C");
        graph.add_relation("B", "D");
        graph.add_relation("C", "D");

        let removed = graph.remove_node_recursive("A", Direction::Forward, &[]);
        assert_eq!(sorted(removed), vec!["A", "B", "C"]);
        assert!(graph.contains("D"));
        assert!(graph.find_parents("D").is_empty());
    }

    #[test]
    fn backward_cascade_uses_single_child_rule() {
        let mut graph = chain(&[("A", "E")]);
        // A has two children, so removing C backward stops at B.
        let removed = graph.remove_node_recursive("C", Direction::Backward, &[]);
        assert_eq!(sorted(removed), vec!["B", "C"]);
        assert!(graph.contains("A"));
    }

    #[test]
    fn except_ids_and_predicate_spare_nodes() {
        let mut graph = chain(&[]);
        let removed = graph.remove_node_recursive("A", Direction::Forward, &[Id::from("B")]);
        assert_eq!(sorted(removed), vec!["A", "C"]);

        let mut graph = chain(&[]);
        let removed =
            graph.remove_node_recursive_with("A", Direction::Forward, &[], |id, _| id.as_str() == "C");
        assert_eq!(sorted(removed), vec!["A", "B"]);
    }

    #[test]
    fn find_recursive_does_not_mutate() {
        let graph = chain(&[]);
        let found = graph.find_recursive("A", Direction::Forward);
        assert_eq!(found.len(), 3);
        assert_eq!(graph.node_count(), 5);
    }

    #[test]
    fn cycles_terminate() {
        let mut graph = chain(&[("C", "A")]);
        // A now has parent C; B and C each have one parent.
        let found = graph.find_recursive("A", Direction::Forward);
        assert_eq!(found.len(), 3);
        graph.remove_node_recursive("A", Direction::Forward, &[]);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn subgraph_isolation_keeps_reachable_and_excepted() {
        let mut graph = chain(&[("D", "C")]);
        let removed = graph.remove_all_except_subgraph("B", &[Id::from("E")]);
        assert_eq!(sorted(removed), vec!["A", "D"]);
        let mut left: Vec<&str> = graph.node_ids().map(|id| id.as_str()).collect();
        left.sort();
        assert_eq!(left, vec!["B", "C", "E"]);
    }

    #[test]
    fn subgraph_isolation_with_missing_root_does_nothing() {
        let mut graph = chain(&[]);
        assert!(graph.remove_all_except_subgraph("zzz", &[]).is_empty());
        assert_eq!(graph.node_count(), 5);
    }
}
