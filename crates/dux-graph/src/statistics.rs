//! Summary counts for a graph.

use indexmap::IndexMap;
use serde::Serialize;

use crate::Graph;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStatistics {
    pub node_count: usize,
    pub relation_count: usize,
    pub port_mapping_count: usize,
    pub cluster_count: usize,
    /// Node count per kind label, in first-seen order.
    pub by_kind: IndexMap<&'static str, usize>,
}

impl Graph {
    pub fn statistics(&self) -> GraphStatistics {
        let mut by_kind: IndexMap<&'static str, usize> = IndexMap::new();
        for (_, node) in self.nodes() {
            *by_kind.entry(node.kind.label()).or_default() += 1;
        }
        GraphStatistics {
            node_count: self.node_count(),
            relation_count: self.relation_count(),
            port_mapping_count: self.port_mappings().count(),
            cluster_count: self.clusters().len(),
            by_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Graph, Location, Node, PortName};

    #[test]
    fn counts_everything() {
        let mut graph = Graph::new();
        graph.insert_node("e", Node::epic("loadEpic", Location::new("e.ts", "svc/books")));
        graph.insert_node("a", Node::action("load", Location::new("a.ts", "svc")));
        graph.insert_node("c", Node::component("Page", Location::new("p.tsx", "ui")));
        graph.add_relation("a", "e");
        graph.add_relation("c", "a");
        graph.add_to_port_for_relation("a", "e", PortName::Trigger);

        let stats = graph.statistics();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.relation_count, 2);
        assert_eq!(stats.port_mapping_count, 1);
        assert_eq!(stats.cluster_count, 3);
        assert_eq!(stats.by_kind.get("epic"), Some(&1));
        assert_eq!(stats.by_kind.get("component"), Some(&1));
    }
}
