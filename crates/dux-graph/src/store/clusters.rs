//! Memoized cluster derivation for Graph.

use super::super::cluster::{Cluster, ClusterMap, derive_clusters};
use super::graph::Graph;

impl Graph {
    /// Clusters of the current node set.
    ///
    /// Computed on first access after a mutation and memoized until the next
    /// one.
    pub fn clusters(&self) -> &ClusterMap {
        self.clusters.get_or_init(|| {
            derive_clusters(
                self.nodes
                    .iter()
                    .map(|(id, node)| (id, node.location.module.as_str())),
            )
        })
    }

    pub fn cluster(&self, id: &str) -> Option<&Cluster> {
        self.clusters().get(id)
    }

    /// True if `id` names a derived cluster rather than a node.
    pub fn is_cluster(&self, id: &str) -> bool {
        !self.contains(id) && self.cluster(id).is_some()
    }
}
