//! Module-path clusters.
//!
//! Clusters are never primary data. They are recomputed from the node set
//! whenever the memoized copy on a [`Graph`](crate::Graph) has been
//! invalidated by a mutation.

use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use super::Id;

/// Marker prepended to a module-path prefix to form its cluster id.
pub const CLUSTER_ID_PREFIX: &str = "cluster_";

/// A directory-like grouping of nodes sharing a module-path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: Id,
    /// Full slash-joined prefix, for example `services/booking`.
    pub name: String,
    /// Immediate child clusters, in discovery order.
    pub sub_clusters: Vec<Id>,
    /// Nodes whose module path ends exactly at this cluster.
    pub nodes: Vec<Id>,
}

impl Cluster {
    fn new(id: Id, name: String) -> Self {
        Self {
            id,
            name,
            sub_clusters: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// True for clusters with no parent prefix.
    pub fn is_root(&self) -> bool {
        !self.name.contains('/')
    }

    /// True if `module` equals this cluster's path or is nested under it.
    pub fn contains_module(&self, module: &str) -> bool {
        cluster_contains_module(&self.name, module)
    }
}

/// Cluster id to cluster, in creation order.
pub type ClusterMap = IndexMap<Id, Cluster>;

/// Cluster id for a module-path prefix.
pub fn cluster_id_for(prefix: &str) -> Id {
    Id::new(format!("{CLUSTER_ID_PREFIX}{prefix}"))
}

/// True if `module` equals `cluster_name` or is nested under it.
///
/// Compared segment by segment, ignoring empty segments the same way
/// [`derive_clusters`] does.
pub fn cluster_contains_module(cluster_name: &str, module: &str) -> bool {
    let mut module_segments = module.split('/').filter(|s| !s.is_empty());
    let mut cluster_segments = cluster_name.split('/').filter(|s| !s.is_empty()).peekable();
    if cluster_segments.peek().is_none() {
        return false;
    }
    cluster_segments.all(|segment| module_segments.next() == Some(segment))
}

/// Partition nodes into a forest of clusters by module path.
///
/// Empty path segments are ignored, so `a//b/` and `a/b` land in the same
/// cluster. Nodes with no segments at all belong to no cluster.
pub fn derive_clusters<'a, I>(nodes: I) -> ClusterMap
where
    I: IntoIterator<Item = (&'a Id, &'a str)>,
{
    let mut clusters = ClusterMap::default();
    let mut prefix_to_id: HashMap<String, Id> = HashMap::default();

    for (node_id, module) in nodes {
        let segments: Vec<&str> = module.split('/').filter(|s| !s.is_empty()).collect();
        let mut prefix = String::new();
        let mut parent: Option<Id> = None;

        for (index, segment) in segments.iter().enumerate() {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);

            let cluster_id = match prefix_to_id.get(&prefix) {
                Some(id) => id.clone(),
                None => {
                    let id = cluster_id_for(&prefix);
                    prefix_to_id.insert(prefix.clone(), id.clone());
                    clusters.insert(id.clone(), Cluster::new(id.clone(), prefix.clone()));
                    if let Some(parent_cluster) = parent.as_ref().and_then(|p| clusters.get_mut(p)) {
                        if !parent_cluster.sub_clusters.contains(&id) {
                            parent_cluster.sub_clusters.push(id.clone());
                        }
                    }
                    id
                }
            };

            if index == segments.len() - 1 {
                if let Some(cluster) = clusters.get_mut(&cluster_id) {
                    cluster.nodes.push(node_id.clone());
                }
            }
            parent = Some(cluster_id);
        }
    }

    clusters
}

/// Clusters with no parent prefix, in creation order.
pub fn root_clusters(clusters: &ClusterMap) -> impl Iterator<Item = &Cluster> {
    clusters.values().filter(|c| c.is_root())
}
