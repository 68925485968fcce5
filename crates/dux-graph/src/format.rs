//! Human-readable names for nodes and clusters.

use crate::Graph;

/// Separator shown instead of `/` in prettified paths.
pub const PRETTY_SEPARATOR: &str = " › ";

pub fn prettify_name(name: &str) -> String {
    name.replace('/', PRETTY_SEPARATOR)
}

/// `{module}/{name}` of a node, or `None` if `id` is not a node.
pub fn node_name(graph: &Graph, id: &str, prettify: bool) -> Option<String> {
    let node = graph.node(id)?;
    let raw = format!("{}/{}", node.location.module, node.name);
    Some(if prettify { prettify_name(&raw) } else { raw })
}

/// Module path of a cluster, or `None` if `id` is not a cluster.
pub fn cluster_name(graph: &Graph, id: &str, prettify: bool) -> Option<String> {
    let cluster = graph.cluster(id)?;
    Some(if prettify {
        prettify_name(&cluster.name)
    } else {
        cluster.name.clone()
    })
}

/// Prettified node name, else cluster name, else `id` itself.
pub fn display_name(graph: &Graph, id: &str) -> String {
    node_name(graph, id, true)
        .or_else(|| cluster_name(graph, id, true))
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Location, Node};

    #[test]
    fn names_resolve_nodes_then_clusters_then_raw() {
        let mut graph = Graph::new();
        graph.insert_node("n", Node::action("load", Location::new("a.ts", "svc/books")));

        assert_eq!(node_name(&graph, "n", false).as_deref(), Some("svc/books/load"));
        assert_eq!(display_name(&graph, "n"), "svc › books › load");
        assert_eq!(display_name(&graph, "cluster_svc/books"), "svc › books");
        assert_eq!(cluster_name(&graph, "cluster_svc", false).as_deref(), Some("svc"));
        assert_eq!(display_name(&graph, "ghost"), "ghost");
        assert_eq!(node_name(&graph, "ghost", true), None);
    }
}
