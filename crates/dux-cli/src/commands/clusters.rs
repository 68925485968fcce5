//! `dux clusters` - print the module-path cluster tree.

use crate::cli::ClustersArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use console::style;
use dux_graph::cluster::root_clusters;
use dux_graph::format::prettify_name;
use dux_graph::{Cluster, ClusterMap, Graph};

/// Execute the clusters command.
pub fn execute(args: ClustersArgs) -> Result<()> {
    let (config, editor) = utils::open_editor(&args.source, &args.source.overrides(), None)?;
    let graph = editor.initial_graph();

    if graph.clusters().is_empty() {
        ui::info("No clusters: no node has a module path");
    }
    utils::write_output(None, &cluster_tree(graph, config.prettify_names))
}

/// Indented tree of clusters with direct and nested member counts.
pub fn cluster_tree(graph: &Graph, prettify: bool) -> String {
    let clusters = graph.clusters();
    let mut out = String::new();
    for root in root_clusters(clusters) {
        write_cluster(&mut out, clusters, root, 0, prettify);
    }

    let unclustered = graph
        .nodes()
        .filter(|(_, node)| node.module().split('/').all(str::is_empty))
        .count();
    if unclustered > 0 {
        out.push_str(&format!(
            "{} outside any cluster\n",
            ui::plural(unclustered, "node")
        ));
    }
    out
}

fn write_cluster(out: &mut String, clusters: &ClusterMap, cluster: &Cluster, depth: usize, prettify: bool) {
    let label = if prettify {
        prettify_name(&cluster.name)
    } else {
        cluster.name.clone()
    };
    let direct = cluster.nodes.len();
    let total = member_count(clusters, cluster);
    let counts = if total == direct {
        ui::plural(direct, "node")
    } else {
        format!("{}, {} total", ui::plural(direct, "node"), total)
    };

    out.push_str(&format!(
        "{:indent$}{} ({}) {}\n",
        "",
        style(label).bold(),
        counts,
        style(&cluster.id).dim(),
        indent = depth * 2
    ));

    for sub_id in &cluster.sub_clusters {
        if let Some(sub) = clusters.get(sub_id) {
            write_cluster(out, clusters, sub, depth + 1, prettify);
        }
    }
}

/// Nodes in `cluster` and all of its sub-clusters.
pub fn member_count(clusters: &ClusterMap, cluster: &Cluster) -> usize {
    cluster.nodes.len()
        + cluster
            .sub_clusters
            .iter()
            .filter_map(|id| clusters.get(id))
            .map(|sub| member_count(clusters, sub))
            .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dux_graph::{Location, Node};

    fn graph() -> Graph {
        let mut graph = Graph::new();
        graph.insert_node("a", Node::action("a", Location::new("a.ts", "app")));
        graph.insert_node("b", Node::action("b", Location::new("b.ts", "app/booking")));
        graph.insert_node("c", Node::action("c", Location::new("c.ts", "app/booking")));
        graph.insert_node("d", Node::action("d", Location::new("d.ts", "")));
        graph
    }

    #[test]
    fn counts_nested_members() {
        let graph = graph();
        let clusters = graph.clusters();
        let app = clusters.get("cluster_app").unwrap();
        assert_eq!(member_count(clusters, app), 3);
    }

    #[test]
    fn tree_is_indented_and_prettified() {
        console::set_colors_enabled(false);
        let tree = cluster_tree(&graph(), true);
        let lines: Vec<&str> = tree.lines().collect();
        assert_eq!(lines[0], "app (1 node, 3 total) cluster_app");
        assert_eq!(lines[1], "  app › booking (2 nodes) cluster_app/booking");
        assert_eq!(lines[2], "1 node outside any cluster");
    }

    #[test]
    fn raw_names_when_not_prettified() {
        console::set_colors_enabled(false);
        let tree = cluster_tree(&graph(), false);
        assert!(tree.contains("  app/booking (2 nodes)"));
    }
}
