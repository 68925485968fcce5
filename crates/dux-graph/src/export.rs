//! Rendering a filtered graph for the outside world: Graphviz DOT for
//! layout engines, and a JSON document for anything else.

use std::fmt::Write as _;

use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;

use crate::cluster::root_clusters;
use crate::format::display_name;
use crate::view::{HiddenNeighbors, hidden_neighbors};
use crate::{
    Cluster, Error, Graph, GraphStatistics, Id, LayoutDirection, Node, NodeKind, PortName, Result,
    ViewState,
};

const FONT: &str = "Helvetica";
const CLUSTER_LABEL_SIZE: u32 = 12;
const NODE_LABEL_SIZE: u32 = 11;
const EDGE_COLOR: &str = "#8a8a8a";
const NODE_BORDER: &str = "#00000044";
const CLUSTER_BORDER: &str = "#9aa5b1";
const CLUSTER_BG: &str = "#f7f9fb";
const LAYER_COLOR: &str = "#7b61ff";
const MODULE_COLOR: &str = "#6b7785";
const HIDDEN_COLOR: &str = "#d9480f";
const API_CALL_COLOR: &str = "#0b7285";

fn fill_color(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Action => "#e7f5ff",
        NodeKind::Epic { .. } => "#fff4e6",
        NodeKind::Reducer { .. } => "#f3f0ff",
        NodeKind::Component => "#ebfbee",
    }
}

fn shape(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Component => "note",
        NodeKind::Reducer { .. } => "cylinder",
        NodeKind::Action | NodeKind::Epic { .. } => "box",
    }
}

/// Layout options for [`to_dot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotOptions {
    pub layout_direction: LayoutDirection,
    /// Nest nodes in dashed boxes per module-path cluster.
    pub group_by_modules: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            layout_direction: LayoutDirection::LR,
            group_by_modules: true,
        }
    }
}

impl From<&ViewState> for DotOptions {
    fn from(state: &ViewState) -> Self {
        Self {
            layout_direction: state.layout_direction,
            group_by_modules: state.group_by_modules,
        }
    }
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

fn sanitize(id: &str) -> String {
    id.replace(['$', ':', '/'], "_")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Ports a node's box has to draw, in display order.
fn node_ports(graph: &Graph, id: &str) -> Vec<PortName> {
    let mut ports = Vec::new();
    if graph.has_incoming_port(id, PortName::Trigger) {
        ports.push(PortName::Trigger);
    }
    for port in [PortName::Success, PortName::Error] {
        if graph.has_outgoing_port(id, port) {
            ports.push(port);
        }
    }
    ports
}

struct DotWriter<'a> {
    graph: &'a Graph,
    initial: &'a Graph,
    options: DotOptions,
    out: String,
    rendered: HashSet<Id>,
    cluster_index: usize,
}

impl<'a> DotWriter<'a> {
    fn node_label(&self, id: &str, node: &Node) -> String {
        let ports = node_ports(self.graph, id);
        let mut cells: Vec<String> = Vec::new();

        if let Some(layer) = node.layer() {
            cells.push(format!(
                "<TD><FONT COLOR=\"{LAYER_COLOR}\">{}</FONT></TD>",
                escape_html(layer)
            ));
        }
        if ports.contains(&PortName::Trigger) {
            cells.push("<TD PORT=\"trigger\">▶</TD>".to_string());
        }
        cells.push(format!("<TD>{}</TD>", escape_html(&node.name)));
        if let Some(request) = node.requests().first() {
            cells.push(format!(
                "<TD><FONT COLOR=\"{API_CALL_COLOR}\">{}</FONT></TD>",
                request.method.as_str()
            ));
        }
        if ports.contains(&PortName::Success) {
            cells.push("<TD PORT=\"success\">✔</TD>".to_string());
        }
        if ports.contains(&PortName::Error) {
            cells.push("<TD PORT=\"error\">✖</TD>".to_string());
        }

        let hidden = hidden_neighbors(self.initial, self.graph, id);
        let mut second_row = String::new();
        if !self.options.group_by_modules {
            second_row.push_str(&format!(
                "<TD ALIGN=\"LEFT\"><FONT COLOR=\"{MODULE_COLOR}\" POINT-SIZE=\"10\">{}</FONT></TD>",
                escape_html(node.module())
            ));
        }
        if hidden.any() {
            second_row.push_str(&format!(
                "<TD ALIGN=\"RIGHT\"><FONT COLOR=\"{HIDDEN_COLOR}\" POINT-SIZE=\"10\">{}</FONT></TD>",
                badge(&hidden)
            ));
        }

        let mut label = format!(
            "<TABLE BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"0\" CELLPADDING=\"2\"><TR>{}</TR>",
            cells.join("")
        );
        if !second_row.is_empty() {
            label.push_str(&format!(
                "<TR><TD COLSPAN=\"{}\"><TABLE BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"0\" CELLPADDING=\"0\"><TR>{second_row}</TR></TABLE></TD></TR>",
                cells.len()
            ));
        }
        label.push_str("</TABLE>");
        label
    }

    fn write_node(&mut self, id: &Id, indent: &str) {
        let graph = self.graph;
        let Some(node) = graph.node(id) else {
            return;
        };
        if !self.rendered.insert(id.clone()) {
            return;
        }
        let label = self.node_label(id, node);
        let _ = writeln!(
            self.out,
            "{indent}{} [id=\"node_{}\", shape={}, style=\"filled,rounded\", fillcolor=\"{}\", color=\"{NODE_BORDER}\", label=<{label}>];",
            quote(id),
            sanitize(id),
            shape(&node.kind),
            fill_color(&node.kind),
        );
    }

    fn write_cluster(&mut self, cluster: &Cluster, depth: usize) {
        let graph = self.graph;
        let indent = "  ".repeat(depth + 1);
        let index = self.cluster_index;
        self.cluster_index += 1;

        let _ = writeln!(self.out, "{indent}subgraph \"cluster_{index}\" {{");
        let _ = writeln!(self.out, "{indent}  id=\"group_{}\";", sanitize(&cluster.id));
        let _ = writeln!(self.out, "{indent}  label={};", quote(&cluster.name));
        let _ = writeln!(self.out, "{indent}  style=\"rounded,dashed\";");
        let _ = writeln!(self.out, "{indent}  color=\"{CLUSTER_BORDER}\";");
        let _ = writeln!(self.out, "{indent}  bgcolor=\"{CLUSTER_BG}\";");

        let inner = format!("{indent}  ");
        for id in &cluster.nodes {
            self.write_node(id, &inner);
        }
        for sub in &cluster.sub_clusters {
            if let Some(sub) = graph.cluster(sub) {
                self.write_cluster(sub, depth + 1);
            }
        }
        let _ = writeln!(self.out, "{indent}}}");
    }

    fn finish(mut self) -> String {
        let _ = writeln!(self.out, "digraph G {{");
        let _ = writeln!(self.out, "  compound=true;");
        let _ = writeln!(self.out, "  rankdir={};", self.options.layout_direction);
        let _ = writeln!(
            self.out,
            "  graph [fontname=\"{FONT}\", fontsize={CLUSTER_LABEL_SIZE}];"
        );
        let _ = writeln!(self.out, "  node [fontname=\"{FONT}\", fontsize={NODE_LABEL_SIZE}];");
        let _ = writeln!(self.out, "  edge [color=\"{EDGE_COLOR}\"];");

        let graph = self.graph;
        if self.options.group_by_modules {
            for cluster in root_clusters(graph.clusters()) {
                self.write_cluster(cluster, 0);
            }
        }
        for id in graph.node_ids() {
            self.write_node(id, "  ");
        }

        for relation in graph.relations() {
            let mapping = graph.port_mapping(relation.id);
            let mut attrs = vec![format!(
                "id=\"{}__{}\"",
                sanitize(&relation.from),
                sanitize(&relation.to)
            )];
            if let Some(port) = mapping.and_then(|m| m.from_port) {
                attrs.push(format!("tailport=\"{port}\""));
            }
            if let Some(port) = mapping.and_then(|m| m.to_port) {
                attrs.push(format!("headport=\"{port}\""));
            }
            let _ = writeln!(
                self.out,
                "  {} -> {} [{}];",
                quote(&relation.from),
                quote(&relation.to),
                attrs.join(", ")
            );
        }

        let _ = writeln!(self.out, "}}");
        self.out
    }
}

/// `▲n ▼m` badge text for hidden neighbours; empty when nothing is hidden.
pub fn badge(hidden: &HiddenNeighbors) -> String {
    let mut parts = Vec::new();
    if hidden.backward > 0 {
        parts.push(format!("▲{}", hidden.backward));
    }
    if hidden.forward > 0 {
        parts.push(format!("▼{}", hidden.forward));
    }
    parts.join(" ")
}

/// Graphviz document for `graph`, with hidden-neighbour badges measured
/// against `initial`.
pub fn to_dot(graph: &Graph, initial: &Graph, options: &DotOptions) -> String {
    DotWriter {
        graph,
        initial,
        options: *options,
        out: String::new(),
        rendered: HashSet::default(),
        cluster_index: 0,
    }
    .finish()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNode {
    pub id: Id,
    #[serde(flatten)]
    pub node: Node,
    pub display_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortName>,
    pub hidden: HiddenNeighbors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRelation {
    pub from: Id,
    pub to: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_port: Option<PortName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_port: Option<PortName>,
}

/// Everything a front end needs to draw one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedGraph {
    pub nodes: Vec<RenderedNode>,
    pub relations: Vec<RenderedRelation>,
    pub clusters: Vec<Cluster>,
    pub statistics: GraphStatistics,
}

impl RenderedGraph {
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Serialization)
    }
}

pub fn to_json(graph: &Graph, initial: &Graph) -> RenderedGraph {
    let nodes = graph
        .nodes()
        .map(|(id, node)| RenderedNode {
            id: id.clone(),
            node: node.clone(),
            display_name: display_name(graph, id),
            ports: node_ports(graph, id),
            hidden: hidden_neighbors(initial, graph, id),
        })
        .collect();

    let relations = graph
        .relations()
        .map(|relation| {
            let mapping = graph.port_mapping(relation.id);
            RenderedRelation {
                from: relation.from.clone(),
                to: relation.to.clone(),
                from_port: mapping.and_then(|m| m.from_port),
                to_port: mapping.and_then(|m| m.to_port),
            }
        })
        .collect();

    RenderedGraph {
        nodes,
        relations,
        clusters: graph.clusters().values().cloned().collect(),
        statistics: graph.statistics(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Location, Removal, ViewFilter, apply_view, embed_action_nodes};

    fn embedded() -> Graph {
        let mut graph = Graph::new();
        graph.insert_node("page", Node::component("Page", Location::new("p.tsx", "ui/pages")));
        graph.insert_node(
            "load",
            Node::action("load", Location::new("a.ts", "svc").with_layer("domain")),
        );
        graph.insert_node(
            "epic",
            Node::epic("loadEpic", Location::new("e.ts", "svc").with_layer("domain")),
        );
        graph.insert_node("done", Node::action("loadSuccess", Location::new("a.ts", "svc")));
        graph.insert_node("list", Node::component("List \"main\"", Location::new("l.tsx", "ui")));
        for (from, to) in [("page", "load"), ("load", "epic"), ("epic", "done"), ("done", "list")] {
            graph.add_relation(from, to);
        }
        embed_action_nodes(&graph)
    }

    #[test]
    fn dot_nests_clusters_and_routes_ports() {
        let graph = embedded();
        let dot = to_dot(&graph, &graph, &DotOptions::default());

        assert!(dot.starts_with("digraph G {\n"));
        assert!(dot.contains("rankdir=LR;"));
        assert!(dot.contains("label=\"ui\";"));
        assert!(dot.contains("label=\"ui/pages\";"));
        assert_eq!(dot.matches("subgraph").count(), 3);
        assert_eq!(dot.matches("[id=\"node_").count(), 3);
        assert!(dot.contains("\"epic\" -> \"list\" [id=\"epic__list\", tailport=\"success\"];"));
        assert!(dot.contains("\"page\" -> \"epic\" [id=\"page__epic\", headport=\"trigger\"];"));
        assert!(dot.contains("<TD PORT=\"trigger\">"));
        assert!(dot.contains("<TD>List &quot;main&quot;</TD>"));
        assert!(dot.contains("shape=note"));
        assert!(dot.contains("domain"));
    }

    #[test]
    fn dot_without_grouping_shows_modules_and_badges() {
        let initial = embedded();
        let filter = ViewFilter {
            removed_ids: vec![Removal::new("list", Direction::Forward)],
            ..Default::default()
        };
        let graph = apply_view(&initial, &filter);
        let options = DotOptions {
            layout_direction: LayoutDirection::TB,
            group_by_modules: false,
        };
        let dot = to_dot(&graph, &initial, &options);

        assert!(dot.contains("rankdir=TB;"));
        assert!(!dot.contains("subgraph"));
        assert!(dot.contains("▼1"));
        assert!(dot.contains(">ui/pages</FONT>"));
    }

    #[test]
    fn json_document_carries_ports_and_hidden_counts() {
        let initial = embedded();
        let filter = ViewFilter {
            removed_ids: vec![Removal::new("page", Direction::Backward)],
            ..Default::default()
        };
        let graph = apply_view(&initial, &filter);
        let doc = to_json(&graph, &initial);

        let epic = doc.nodes.iter().find(|n| n.id.as_str() == "epic").expect("epic rendered");
        assert_eq!(epic.ports, vec![PortName::Success]);
        assert_eq!(epic.hidden, HiddenNeighbors { backward: 1, forward: 0 });

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["nodes"][0]["type"], "epic");
        assert_eq!(value["nodes"][0]["displayName"], "svc › loadEpic");
        assert_eq!(value["relations"][0]["fromPort"], "success");
        assert!(value["relations"][0].get("toPort").is_none());
        assert_eq!(value["statistics"]["nodeCount"], 2);
    }

    #[test]
    fn badge_text() {
        assert_eq!(badge(&HiddenNeighbors { backward: 2, forward: 5 }), "▲2 ▼5");
        assert_eq!(badge(&HiddenNeighbors { backward: 0, forward: 3 }), "▼3");
        assert_eq!(badge(&HiddenNeighbors::default()), "");
    }
}
