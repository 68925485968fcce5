//! `dux inspect` - describe one node or cluster in the rendered graph.

use crate::cli::InspectArgs;
use crate::commands::utils::{self, join_or_dash};
use crate::error::{CliError, Result};
use crate::ui;
use console::style;
use dux_graph::format::{node_name, prettify_name};
use dux_graph::{Cluster, GraphEditor, Node, PortName, analyze_embedded_nodes};
use std::fmt::Display;

const PORTS: [PortName; 3] = [PortName::Trigger, PortName::Success, PortName::Error];

/// Execute the inspect command.
pub fn execute(args: InspectArgs) -> Result<()> {
    let (config, editor) =
        utils::open_editor(&args.source, &args.source.overrides(), args.state.as_deref())?;
    let report = inspect(&editor, &args.id, config.prettify_names)?;
    utils::write_output(None, &report)
}

/// Plain-text report for `id`, which may be a node, a cluster or an action
/// folded into an epic.
pub fn inspect(editor: &GraphEditor, id: &str, prettify: bool) -> Result<String> {
    let initial = editor.initial_graph();
    if let Some(node) = initial.node(id) {
        return Ok(describe_node(editor, id, node, prettify));
    }
    if let Some(cluster) = initial.cluster(id) {
        return Ok(describe_cluster(editor, cluster, prettify));
    }
    if let Some(node) = editor.raw_graph().node(id) {
        return Ok(describe_folded(editor, id, node, prettify));
    }
    Err(CliError::NodeNotFound(id.to_string()))
}

fn field(out: &mut String, key: &str, value: impl Display) {
    out.push_str(&format!("{}{}\n", style(format!("{key:<10}")).bold(), value));
}

fn describe_node(editor: &GraphEditor, id: &str, node: &Node, prettify: bool) -> String {
    let initial = editor.initial_graph();
    let rendered = editor.rendered();
    let visible = rendered.contains(id);
    let mut out = String::new();

    field(&mut out, "id", id);
    if let Some(name) = node_name(initial, id, prettify) {
        field(&mut out, "name", name);
    }
    field(&mut out, "kind", node.kind.label());
    field(&mut out, "module", node.module());
    if let Some(layer) = node.layer() {
        field(&mut out, "layer", layer);
    }
    field(
        &mut out,
        "status",
        if visible {
            "visible".to_string()
        } else {
            style("hidden by the current view").yellow().to_string()
        },
    );

    if visible {
        field(&mut out, "parents", join_or_dash(rendered.parent_ids(id)));
        field(&mut out, "children", join_or_dash(rendered.child_ids(id)));
        field(&mut out, "siblings", join_or_dash(rendered.find_siblings(id, None)));
    }
    field(&mut out, "hidden", ui::format_badge(&editor.hidden_neighbors(id)));

    let ports = PORTS
        .iter()
        .filter(|port| initial.has_incoming_port(id, **port) || initial.has_outgoing_port(id, **port))
        .map(|port| port.to_string());
    let ports: Vec<String> = ports.collect();
    if !ports.is_empty() {
        field(&mut out, "ports", ports.join(", "));
    }

    for request in node.requests() {
        field(&mut out, "request", format!("{} {}", request.method.as_str(), request.url));
    }

    if editor.state().embed_special_actions {
        let embedded = analyze_embedded_nodes(editor.raw_graph());
        let folded = embedded
            .embedded_in(id)
            .iter()
            .map(|role| format!("{} ({})", role.action, role.port));
        let folded: Vec<String> = folded.collect();
        if !folded.is_empty() {
            field(&mut out, "embedded", folded.join(", "));
        }
    }
    out
}

fn describe_cluster(editor: &GraphEditor, cluster: &Cluster, prettify: bool) -> String {
    let initial = editor.initial_graph();
    let rendered = editor.rendered();
    let mut out = String::new();

    let name = if prettify {
        prettify_name(&cluster.name)
    } else {
        cluster.name.clone()
    };
    let nested: Vec<_> = initial
        .nodes()
        .filter(|(_, node)| cluster.contains_module(node.module()))
        .map(|(id, _)| id)
        .collect();
    let visible = nested.iter().filter(|id| rendered.contains(id)).count();

    field(&mut out, "id", &cluster.id);
    field(&mut out, "cluster", name);
    field(&mut out, "nodes", format!("{} ({} visible)", nested.len(), visible));
    field(&mut out, "members", join_or_dash(&cluster.nodes));
    field(&mut out, "clusters", join_or_dash(&cluster.sub_clusters));
    out
}

fn describe_folded(editor: &GraphEditor, id: &str, node: &Node, prettify: bool) -> String {
    let mut out = String::new();
    field(&mut out, "id", id);
    if let Some(name) = node_name(editor.raw_graph(), id, prettify) {
        field(&mut out, "name", name);
    }
    field(&mut out, "kind", node.kind.label());
    field(&mut out, "module", node.module());

    let embedded = analyze_embedded_nodes(editor.raw_graph());
    let status = match embedded.owner_of(id) {
        Some(role) => format!("embedded into {} as its {} port", role.epic, role.port),
        None => "embedded into an epic".to_string(),
    };
    field(&mut out, "status", status);
    out
}
