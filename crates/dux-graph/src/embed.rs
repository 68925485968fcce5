//! Folding synthetic outcome and trigger actions into epic ports.
//!
//! An epic `E` that dispatches `loadSuccess` and `loadError`, and is started
//! by a single-use `load` action, renders far more clearly as one box with
//! three labeled ports. The rewrite keeps every causal edge: edges that left
//! the outcome action now leave the epic through the `success` or `error`
//! port, edges that entered the trigger action now enter the epic through the
//! `trigger` port.
//!
//! Ownership must be unambiguous for a fold to happen:
//! - an outcome action folds only into its sole parent epic;
//! - a trigger action folds only into its sole child epic, which must share
//!   its module and layer and must not also be one of its parents.
//!
//! Anything else is left visible.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::{Graph, Id, Node, PortName};

/// Counts of folds performed by [`embed_action_nodes_in_place`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmbedReport {
    pub success: usize,
    pub error: usize,
    pub trigger: usize,
    /// Sweeps over the graph until nothing else could be folded.
    pub passes: usize,
}

impl EmbedReport {
    pub fn total(&self) -> usize {
        self.success + self.error + self.trigger
    }

    fn record(&mut self, port: PortName) {
        match port {
            PortName::Success => self.success += 1,
            PortName::Error => self.error += 1,
            PortName::Trigger => self.trigger += 1,
        }
    }
}

/// Return an embedded copy of `graph`, leaving `graph` itself untouched.
pub fn embed_action_nodes(graph: &Graph) -> Graph {
    let mut embedded = graph.clone();
    embed_action_nodes_in_place(&mut embedded);
    embedded
}

/// Fold outcome and trigger actions into their epics until none are left.
///
/// Folding can expose new candidates (an outcome action whose only parent was
/// another outcome action now hangs off the epic directly), so sweeps repeat
/// until a sweep changes nothing. Applying this to its own output is a no-op.
pub fn embed_action_nodes_in_place(graph: &mut Graph) -> EmbedReport {
    let mut report = EmbedReport::default();

    loop {
        report.passes += 1;
        let before = report.total();

        let epics: Vec<Id> = graph
            .nodes()
            .filter(|(_, node)| node.is_epic())
            .map(|(id, _)| id.clone())
            .collect();
        for epic in &epics {
            let children: Vec<Id> = graph.child_ids(epic).cloned().collect();
            for action in children {
                if let Some(port) = outcome_port(graph, epic, &action) {
                    fold_outcome(graph, epic, &action, port);
                    report.record(port);
                }
            }
        }

        let actions: Vec<Id> = graph
            .nodes()
            .filter(|(_, node)| node.is_action())
            .map(|(id, _)| id.clone())
            .collect();
        for action in &actions {
            if let Some(epic) = trigger_target(graph, action) {
                fold_trigger(graph, action, &epic);
                report.record(PortName::Trigger);
            }
        }

        if report.total() == before {
            break;
        }
    }

    debug!(
        success = report.success,
        error = report.error,
        trigger = report.trigger,
        passes = report.passes,
        "embedded action nodes"
    );
    report
}

/// Port an outcome action's name routes to. `Success` wins over `Error`.
fn outcome_port_for_name(name: &str) -> Option<PortName> {
    if name.contains("Success") {
        Some(PortName::Success)
    } else if name.contains("Error") {
        Some(PortName::Error)
    } else {
        None
    }
}

/// Ids that already look synthetic or outcome-like never act as triggers.
fn may_be_trigger_id(id: &str) -> bool {
    !(id.contains(':') || id.contains("Success") || id.contains("Error"))
}

fn same_placement(a: &Node, b: &Node) -> bool {
    a.location.module == b.location.module && a.location.layer == b.location.layer
}

fn outcome_port(graph: &Graph, epic: &str, action: &str) -> Option<PortName> {
    let node = graph.node(action)?;
    if !node.is_action() || action == epic {
        return None;
    }
    let parents = graph.find_parents(action);
    if parents.len() != 1 || parents[0].from.as_str() != epic {
        return None;
    }
    outcome_port_for_name(&node.name)
}

fn trigger_target(graph: &Graph, action: &str) -> Option<Id> {
    let node = graph.node(action)?;
    if !node.is_action() || !may_be_trigger_id(action) {
        return None;
    }
    let children = graph.find_children(action);
    let [only] = children.as_slice() else {
        return None;
    };
    let epic_id = &only.to;
    let epic = graph.node(epic_id)?;
    if !epic.is_epic() || !same_placement(node, epic) {
        return None;
    }
    if graph.parent_ids(action).any(|p| p == epic_id) {
        return None;
    }
    Some(epic_id.clone())
}

fn fold_outcome(graph: &mut Graph, epic: &str, action: &str, port: PortName) {
    graph.remove_relation(epic, action);

    let outgoing: Vec<(Id, Option<PortName>)> = graph
        .find_children(action)
        .into_iter()
        .map(|r| (r.to.clone(), graph.port_mapping(r.id).and_then(|m| m.to_port)))
        .collect();
    for (next, to_port) in outgoing {
        graph.remove_relation(action, &next);
        if next.as_str() == epic {
            continue;
        }
        graph.add_relation(epic, &next);
        graph.add_from_port_for_relation(epic, port, &next);
        if let Some(to_port) = to_port {
            graph.add_to_port_for_relation(epic, &next, to_port);
        }
    }

    graph.remove_node(action);
}

fn fold_trigger(graph: &mut Graph, action: &str, epic: &str) {
    graph.remove_relation(action, epic);

    let incoming: Vec<(Id, Option<PortName>)> = graph
        .find_parents(action)
        .into_iter()
        .map(|r| (r.from.clone(), graph.port_mapping(r.id).and_then(|m| m.from_port)))
        .collect();
    for (prev, from_port) in incoming {
        graph.remove_relation(&prev, action);
        graph.add_relation(&prev, epic);
        graph.add_to_port_for_relation(&prev, epic, PortName::Trigger);
        if let Some(from_port) = from_port {
            graph.add_from_port_for_relation(&prev, from_port, epic);
        }
    }

    graph.remove_node(action);
}

/// One folded action and the epic port it lands on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedRole {
    pub action: Id,
    pub epic: Id,
    pub port: PortName,
}

/// Which actions a single embedding sweep would fold, indexed both ways.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedNodeMap {
    pub action_to_epic: IndexMap<Id, EmbeddedRole>,
    pub epic_to_actions: IndexMap<Id, Vec<EmbeddedRole>>,
}

impl EmbeddedNodeMap {
    pub fn is_empty(&self) -> bool {
        self.action_to_epic.is_empty()
    }

    pub fn owner_of(&self, action: &str) -> Option<&EmbeddedRole> {
        self.action_to_epic.get(action)
    }

    pub fn embedded_in(&self, epic: &str) -> &[EmbeddedRole] {
        self.epic_to_actions.get(epic).map(Vec::as_slice).unwrap_or_default()
    }

    fn insert(&mut self, role: EmbeddedRole) {
        self.epic_to_actions
            .entry(role.epic.clone())
            .or_default()
            .push(role.clone());
        self.action_to_epic.insert(role.action.clone(), role);
    }
}

/// Report, without mutating, what embedding would fold on `graph` as it is.
///
/// Uses the same ownership rules as the transform but looks only one sweep
/// deep: actions that would become candidates after an earlier fold are not
/// listed.
pub fn analyze_embedded_nodes(graph: &Graph) -> EmbeddedNodeMap {
    let mut map = EmbeddedNodeMap::default();

    for (id, node) in graph.nodes() {
        if node.is_epic() {
            for action in graph.child_ids(id) {
                if let Some(port) = outcome_port(graph, id, action) {
                    map.insert(EmbeddedRole {
                        action: action.clone(),
                        epic: id.clone(),
                        port,
                    });
                }
            }
        }
    }
    for (id, node) in graph.nodes() {
        if !node.is_action() || map.action_to_epic.contains_key(id) {
            continue;
        }
        if let Some(epic) = trigger_target(graph, id) {
            map.insert(EmbeddedRole {
                action: id.clone(),
                epic,
                port: PortName::Trigger,
            });
        }
    }

    map
}
