//! Readable, stable node ids derived from module path and name.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use tracing::{debug, warn};

use crate::{GraphPayload, Id};

/// Rewrite every node id to `{module}/{name}`.
///
/// Empty modules become `unknown` and empty names `unnamed`. Ids that would
/// collide get a `$1`, `$2`, … suffix in node order. Relation endpoints are
/// remapped; targets that were never nodes are dropped with a warning, and
/// sources left without targets are omitted.
pub fn renormalize_ids(payload: GraphPayload) -> GraphPayload {
    let GraphPayload { nodes, relations } = payload;

    let mut id_map: HashMap<Id, Id> = HashMap::default();
    let mut used: HashSet<Id> = HashSet::default();
    let mut new_nodes = IndexMap::with_capacity(nodes.len());

    for (old_id, node) in nodes {
        let module = if node.location.module.is_empty() {
            "unknown"
        } else {
            node.location.module.as_str()
        };
        let name = if node.name.is_empty() { "unnamed" } else { node.name.as_str() };
        let base = format!("{module}/{name}");

        let mut candidate = Id::new(base.clone());
        let mut counter = 1;
        while used.contains(&candidate) {
            candidate = Id::new(format!("{base}${counter}"));
            counter += 1;
        }
        used.insert(candidate.clone());
        id_map.insert(old_id, candidate.clone());
        new_nodes.insert(candidate, node);
    }

    let mut new_relations: IndexMap<Id, Vec<Id>> = IndexMap::new();
    for (old_source, old_targets) in relations {
        let Some(source) = id_map.get(&old_source) else {
            debug!(source = %old_source, "relation source is not a node, skipping");
            continue;
        };
        let targets: Vec<Id> = old_targets
            .iter()
            .filter_map(|target| {
                let mapped = id_map.get(target).cloned();
                if mapped.is_none() {
                    warn!(source = %old_source, target = %target, "relation points to a missing node id");
                }
                mapped
            })
            .collect();
        if !targets.is_empty() {
            new_relations.insert(source.clone(), targets);
        }
    }

    GraphPayload {
        nodes: new_nodes,
        relations: new_relations,
    }
}
