//! Port tagging methods for Graph.

use super::super::{PortMapping, PortName};
use super::graph::Graph;

impl Graph {
    /// Tag the `from` end of the `from -> to` relation with `port`.
    ///
    /// Returns `false` without changes when the relation does not exist.
    pub fn add_from_port_for_relation(&mut self, from: &str, port: PortName, to: &str) -> bool {
        self.tag_port(from, to, |mapping| mapping.from_port = Some(port))
    }

    /// Tag the `to` end of the `from -> to` relation with `port`.
    pub fn add_to_port_for_relation(&mut self, from: &str, to: &str, port: PortName) -> bool {
        self.tag_port(from, to, |mapping| mapping.to_port = Some(port))
    }

    /// True if any incoming relation of `id` enters through `port`.
    pub fn has_incoming_port(&self, id: &str, port: PortName) -> bool {
        self.find_parents(id)
            .iter()
            .filter_map(|r| self.port_mapping(r.id))
            .any(|pm| pm.uses(port))
    }

    /// True if any outgoing relation of `id` leaves through `port`.
    pub fn has_outgoing_port(&self, id: &str, port: PortName) -> bool {
        self.find_children(id)
            .iter()
            .filter_map(|r| self.port_mapping(r.id))
            .any(|pm| pm.uses(port))
    }

    fn tag_port(&mut self, from: &str, to: &str, apply: impl FnOnce(&mut PortMapping)) -> bool {
        let Some(relation) = self.find_relation(from, to).map(|r| r.id) else {
            return false;
        };
        let mapping = self
            .port_mappings
            .entry(relation)
            .or_insert_with(|| PortMapping {
                relation,
                from_port: None,
                to_port: None,
            });
        apply(mapping);
        self.touch();
        true
    }
}
