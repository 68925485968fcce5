//! Directed relations and the port annotations attached to them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Id;

/// Stable handle of a relation inside one graph's relation arena.
///
/// Handles survive cloning: a relation keeps its id in every clone of the
/// graph it was created in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationId(pub(crate) u32);

impl RelationId {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// `from` causally leads to, triggers or contains `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    pub id: RelationId,
    pub from: Id,
    pub to: Id,
}

/// Named attachment point on an epic node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortName {
    Trigger,
    Success,
    Error,
}

impl PortName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortName::Trigger => "trigger",
            PortName::Success => "success",
            PortName::Error => "error",
        }
    }
}

impl fmt::Display for PortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port labels of a single relation. Either side may be unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub relation: RelationId,
    pub from_port: Option<PortName>,
    pub to_port: Option<PortName>,
}

impl PortMapping {
    /// True if either end of the relation uses `port`.
    pub fn uses(&self, port: PortName) -> bool {
        self.from_port == Some(port) || self.to_port == Some(port)
    }
}

/// Traversal direction for cascading removal and reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow relations from parent to child.
    Forward,
    /// Follow relations from child to parent.
    Backward,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}
