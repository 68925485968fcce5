//! Domain node types produced by the static analysis front end.
//!
//! Every node arrives already classified as one of four kinds. The store never
//! re-derives the kind; it only reads it.

use serde::{Deserialize, Serialize};

/// Where a node was declared.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub url: String,
    /// `/`-delimited logical path used for clustering.
    pub module: String,
    /// Short architectural layer tag (for example `S` or `DP`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

impl Location {
    pub fn new(url: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            module: module.into(),
            layer: None,
        }
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A single API request issued by an epic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    #[serde(alias = "type")]
    pub method: HttpMethod,
    pub url: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiCall {
    #[serde(default)]
    pub requests: Vec<ApiRequest>,
}

/// Kind-specific payload, discriminated by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Action,
    Epic {
        #[serde(rename = "apiCall", default)]
        api_call: ApiCall,
    },
    Reducer {
        #[serde(rename = "parentSliceName")]
        parent_slice_name: String,
    },
    Component,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Action => "action",
            NodeKind::Epic { .. } => "epic",
            NodeKind::Reducer { .. } => "reducer",
            NodeKind::Component => "component",
        }
    }
}

/// A discovered domain entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub location: Location,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn action(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            kind: NodeKind::Action,
        }
    }

    pub fn epic(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            kind: NodeKind::Epic {
                api_call: ApiCall::default(),
            },
        }
    }

    pub fn reducer(
        name: impl Into<String>,
        location: Location,
        parent_slice_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            kind: NodeKind::Reducer {
                parent_slice_name: parent_slice_name.into(),
            },
        }
    }

    pub fn component(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            kind: NodeKind::Component,
        }
    }

    pub fn is_action(&self) -> bool {
        matches!(self.kind, NodeKind::Action)
    }

    pub fn is_epic(&self) -> bool {
        matches!(self.kind, NodeKind::Epic { .. })
    }

    pub fn module(&self) -> &str {
        &self.location.module
    }

    pub fn layer(&self) -> Option<&str> {
        self.location.layer.as_deref()
    }

    /// Requests issued by an epic; empty for every other kind.
    pub fn requests(&self) -> &[ApiRequest] {
        match &self.kind {
            NodeKind::Epic { api_call } => &api_call.requests,
            _ => &[],
        }
    }
}
