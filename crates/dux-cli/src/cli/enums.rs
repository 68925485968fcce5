use clap::ValueEnum;
use dux_graph::LayoutDirection;
use serde::{Deserialize, Serialize};

/// Output format for `dux render`
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered graph document with nodes, relations, clusters and badges
    #[default]
    #[value(name = "json")]
    Json,

    /// Graphviz source, ready for `dot -Tsvg`
    #[value(name = "dot")]
    Dot,
}

/// Graph flow direction
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Layout {
    /// Left to right
    #[value(name = "LR", alias = "lr")]
    LeftRight,

    /// Top to bottom
    #[value(name = "TB", alias = "tb")]
    TopBottom,
}

impl From<Layout> for LayoutDirection {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::LeftRight => LayoutDirection::LR,
            Layout::TopBottom => LayoutDirection::TB,
        }
    }
}
