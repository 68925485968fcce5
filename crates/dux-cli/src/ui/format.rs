use dux_graph::HiddenNeighbors;

/// `1 node`, `3 nodes`.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// `▲n ▼m` hidden-neighbour badge, or `none` when nothing is hidden.
pub fn format_badge(hidden: &HiddenNeighbors) -> String {
    if hidden.any() {
        dux_graph::export::badge(hidden)
    } else {
        "none".to_string()
    }
}
