//! Shared utilities for command implementations.

use crate::cli::SourceArgs;
use crate::config::{ConfigOverrides, DuxConfig};
use crate::error::{Result, ResultExt};
use crate::ui;
use dux_graph::{Graph, GraphEditor, GraphPayload, renormalize_ids};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Path that selects stdin instead of a file.
pub const STDIN_PATH: &str = "-";

/// Read and parse a payload file, or stdin for `-`.
pub fn read_payload(path: &Path) -> Result<GraphPayload> {
    let text = if path == Path::new(STDIN_PATH) {
        std::io::read_to_string(std::io::stdin())?
    } else {
        fs::read_to_string(path).with_path(path)?
    };
    Ok(GraphPayload::from_json(&text)?)
}

/// Build the raw graph described by `source`.
pub fn load_graph(source: &SourceArgs) -> Result<Graph> {
    let mut payload = read_payload(&source.payload)?;
    if source.renormalize {
        payload = renormalize_ids(payload);
    }
    let graph = Graph::from_payload(payload);
    debug!(
        nodes = graph.node_count(),
        relations = graph.relation_count(),
        "loaded graph"
    );
    Ok(graph)
}

/// Load config and graph, and restore the view state from `fragment`.
///
/// The config seeds the view state; fields present in the fragment win.
pub fn open_editor(
    source: &SourceArgs,
    overrides: &ConfigOverrides,
    fragment: Option<&str>,
) -> Result<(DuxConfig, GraphEditor)> {
    let config = DuxConfig::load(overrides, source.config.as_deref())?;
    let graph = load_graph(source)?;

    let mut state = config.initial_view_state();
    if let Some(fragment) = fragment {
        let applied = state.apply_fragment(fragment);
        debug!(applied, "restored view state from fragment");
        if applied == 0 && !fragment.trim_start_matches('#').is_empty() {
            ui::warning("The --state fragment contained no usable fields; using defaults");
        }
    }

    Ok((config, GraphEditor::with_state(graph, state)))
}

/// Write `text` to `output`, or to stdout when no file is given.
pub fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text).with_path(path),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}

/// `a, b, c`, or `-` for an empty list.
pub fn join_or_dash<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined.join(", ")
    }
}
