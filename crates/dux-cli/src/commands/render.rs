//! `dux render` - replay a view state and print the rendered graph.

use crate::cli::{OutputFormat, RenderArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use dux_graph::{DotOptions, GraphEditor, to_dot, to_json};
use tracing::info;

/// Execute the render command.
pub fn execute(args: RenderArgs) -> Result<()> {
    let (config, editor) = utils::open_editor(&args.source, &args.overrides(), args.state.as_deref())?;

    let text = render(&editor, config.format)?;
    utils::write_output(args.output.as_deref(), &text)?;

    let rendered = editor.rendered();
    let hidden = editor
        .initial_graph()
        .node_count()
        .saturating_sub(rendered.node_count());
    info!(
        nodes = rendered.node_count(),
        relations = rendered.relation_count(),
        hidden,
        "rendered graph"
    );

    if let Some(path) = &args.output {
        ui::success(&format!(
            "Wrote {} and {} to {}",
            ui::plural(rendered.node_count(), "node"),
            ui::plural(rendered.relation_count(), "relation"),
            path.display()
        ));
    }
    Ok(())
}

/// Serialize the editor's current view in `format`.
pub fn render(editor: &GraphEditor, format: OutputFormat) -> Result<String> {
    let rendered = editor.rendered();
    let initial = editor.initial_graph();
    Ok(match format {
        OutputFormat::Dot => to_dot(rendered, initial, &DotOptions::from(editor.state())),
        OutputFormat::Json => to_json(rendered, initial).to_json_string()?,
    })
}
