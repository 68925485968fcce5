//! Terminal output helpers.
//!
//! Status messages go to stderr so that rendered graphs on stdout can be
//! piped. Colors are handled by `console` and switched off for `--no-color`,
//! `NO_COLOR` and non-terminal streams.
//!
//! ```no_run
//! use dux_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Rendered 12 nodes");
//! ```

mod format;
mod messages;

pub use format::{format_badge, plural};
pub use messages::{error, info, success, warning};

/// Check if color output should be enabled.
///
/// Respects `NO_COLOR` and `FORCE_COLOR`, then falls back to terminal
/// detection on stderr.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Configure `console` styling for both output streams.
pub fn init_colors(no_color: bool) {
    if no_color || !should_use_color() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}
