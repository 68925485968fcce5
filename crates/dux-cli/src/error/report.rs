//! Miette diagnostic conversion for CLI errors.

use miette::Report;

use crate::error::CliError;

/// Convert a [`CliError`] into a miette report for the top-level `main`.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Graph(dux_graph::Error::InvalidPayload(source)) => miette::miette!(
            "Invalid graph payload: {}\n\nHint: The payload must be a JSON object with `nodes` and `relations` maps",
            source
        ),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::path::PathBuf;

    #[test]
    fn config_errors_are_labelled() {
        let report = cli_error_to_miette(ConfigError::NotFound(PathBuf::from("x.json")).into());
        assert!(report.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn payload_errors_get_a_hint() {
        let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let report = cli_error_to_miette(dux_graph::Error::InvalidPayload(json_err).into());
        assert!(report.to_string().contains("`nodes` and `relations`"));
    }
}
