#[cfg(test)]
mod tests {
    use crate::cli::OutputFormat;
    use crate::config::*;
    use crate::error::{CliError, ConfigError};
    use dux_graph::LayoutDirection;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = DuxConfig::default();
        assert!(config.embed_special_actions);
        assert!(config.group_by_modules);
        assert!(config.prettify_names);
        assert_eq!(config.layout_direction, LayoutDirection::LR);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_serialization_uses_snake_case_and_lowercase_format() {
        let value = serde_json::to_value(DuxConfig::default()).unwrap();
        assert_eq!(value["group_by_modules"], true);
        assert_eq!(value["layout_direction"], "LR");
        assert_eq!(value["format"], "json");
    }

    #[test]
    fn test_file_values_are_loaded() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"{"group_by_modules": false, "layout_direction": "TB", "format": "dot"}"#,
        );

        let config = DuxConfig::load(&ConfigOverrides::default(), Some(&path)).unwrap();
        assert!(!config.group_by_modules);
        assert_eq!(config.layout_direction, LayoutDirection::TB);
        assert_eq!(config.format, OutputFormat::Dot);
        assert!(config.embed_special_actions);
    }

    #[test]
    fn test_cli_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, r#"{"format": "dot", "embed_special_actions": true}"#);

        let overrides = ConfigOverrides {
            format: Some(OutputFormat::Json),
            embed_special_actions: Some(false),
            ..ConfigOverrides::default()
        };
        let config = DuxConfig::load(&overrides, Some(&path)).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.embed_special_actions);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.json");
        let err = DuxConfig::load(&ConfigOverrides::default(), Some(&missing)).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_invalid_value_names_the_field() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, r#"{"layout_direction": "diagonal"}"#);
        let err = DuxConfig::load(&ConfigOverrides::default(), Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::InvalidValue { .. })));
        assert!(err.to_string().contains("layout_direction"));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, r#"{"groupByModules": false}"#);
        assert!(DuxConfig::load(&ConfigOverrides::default(), Some(&path)).is_err());
    }

    #[test]
    fn test_initial_view_state_is_seeded() {
        let config = DuxConfig {
            embed_special_actions: false,
            group_by_modules: false,
            layout_direction: LayoutDirection::TB,
            ..DuxConfig::default()
        };
        let state = config.initial_view_state();
        assert!(!state.embed_special_actions);
        assert!(!state.group_by_modules);
        assert_eq!(state.layout_direction, LayoutDirection::TB);
        assert!(state.removed_ids.is_empty());
        assert!(state.focus_id.is_none());
    }
}
