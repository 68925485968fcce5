use crate::config::{ConfigOverrides, DuxConfig};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "dux.config.json";

/// Prefix of the environment variables read into [`DuxConfig`].
pub const ENV_PREFIX: &str = "DUX_";

const ENV_KEYS: &[&str] = &[
    "embed_special_actions",
    "group_by_modules",
    "layout_direction",
    "format",
    "prettify_names",
];

impl DuxConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(overrides: &ConfigOverrides, config_path: Option<&Path>) -> Result<Self> {
        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                default_path.exists().then(|| PathBuf::from(CONFIG_FILE_NAME))
            }
        };

        Self::figment(overrides, config_file.as_deref())
            .extract()
            .map_err(|e| {
                let field = if e.path.is_empty() {
                    "configuration".to_string()
                } else {
                    e.path.join(".")
                };
                ConfigError::InvalidValue {
                    field,
                    value: e.to_string(),
                    hint: format!("Check {CONFIG_FILE_NAME} syntax, field names and {ENV_PREFIX}* variables"),
                }
                .into()
            })
    }

    fn figment(overrides: &ConfigOverrides, config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(DuxConfig::default()));

        if let Some(path) = config_file {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        // DUX_FORMAT, DUX_GROUP_BY_MODULES, ...
        figment = figment.merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS));

        figment.merge(Serialized::defaults(overrides))
    }
}
