use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;

const CONFIG_PATH_VAR: &str = "CHANPLAY_CONFIG_PATH";
const ENV_PREFIX: &str = "CHANPLAY";

impl Settings {
    /// Load settings from the resolved config path and the environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Load settings from `path` (when given and present) and the
    /// environment. Environment variables win over the file.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.player.command.trim().is_empty() {
            return Err("player.command must not be empty".to_string());
        }
        if self
            .adaptive
            .manifest_extensions
            .iter()
            .all(|ext| ext.trim_start_matches('.').trim().is_empty())
        {
            return Err("adaptive.manifest_extensions must name at least one extension".to_string());
        }
        Ok(())
    }
}

/// `CHANPLAY_CONFIG_PATH` if set, else the XDG default.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/chanplay/config.toml`, or `~/.config/chanplay/config.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("chanplay").join("config.toml"))
}
