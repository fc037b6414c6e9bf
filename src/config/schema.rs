use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/chanplay/config.toml` or
/// `~/.config/chanplay/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CHANPLAY__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub player: PlayerSettings,
    pub adaptive: AdaptiveSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Key-value store file. Defaults to [`default_data_dir`]`/store.json`.
    pub path: Option<PathBuf>,
}

impl StorageSettings {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| default_data_dir().join("store.json"))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Program spawned to play a stream; the URL is passed as the last argument.
    pub command: String,
    /// Extra arguments placed before the URL.
    pub args: Vec<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            command: "mpv".to_string(),
            args: vec!["--force-window=yes".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdaptiveSettings {
    /// Whether manifest URLs go through the HLS engine at all.
    pub enabled: bool,
    /// URL path suffixes treated as adaptive manifests (case-insensitive).
    pub manifest_extensions: Vec<String>,
    /// Timeout for manifest downloads (seconds).
    pub fetch_timeout_secs: u64,
}

impl Default for AdaptiveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            manifest_extensions: vec!["m3u8".to_string()],
            fetch_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Panes to mount, top to bottom.
    ///
    /// Known ids: "header", "title", "search", "playlist" (or "list"), "controls".
    pub panes: Vec<String>,

    /// Theme used until one is persisted: "light" or "dark".
    pub default_theme: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ chanplay ~ ".to_string(),
            panes: ["header", "title", "search", "playlist", "controls"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Write a log file while the TUI is running.
    pub enabled: bool,
    /// Log file. Defaults to `chanplay.log` next to the store file.
    pub path: Option<PathBuf>,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: None,
            filter: "info".to_string(),
        }
    }
}

impl LoggingSettings {
    pub fn resolved_path(&self, store_path: &Path) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            store_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("chanplay.log")
        })
    }
}

/// `$XDG_DATA_HOME/chanplay`, or `~/.local/share/chanplay`, or `./chanplay`
/// as a last resort.
pub fn default_data_dir() -> PathBuf {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from(".")
    };
    data_home.join("chanplay")
}
