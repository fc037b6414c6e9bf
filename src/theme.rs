//! Light/dark theme preference and its terminal palette.

use ratatui::style::Color;
use tracing::{debug, warn};

use crate::error::Result;
use crate::storage::{KeyValueStore, THEME_KEY};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Colors used by the UI for one theme.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub active: Color,
}

impl Theme {
    /// `"light"` or `"dark"`, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Parse `s`, using `fallback` for anything unrecognized.
    pub fn parse_or(s: &str, fallback: Self) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            warn!(theme = s, "unknown theme");
            fallback
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// The persisted theme, or `default` when none (or garbage) is stored.
    pub fn load(kv: &dyn KeyValueStore, default: Self) -> Self {
        match kv.get(THEME_KEY) {
            Some(raw) => Self::parse_or(&raw, default),
            None => default,
        }
    }

    pub fn save(self, kv: &mut dyn KeyValueStore) -> Result<()> {
        debug!(theme = self.as_str(), "saving theme");
        kv.set(THEME_KEY, self.as_str().to_string())
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                fg: Color::Gray,
                bg: Color::Reset,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                active: Color::LightGreen,
            },
            Self::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::Gray,
                active: Color::Green,
            },
        }
    }
}
