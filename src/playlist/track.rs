use serde::{Deserialize, Serialize};

/// Title shown for entries persisted without one.
pub const UNTITLED: &str = "Untitled";
/// Language tag used when an entry doesn't carry one.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// One playlist entry.
///
/// Fields mirror the persisted JSON object. Two legacy keys may carry the
/// source URL (`stream_url` and the older `stream`), so both are kept and
/// [`Track::source_url`] picks the first non-empty one. Empty strings are
/// treated as absent by all accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

impl Track {
    pub fn new(title: impl Into<String>, stream_url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            stream_url: Some(stream_url.into()),
            ..Self::default()
        }
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Display text, falling back to a placeholder.
    pub fn title(&self) -> &str {
        self.raw_title().unwrap_or(UNTITLED)
    }

    /// The title as stored, if any. Search only ever matches against this.
    pub fn raw_title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    /// Playable URL: `stream_url`, else `stream`.
    pub fn source_url(&self) -> Option<&str> {
        non_empty(&self.stream_url).or_else(|| non_empty(&self.stream))
    }

    pub fn is_playable(&self) -> bool {
        self.source_url().is_some()
    }

    pub fn logo_url(&self) -> &str {
        non_empty(&self.logo).unwrap_or("")
    }

    pub fn language(&self) -> &str {
        non_empty(&self.lang).unwrap_or(UNKNOWN_LANGUAGE)
    }
}
