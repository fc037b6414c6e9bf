//! Source-type resolution: adaptive attach or direct assignment.

use super::{AdaptiveEngine, MediaPlayer};

/// A manifest URL handed to the adaptive engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptiveSource {
    url: String,
}

impl AdaptiveSource {
    pub fn url(&self) -> &str {
        &self.url
    }

    fn attach(&self, engine: &mut dyn AdaptiveEngine, player: &mut dyn MediaPlayer) {
        engine.load_source(&self.url);
        engine.attach_media(player);
    }
}

/// A URL assigned straight to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectSource {
    url: String,
}

impl DirectSource {
    pub fn url(&self) -> &str {
        &self.url
    }

    fn attach(&self, player: &mut dyn MediaPlayer) {
        player.set_source(&self.url);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSource {
    Adaptive(AdaptiveSource),
    Direct(DirectSource),
}

impl ResolvedSource {
    pub fn url(&self) -> &str {
        match self {
            Self::Adaptive(s) => s.url(),
            Self::Direct(s) => s.url(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Adaptive(_) => "adaptive",
            Self::Direct(_) => "direct",
        }
    }

    /// Hand the source to its collaborator. An adaptive source with no
    /// engine degrades to direct assignment.
    pub fn attach(
        &self,
        engine: Option<&mut (dyn AdaptiveEngine + 'static)>,
        player: &mut dyn MediaPlayer,
    ) {
        match (self, engine) {
            (Self::Adaptive(src), Some(engine)) => src.attach(engine, player),
            (Self::Adaptive(src), None) => player.set_source(src.url()),
            (Self::Direct(src), _) => src.attach(player),
        }
    }
}

/// True when the URL's path ends in one of `extensions` (case-insensitive,
/// with or without a leading dot). Query string and fragment are ignored.
pub fn is_manifest_url<S: AsRef<str>>(url: &str, extensions: &[S]) -> bool {
    let path = url.split('#').next().unwrap_or(url);
    let path = path.split('?').next().unwrap_or(path).to_ascii_lowercase();

    extensions.iter().any(|ext| {
        let ext = ext.as_ref().trim_start_matches('.');
        !ext.is_empty() && path.ends_with(&format!(".{}", ext.to_ascii_lowercase()))
    })
}

/// Pick the playback path for `url`: adaptive only when an engine is
/// available and supported and the URL looks like a manifest.
pub fn resolve_source<S: AsRef<str>>(
    url: &str,
    adaptive_supported: bool,
    extensions: &[S],
) -> ResolvedSource {
    if adaptive_supported && is_manifest_url(url, extensions) {
        ResolvedSource::Adaptive(AdaptiveSource {
            url: url.to_string(),
        })
    } else {
        ResolvedSource::Direct(DirectSource {
            url: url.to_string(),
        })
    }
}
