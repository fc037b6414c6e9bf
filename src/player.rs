//! Playback coordination.
//!
//! The coordinator never plays media itself. It decides whether a track's
//! URL goes through an [`AdaptiveEngine`] (HLS manifests) or straight to the
//! [`MediaPlayer`], and wires the engine's quality levels into the player.
//! Both collaborators are traits so the runtime can plug in the external
//! player process and the HLS engine, and tests can plug in recorders.

mod coordinator;
mod external;
mod hls;
mod source;
mod types;

pub use coordinator::Coordinator;
pub use external::ExternalPlayer;
pub use hls::HlsEngine;
pub use source::{AdaptiveSource, DirectSource, ResolvedSource, is_manifest_url, resolve_source};
pub use types::{AdaptiveEvent, Level, QualityOptions};

use crate::error::Result;

/// A media output the coordinator can hand sources to.
pub trait MediaPlayer {
    /// Assign the URL to play next.
    fn set_source(&mut self, url: &str);
    /// Forget the assigned URL so the next `play` has nothing to start.
    fn clear_source(&mut self);
    /// Start (or restart) playback of the assigned source.
    fn play(&mut self) -> Result<()>;
    /// Replace the quality menu. `None` removes it.
    fn set_quality_options(&mut self, options: Option<QualityOptions>);
    fn quality_options(&self) -> Option<&QualityOptions>;
}

/// Adaptive streaming: manifest loading and quality levels.
///
/// Loading is asynchronous; results come back through [`poll_event`].
/// Fetch and parse failures are the engine's to log, the coordinator does
/// not catch them.
///
/// [`poll_event`]: AdaptiveEngine::poll_event
pub trait AdaptiveEngine {
    fn is_supported(&self) -> bool;
    /// Start loading the manifest at `url`. Supersedes any earlier load.
    fn load_source(&mut self, url: &str);
    /// Point `player` at the rendition for the current level.
    fn attach_media(&mut self, player: &mut dyn MediaPlayer);
    fn levels(&self) -> &[Level];
    /// `None` selects automatic switching.
    fn set_current_level(&mut self, level: Option<usize>);
    fn current_level(&self) -> Option<usize>;
    fn poll_event(&mut self) -> Option<AdaptiveEvent>;
}

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;
