use tracing::{debug, info, warn};

use crate::playlist::PlaylistStore;
use crate::render::{Mounts, TITLE_MOUNT};

use super::source::resolve_source;
use super::types::{AdaptiveEvent, QualityOptions};
use super::{AdaptiveEngine, MediaPlayer, ResolvedSource};

/// Drives the player for the current selection.
pub struct Coordinator {
    player: Box<dyn MediaPlayer>,
    engine: Option<Box<dyn AdaptiveEngine>>,
    manifest_extensions: Vec<String>,

    selection: Option<usize>,
    /// Set on the first `play_at` and never cleared: nothing here tracks
    /// pause or stop.
    is_playing: bool,
    adaptive_active: bool,
}

impl Coordinator {
    pub fn new(
        player: Box<dyn MediaPlayer>,
        engine: Option<Box<dyn AdaptiveEngine>>,
        manifest_extensions: Vec<String>,
    ) -> Self {
        Self {
            player,
            engine,
            manifest_extensions,
            selection: None,
            is_playing: false,
            adaptive_active: false,
        }
    }

    /// Play the track at playlist index `index`. Out-of-range indices are
    /// ignored.
    pub fn play_at(&mut self, index: usize, store: &PlaylistStore, mounts: &mut Mounts) {
        let Some(track) = store.get(index) else {
            debug!(index, len = store.len(), "ignoring out-of-range selection");
            return;
        };

        if let Some(pane) = mounts.list_mut() {
            pane.mark_active(index);
        }
        self.selection = Some(index);
        self.adaptive_active = false;
        self.player.set_quality_options(None);

        match track.source_url() {
            Some(url) => {
                let supported = self.engine.as_ref().is_some_and(|e| e.is_supported());
                let source = resolve_source(url, supported, &self.manifest_extensions);
                info!(index, kind = source.kind(), url, "starting playback");

                self.adaptive_active = matches!(source, ResolvedSource::Adaptive(_));
                source.attach(self.engine.as_deref_mut(), self.player.as_mut());
            }
            None => {
                warn!(index, title = track.title(), "track has no stream url");
                self.player.clear_source();
            }
        }

        mounts.set_label(TITLE_MOUNT, track.title());

        if let Err(e) = self.player.play() {
            warn!("player did not start: {e}");
        }
        self.is_playing = true;
    }

    /// Drain engine events. Returns true when anything visible changed.
    pub fn pump_events(&mut self) -> bool {
        let Some(engine) = self.engine.as_deref_mut() else {
            return false;
        };

        let mut changed = false;
        while let Some(event) = engine.poll_event() {
            match event {
                AdaptiveEvent::ManifestParsed { levels } if !self.adaptive_active => {
                    debug!(levels = levels.len(), "ignoring manifest for a direct source");
                }
                AdaptiveEvent::ManifestParsed { levels } => {
                    let options = QualityOptions::from_levels(&levels);
                    debug!(levels = levels.len(), ?options, "manifest parsed");
                    self.player.set_quality_options(options);
                    changed = true;
                }
                AdaptiveEvent::Error { url, .. } => {
                    debug!(url = %url, "adaptive load failed");
                }
            }
        }
        changed
    }

    /// Switch the adaptive engine to the first level of `height` and restart
    /// playback on it. Returns false when there is no such level or the
    /// current source isn't adaptive.
    pub fn change_quality(&mut self, height: u32) -> bool {
        if !self.adaptive_active {
            return false;
        }
        let Some(engine) = self.engine.as_deref_mut() else {
            return false;
        };
        let Some(level) = engine.levels().iter().position(|l| l.height == height) else {
            debug!(height, "no level with requested height");
            return false;
        };

        info!(height, level, "switching quality");
        engine.set_current_level(Some(level));
        engine.attach_media(self.player.as_mut());
        if let Err(e) = self.player.play() {
            warn!("player did not restart: {e}");
        }
        true
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn quality_options(&self) -> Option<&QualityOptions> {
        self.player.quality_options()
    }

    /// Height of the level pinned on the engine, or the menu default.
    pub fn selected_quality(&self) -> Option<u32> {
        let pinned = self
            .engine
            .as_deref()
            .filter(|_| self.adaptive_active)
            .and_then(|e| e.current_level().and_then(|i| e.levels().get(i)))
            .map(|l| l.height);
        pinned.or_else(|| self.quality_options().map(|q| q.default))
    }
}
