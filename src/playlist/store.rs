use tracing::{debug, info, warn};

use crate::error::Result;
use crate::storage::{KeyValueStore, PLAYLIST_KEY};

use super::{Track, demo_tracks};

/// The ordered playlist, persisted under [`PLAYLIST_KEY`].
#[derive(Debug, Default)]
pub struct PlaylistStore {
    tracks: Vec<Track>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the in-memory playlist with the persisted one.
    ///
    /// Missing, malformed or empty persisted data yields the demo set. This
    /// never fails.
    pub fn load(&mut self, kv: &dyn KeyValueStore) {
        let persisted = parse_persisted(kv.get(PLAYLIST_KEY).as_deref());
        if persisted.is_empty() {
            info!("no saved playlist, using built-in demo tracks");
            self.tracks = demo_tracks();
        } else {
            debug!(count = persisted.len(), "loaded saved playlist");
            self.tracks = persisted;
        }
    }

    /// Append `track` and persist the whole playlist.
    ///
    /// The track stays in memory even when persisting fails.
    pub fn add(&mut self, track: Track, kv: &mut dyn KeyValueStore) -> Result<()> {
        self.tracks.push(track);
        let body = serde_json::to_string(&self.tracks)?;
        kv.set(PLAYLIST_KEY, body)
    }

    pub fn all(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Parse a persisted playlist string; anything unparseable is an empty list.
pub(super) fn parse_persisted(raw: Option<&str>) -> Vec<Track> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<Track>>(raw) {
        Ok(tracks) => tracks,
        Err(e) => {
            warn!("ignoring malformed saved playlist: {e}");
            Vec::new()
        }
    }
}
