//! Title search over the playlist.

use crate::playlist::{PlaylistStore, Track};
use crate::render::{self, Mounts};

/// Trimmed, lower-cased query, or `None` when there is nothing to search for.
pub fn normalize_query(query: &str) -> Option<String> {
    let q = query.trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_lowercase())
    }
}

/// Tracks whose stored title contains `needle` (already normalized),
/// paired with their playlist index. Untitled tracks never match.
pub fn matching<'a>(tracks: &'a [Track], needle: &str) -> Vec<(usize, &'a Track)> {
    tracks
        .iter()
        .enumerate()
        .filter(|(_, track)| {
            track
                .raw_title()
                .is_some_and(|title| title.to_lowercase().contains(needle))
        })
        .collect()
}

/// Render the playlist pane for `query`: the full playlist for a blank
/// query, otherwise just the matches.
pub fn apply(query: &str, store: &PlaylistStore, mounts: &mut Mounts, active: Option<usize>) {
    match normalize_query(query) {
        None => render::render_full(mounts, store, active),
        Some(needle) => {
            let hits = matching(store.all(), &needle);
            render::render_filtered(mounts, &hits, active);
        }
    }
}
