//! Projects the playlist (or a filtered subset of it) onto mounted panes.
//!
//! Panes are the TUI's mount points. Which ones exist is decided by the
//! `ui.panes` setting, and every operation here is a no-op when its target
//! pane is not mounted.

mod mounts;

pub use mounts::{ListContent, ListItem, ListPane, Mounts, Pane};

use crate::playlist::{PlaylistStore, Track};

/// Primary id of the playlist pane.
pub const PLAYLIST_MOUNT: &str = "playlist";
/// Looked up when no pane is mounted under [`PLAYLIST_MOUNT`].
pub const PLAYLIST_FALLBACK_MOUNT: &str = "list";
/// Pane holding the now-playing title label.
pub const TITLE_MOUNT: &str = "title";
/// Shown instead of a list when there is nothing to show.
pub const NO_RESULTS: &str = "No results";

/// Rebuild the playlist pane from the whole store.
pub fn render_full(mounts: &mut Mounts, store: &PlaylistStore, active: Option<usize>) {
    let tracks: Vec<(usize, &Track)> = store.all().iter().enumerate().collect();
    render_filtered(mounts, &tracks, active);
}

/// Rebuild the playlist pane from `tracks`, each paired with its index in
/// the unfiltered playlist.
pub fn render_filtered(mounts: &mut Mounts, tracks: &[(usize, &Track)], active: Option<usize>) {
    let Some(pane) = mounts.list_mut() else {
        return;
    };

    if tracks.is_empty() {
        pane.replace(ListContent::Placeholder(NO_RESULTS));
        return;
    }

    let items = tracks
        .iter()
        .map(|&(index, track)| ListItem {
            index,
            title: track.title().to_string(),
            language: track.language().to_string(),
            has_logo: !track.logo_url().is_empty(),
            playable: track.is_playable(),
            active: active == Some(index),
        })
        .collect();

    pane.replace(ListContent::Items(items));
}
