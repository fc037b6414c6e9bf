//! The running player's state: playlist, panes, search and theme, plus the
//! coordinator that drives playback. Everything the runtime and the CLI do
//! goes through a `Session`.

use tracing::{debug, info, warn};

use crate::filter;
use crate::player::{Coordinator, QualityOptions};
use crate::playlist::{PlaylistStore, Track};
use crate::render::{self, Mounts};
use crate::storage::KeyValueStore;
use crate::theme::Theme;

pub struct Session {
    kv: Box<dyn KeyValueStore>,
    store: PlaylistStore,
    coordinator: Coordinator,
    mounts: Mounts,

    query: String,
    search_mode: bool,
    theme: Theme,
    default_theme: Theme,
    initialized: bool,
}

impl Session {
    pub fn new(
        kv: Box<dyn KeyValueStore>,
        coordinator: Coordinator,
        mounts: Mounts,
        default_theme: Theme,
    ) -> Self {
        Self {
            kv,
            store: PlaylistStore::new(),
            coordinator,
            mounts,
            query: String::new(),
            search_mode: false,
            theme: default_theme,
            default_theme,
            initialized: false,
        }
    }

    /// Load the playlist and theme and render the full list. Only the first
    /// call does anything.
    pub fn initialize(&mut self) {
        if self.initialized {
            debug!("session already initialized");
            return;
        }
        self.initialized = true;

        self.store.load(&*self.kv);
        self.theme = Theme::load(&*self.kv, self.default_theme);
        render::render_full(&mut self.mounts, &self.store, self.coordinator.selection());
        info!(
            tracks = self.store.len(),
            theme = self.theme.as_str(),
            "session initialized"
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Append a track, persist, and show the full unfiltered list again.
    pub fn add_track(&mut self, track: Track) {
        info!(title = track.title(), "adding track");
        if let Err(e) = self.store.add(track, &mut *self.kv) {
            warn!("playlist not saved: {e}");
        }
        self.query.clear();
        render::render_full(&mut self.mounts, &self.store, self.coordinator.selection());
    }

    /// Show only tracks whose title contains `query`; blank shows all.
    pub fn filter(&mut self, query: &str) {
        self.query = query.to_string();
        filter::apply(&self.query, &self.store, &mut self.mounts, self.coordinator.selection());
    }

    /// Play the track shown at `position` in the rendered list.
    pub fn select(&mut self, position: usize) {
        let Some(index) = self.mounts.list().and_then(|list| list.index_at(position)) else {
            debug!(position, "nothing rendered at position");
            return;
        };
        self.coordinator.play_at(index, &self.store, &mut self.mounts);
    }

    /// Play the track under the list cursor.
    pub fn select_cursor(&mut self) {
        if let Some(position) = self.mounts.list().map(|list| list.cursor()) {
            self.select(position);
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if let Some(list) = self.mounts.list_mut() {
            list.move_cursor(delta);
        }
    }

    pub fn cursor_first(&mut self) {
        if let Some(list) = self.mounts.list_mut() {
            list.cursor_first();
        }
    }

    pub fn cursor_last(&mut self) {
        if let Some(list) = self.mounts.list_mut() {
            list.cursor_last();
        }
    }

    pub fn begin_search(&mut self) {
        self.search_mode = true;
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.filter(&query);
    }

    pub fn pop_search_char(&mut self) {
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.filter(&query);
    }

    /// Leave search mode and show the whole playlist again.
    pub fn cancel_search(&mut self) {
        self.search_mode = false;
        self.filter("");
    }

    /// Leave search mode keeping the filter, and play the row under the cursor.
    pub fn submit_search(&mut self) {
        self.search_mode = false;
        self.select_cursor();
    }

    /// Returns true when the quality menu changed.
    pub fn pump_events(&mut self) -> bool {
        self.coordinator.pump_events()
    }

    pub fn change_quality(&mut self, height: u32) -> bool {
        self.coordinator.change_quality(height)
    }

    /// Flip the theme and persist it. A failed save keeps the new theme for
    /// this run.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!(theme = self.theme.as_str(), "theme toggled");
        if let Err(e) = self.theme.save(&mut *self.kv) {
            warn!("theme not saved: {e}");
        }
    }

    pub fn store(&self) -> &PlaylistStore {
        &self.store
    }

    pub fn mounts(&self) -> &Mounts {
        &self.mounts
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search_mode(&self) -> bool {
        self.search_mode
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn selection(&self) -> Option<usize> {
        self.coordinator.selection()
    }

    pub fn is_playing(&self) -> bool {
        self.coordinator.is_playing()
    }

    pub fn quality_options(&self) -> Option<&QualityOptions> {
        self.coordinator.quality_options()
    }

    pub fn selected_quality(&self) -> Option<u32> {
        self.coordinator.selected_quality()
    }
}
