use tracing::warn;

use super::{PLAYLIST_FALLBACK_MOUNT, PLAYLIST_MOUNT};

/// A rendered playlist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Position of the track in the unfiltered playlist.
    pub index: usize,
    pub title: String,
    pub language: String,
    pub has_logo: bool,
    pub playable: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    Items(Vec<ListItem>),
    Placeholder(&'static str),
}

impl Default for ListContent {
    fn default() -> Self {
        Self::Items(Vec::new())
    }
}

/// Contents of a list pane plus the keyboard cursor over its rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPane {
    content: ListContent,
    cursor: usize,
}

impl ListPane {
    /// Clear and refill the pane. The cursor stays on the same track when
    /// it survives the rebuild, otherwise it goes back to the top.
    pub(super) fn replace(&mut self, content: ListContent) {
        let previous = self.cursor_index();
        self.content = content;
        self.cursor = previous
            .and_then(|idx| self.items().iter().position(|it| it.index == idx))
            .unwrap_or(0);
    }

    pub fn content(&self) -> &ListContent {
        &self.content
    }

    pub fn items(&self) -> &[ListItem] {
        match &self.content {
            ListContent::Items(items) => items,
            ListContent::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self.content {
            ListContent::Placeholder(text) => Some(text),
            ListContent::Items(_) => None,
        }
    }

    /// Resolve a rendered row to the playlist index it was built from.
    pub fn index_at(&self, position: usize) -> Option<usize> {
        self.items().get(position).map(|it| it.index)
    }

    /// Mark the row built from playlist index `index` active and every other
    /// row inactive.
    pub fn mark_active(&mut self, index: usize) {
        if let ListContent::Items(items) = &mut self.content {
            for item in items.iter_mut() {
                item.active = item.index == index;
            }
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.items().iter().find(|it| it.active).map(|it| it.index)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Playlist index under the cursor.
    pub fn cursor_index(&self) -> Option<usize> {
        self.index_at(self.cursor)
    }

    /// Move the cursor by `delta` rows, wrapping around at both ends.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.items().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let len = len as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.items().len().saturating_sub(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pane {
    Header,
    /// Now-playing title label.
    Label(Option<String>),
    Search,
    List(ListPane),
    Controls,
}

impl Pane {
    fn for_id(id: &str) -> Option<Self> {
        match id {
            "header" => Some(Self::Header),
            "title" => Some(Self::Label(None)),
            "search" => Some(Self::Search),
            PLAYLIST_MOUNT | PLAYLIST_FALLBACK_MOUNT => Some(Self::List(ListPane::default())),
            "controls" => Some(Self::Controls),
            _ => None,
        }
    }
}

/// The set of mounted panes, in layout order.
#[derive(Debug, Clone, Default)]
pub struct Mounts {
    panes: Vec<(String, Pane)>,
}

impl Mounts {
    /// Mount one pane per known id. Unknown and repeated ids are skipped.
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Self {
        let mut mounts = Self::default();
        for id in ids {
            let id = id.as_ref();
            if mounts.is_mounted(id) {
                continue;
            }
            match Pane::for_id(id) {
                Some(pane) => mounts.panes.push((id.to_string(), pane)),
                None => warn!(pane = id, "ignoring unknown pane"),
            }
        }
        mounts
    }

    pub fn panes(&self) -> impl Iterator<Item = (&str, &Pane)> {
        self.panes.iter().map(|(id, pane)| (id.as_str(), pane))
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.panes.iter().any(|(pid, _)| pid == id)
    }

    fn get(&self, id: &str) -> Option<&Pane> {
        self.panes.iter().find(|(pid, _)| pid == id).map(|(_, p)| p)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Pane> {
        self.panes
            .iter_mut()
            .find(|(pid, _)| pid == id)
            .map(|(_, p)| p)
    }

    fn list_id(&self) -> Option<&'static str> {
        [PLAYLIST_MOUNT, PLAYLIST_FALLBACK_MOUNT]
            .into_iter()
            .find(|id| matches!(self.get(id), Some(Pane::List(_))))
    }

    /// The playlist pane: [`PLAYLIST_MOUNT`], else [`PLAYLIST_FALLBACK_MOUNT`].
    pub fn list(&self) -> Option<&ListPane> {
        match self.get(self.list_id()?) {
            Some(Pane::List(pane)) => Some(pane),
            _ => None,
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut ListPane> {
        let id = self.list_id()?;
        match self.get_mut(id) {
            Some(Pane::List(pane)) => Some(pane),
            _ => None,
        }
    }

    /// Set the text of label pane `id`. Returns false when it isn't mounted.
    pub fn set_label(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(Pane::Label(label)) => {
                *label = Some(text.into());
                true
            }
            _ => false,
        }
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        match self.get(id) {
            Some(Pane::Label(label)) => label.as_deref(),
            _ => None,
        }
    }
}
