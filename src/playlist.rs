//! Playlist module: the `Track` model and the persisted `PlaylistStore`.
//!
//! Insertion order is display order, and a track's position in the store is
//! the index used for selection everywhere else.

mod defaults;
mod store;
mod track;

pub use defaults::demo_tracks;
pub use store::PlaylistStore;
pub use track::Track;

#[cfg(test)]
mod tests;
