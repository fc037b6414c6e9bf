//! Layered settings: struct defaults, then an optional TOML file, then
//! `CHANPLAY__` environment variables.

mod load;
mod schema;

pub use schema::*;
