//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Storage errors
    #[error("Failed to read store at {path}: {source}")]
    StoreRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write store at {path}: {source}")]
    StoreWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Player errors
    #[error("Player command `{command}` is not installed or available in PATH")]
    PlayerNotFound { command: String },

    #[error("Failed to start player `{command}`: {source}")]
    PlayerSpawn {
        command: String,
        source: std::io::Error,
    },

    #[error("No source assigned to the player")]
    NoSource,

    // Adaptive streaming errors
    #[error("Failed to fetch manifest {url}: {reason}")]
    ManifestFetch { url: String, reason: String },

    #[error("Failed to parse manifest {url}: {reason}")]
    ManifestParse { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
