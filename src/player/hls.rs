//! `AdaptiveEngine` for HLS.
//!
//! Master manifests are fetched on a background thread (HTTP(S) through a
//! blocking `reqwest` client, anything else read from disk), parsed with
//! `m3u8-rs`, and reported back over a channel drained by `poll_event`.
//! Each load bumps a generation counter so results of superseded loads are
//! dropped. The player is pointed at the master URL while the level is
//! automatic, and at the variant's URI once a level is pinned.

use std::fs;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use m3u8_rs::Playlist;
use reqwest::blocking::Client;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::AdaptiveSettings;
use crate::error::{Error, Result};

use super::types::{AdaptiveEvent, Level};
use super::{AdaptiveEngine, MediaPlayer};

/// A level plus the URI of its media playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Variant {
    pub(super) level: Level,
    pub(super) uri: String,
}

struct Loaded {
    generation: u64,
    url: String,
    result: Result<Vec<Variant>>,
}

pub struct HlsEngine {
    client: Option<Client>,
    tx: Sender<Loaded>,
    rx: Receiver<Loaded>,

    generation: u64,
    source: Option<String>,
    variants: Vec<Variant>,
    levels: Vec<Level>,
    current_level: Option<usize>,
}

impl HlsEngine {
    pub fn new(settings: &AdaptiveSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.fetch_timeout_secs))
            .build();
        let client = match client {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("HTTP client unavailable, adaptive streaming disabled: {e}");
                None
            }
        };

        let (tx, rx) = mpsc::channel();
        Self {
            client,
            tx,
            rx,
            generation: 0,
            source: None,
            variants: Vec::new(),
            levels: Vec::new(),
            current_level: None,
        }
    }

    fn accept(&mut self, loaded: Loaded) -> AdaptiveEvent {
        match loaded.result {
            Ok(variants) => {
                info!(url = %loaded.url, variants = variants.len(), "manifest loaded");
                self.levels = variants.iter().map(|v| v.level).collect();
                self.variants = variants;
                AdaptiveEvent::ManifestParsed {
                    levels: self.levels.clone(),
                }
            }
            Err(e) => {
                error!(url = %loaded.url, "{e}");
                AdaptiveEvent::Error {
                    url: loaded.url,
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl AdaptiveEngine for HlsEngine {
    fn is_supported(&self) -> bool {
        self.client.is_some()
    }

    fn load_source(&mut self, url: &str) {
        let Some(client) = self.client.clone() else {
            return;
        };

        self.generation += 1;
        self.source = Some(url.to_string());
        self.variants.clear();
        self.levels.clear();
        self.current_level = None;

        let generation = self.generation;
        let url = url.to_string();
        let tx = self.tx.clone();
        debug!(generation, url = %url, "loading manifest");
        thread::spawn(move || {
            let result = fetch_manifest(&client, &url).and_then(|body| parse_manifest(&url, &body));
            // The engine may be gone by now; nothing to report to.
            let _ = tx.send(Loaded {
                generation,
                url,
                result,
            });
        });
    }

    fn attach_media(&mut self, player: &mut dyn MediaPlayer) {
        let pinned = self
            .current_level
            .and_then(|i| self.variants.get(i))
            .map(|v| v.uri.as_str());
        if let Some(url) = pinned.or(self.source.as_deref()) {
            player.set_source(url);
        }
    }

    fn levels(&self) -> &[Level] {
        &self.levels
    }

    fn set_current_level(&mut self, level: Option<usize>) {
        self.current_level = level.filter(|&i| i < self.variants.len());
    }

    fn current_level(&self) -> Option<usize> {
        self.current_level
    }

    fn poll_event(&mut self) -> Option<AdaptiveEvent> {
        while let Ok(loaded) = self.rx.try_recv() {
            if loaded.generation != self.generation {
                debug!(generation = loaded.generation, "dropping superseded manifest");
                continue;
            }
            return Some(self.accept(loaded));
        }
        None
    }
}

fn fetch_manifest(client: &Client, url: &str) -> Result<Vec<u8>> {
    let fetch_err = |reason: String| Error::ManifestFetch {
        url: url.to_string(),
        reason,
    };

    if url.starts_with("http://") || url.starts_with("https://") {
        let body = client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(|e| fetch_err(e.to_string()))?;
        Ok(body.to_vec())
    } else {
        let path = url.strip_prefix("file://").unwrap_or(url);
        fs::read(path).map_err(|e| fetch_err(e.to_string()))
    }
}

/// Parse manifest bytes into variants. A media playlist is a single
/// rendition and yields no variants. I-frame-only variants are skipped.
pub(super) fn parse_manifest(url: &str, body: &[u8]) -> Result<Vec<Variant>> {
    let playlist = m3u8_rs::parse_playlist_res(body).map_err(|e| Error::ManifestParse {
        url: url.to_string(),
        reason: format!("{e:?}"),
    })?;

    let variants = match playlist {
        Playlist::MasterPlaylist(master) => master
            .variants
            .into_iter()
            .filter(|v| !v.is_i_frame)
            .map(|v| Variant {
                level: Level {
                    height: v
                        .resolution
                        .map(|r| u32::try_from(r.height).unwrap_or(u32::MAX))
                        .unwrap_or(0),
                    bitrate: v.bandwidth,
                },
                uri: resolve_uri(url, &v.uri),
            })
            .collect(),
        Playlist::MediaPlaylist(_) => Vec::new(),
    };
    Ok(variants)
}

/// Resolve a variant URI against the manifest location.
pub(super) fn resolve_uri(base: &str, uri: &str) -> String {
    if let Ok(base) = Url::parse(base) {
        if let Ok(joined) = base.join(uri) {
            return joined.to_string();
        }
    }
    if Url::parse(uri).is_ok() || Path::new(uri).is_absolute() {
        return uri.to_string();
    }
    match Path::new(base).parent() {
        Some(dir) => dir.join(uri).to_string_lossy().into_owned(),
        None => uri.to_string(),
    }
}
