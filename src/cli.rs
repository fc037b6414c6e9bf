//! Command-line surface: the interactive player by default, plus `add` and
//! `list` for scripting the playlist.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::Settings;
use crate::playlist::{PlaylistStore, Track};
use crate::render::{ListContent, Mounts, PLAYLIST_MOUNT};
use crate::runtime;
use crate::session::Session;
use crate::storage::FileStore;

/// A simple TUI stream playlist player with Vim bindings
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Append a stream to the saved playlist
    Add {
        #[arg(long)]
        title: String,
        /// Stream URL (HLS manifest or anything the player can open)
        #[arg(long)]
        url: String,
        /// Logo image URL
        #[arg(long)]
        logo: Option<String>,
        /// Language tag shown next to the title
        #[arg(long)]
        lang: Option<String>,
    },
    /// Print the playlist, optionally narrowed by a title search
    List {
        #[arg(long)]
        filter: Option<String>,
    },
}

pub fn execute(command: Command, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Command::Add {
            title,
            url,
            logo,
            lang,
        } => {
            let mut track = Track::new(title, url);
            if let Some(logo) = logo {
                track = track.with_logo(logo);
            }
            if let Some(lang) = lang {
                track = track.with_language(lang);
            }
            add(track, settings)
        }
        Command::List { filter } => {
            let mut session = runtime::build_session(settings, Mounts::from_ids(&[PLAYLIST_MOUNT]));
            if let Some(q) = filter {
                session.filter(&q);
            }
            for line in list_lines(&session) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Unlike the TUI, a store that can't be opened or written is an error here.
fn add(track: Track, settings: &Settings) -> anyhow::Result<()> {
    let path = settings.storage.resolved_path();
    let mut kv = FileStore::open(&path)
        .with_context(|| format!("opening store {}", path.display()))?;

    let mut store = PlaylistStore::new();
    store.load(&kv);
    let title = track.title().to_string();
    store
        .add(track, &mut kv)
        .with_context(|| format!("saving playlist to {}", kv.path().display()))?;

    info!(title = %title, total = store.len(), "track added");
    println!("added \"{title}\" ({} tracks)", store.len());
    Ok(())
}

/// One line per rendered row: position, title, language and URL.
fn list_lines(session: &Session) -> Vec<String> {
    let Some(list) = session.mounts().list() else {
        return Vec::new();
    };

    match list.content() {
        ListContent::Placeholder(text) => vec![text.to_string()],
        ListContent::Items(items) => items
            .iter()
            .map(|item| {
                let url = session
                    .store()
                    .get(item.index)
                    .and_then(Track::source_url)
                    .unwrap_or("-");
                format!("{:>3}  {}  [{}]  {}", item.index, item.title, item.language, url)
            })
            .collect(),
    }
}
