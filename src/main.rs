use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod error;
mod filter;
mod player;
mod playlist;
mod render;
mod runtime;
mod session;
mod storage;
mod theme;
mod ui;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    let settings = runtime::load_settings(args.config.as_deref());

    match args.command {
        None => {
            init_file_logging(&settings)?;
            runtime::run(&settings)
        }
        Some(command) => {
            init_stderr_logging(&settings);
            cli::execute(command, &settings)
        }
    }
}

fn env_filter(settings: &config::Settings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter))
}

/// The TUI owns the terminal, so it only logs to a file, and only when asked to.
fn init_file_logging(settings: &config::Settings) -> anyhow::Result<()> {
    if !settings.logging.enabled {
        return Ok(());
    }

    let path = settings
        .logging
        .resolved_path(&settings.storage.resolved_path());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

fn init_stderr_logging(settings: &config::Settings) {
    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
