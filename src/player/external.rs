//! `MediaPlayer` backed by an external player process (mpv by default).

use std::io::ErrorKind;
use std::process::{Child, Command, Stdio};

use tracing::{debug, info};

use crate::config::PlayerSettings;
use crate::error::{Error, Result};

use super::MediaPlayer;
use super::types::QualityOptions;

pub struct ExternalPlayer {
    command: String,
    args: Vec<String>,
    source: Option<String>,
    quality: Option<QualityOptions>,
    child: Option<Child>,
}

impl ExternalPlayer {
    pub fn new(settings: &PlayerSettings) -> Self {
        Self {
            command: settings.command.clone(),
            args: settings.args.clone(),
            source: None,
            quality: None,
            child: None,
        }
    }

    /// Kill the running player process, if any.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            debug!(pid = child.id(), "stopping player process");
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl MediaPlayer for ExternalPlayer {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    fn clear_source(&mut self) {
        self.source = None;
    }

    /// Replace any running process with a new one playing the source.
    fn play(&mut self) -> Result<()> {
        let url = self.source.clone().ok_or(Error::NoSource)?;
        self.stop();

        let child = Command::new(&self.command)
            .args(&self.args)
            .arg(&url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => Error::PlayerNotFound {
                    command: self.command.clone(),
                },
                _ => Error::PlayerSpawn {
                    command: self.command.clone(),
                    source,
                },
            })?;

        info!(pid = child.id(), command = %self.command, url = %url, "player started");
        self.child = Some(child);
        Ok(())
    }

    fn set_quality_options(&mut self, options: Option<QualityOptions>) {
        self.quality = options;
    }

    fn quality_options(&self) -> Option<&QualityOptions> {
        self.quality.as_ref()
    }
}

impl Drop for ExternalPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}
