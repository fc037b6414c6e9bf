//! Recording collaborators for coordinator and session tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{AdaptiveEngine, AdaptiveEvent, Level, MediaPlayer, QualityOptions};
use crate::error::{Error, Result};

#[derive(Default)]
pub struct PlayerLog {
    pub sources: Vec<String>,
    /// URL `play` would start right now.
    pub current: Option<String>,
    pub plays: usize,
    /// URLs actually started, one per successful `play`.
    pub started: Vec<String>,
    pub quality_sets: usize,
}

pub struct RecordingPlayer {
    log: Rc<RefCell<PlayerLog>>,
    quality: Option<QualityOptions>,
}

impl RecordingPlayer {
    pub fn new(log: &Rc<RefCell<PlayerLog>>) -> Self {
        Self {
            log: Rc::clone(log),
            quality: None,
        }
    }
}

impl MediaPlayer for RecordingPlayer {
    fn set_source(&mut self, url: &str) {
        let mut log = self.log.borrow_mut();
        log.sources.push(url.to_string());
        log.current = Some(url.to_string());
    }

    fn clear_source(&mut self) {
        self.log.borrow_mut().current = None;
    }

    fn play(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.plays += 1;
        match log.current.clone() {
            Some(url) => {
                log.started.push(url);
                Ok(())
            }
            None => Err(Error::NoSource),
        }
    }

    fn set_quality_options(&mut self, options: Option<QualityOptions>) {
        self.log.borrow_mut().quality_sets += 1;
        self.quality = options;
    }

    fn quality_options(&self) -> Option<&QualityOptions> {
        self.quality.as_ref()
    }
}

#[derive(Default)]
pub struct EngineLog {
    pub loaded: Vec<String>,
    pub attached: usize,
    pub pending: VecDeque<AdaptiveEvent>,
}

pub struct StubEngine {
    supported: bool,
    log: Rc<RefCell<EngineLog>>,
    source: Option<String>,
    levels: Vec<Level>,
    current: Option<usize>,
}

impl StubEngine {
    pub fn new(supported: bool, log: &Rc<RefCell<EngineLog>>) -> Self {
        Self {
            supported,
            log: Rc::clone(log),
            source: None,
            levels: Vec::new(),
            current: None,
        }
    }
}

/// Attaching with a pinned level points the player at `level-<n>`.
impl AdaptiveEngine for StubEngine {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn load_source(&mut self, url: &str) {
        self.log.borrow_mut().loaded.push(url.to_string());
        self.source = Some(url.to_string());
        self.levels.clear();
        self.current = None;
    }

    fn attach_media(&mut self, player: &mut dyn MediaPlayer) {
        self.log.borrow_mut().attached += 1;
        let url = match self.current {
            Some(i) => format!("level-{i}"),
            None => self.source.clone().unwrap_or_default(),
        };
        player.set_source(&url);
    }

    fn levels(&self) -> &[Level] {
        &self.levels
    }

    fn set_current_level(&mut self, level: Option<usize>) {
        self.current = level;
    }

    fn current_level(&self) -> Option<usize> {
        self.current
    }

    fn poll_event(&mut self) -> Option<AdaptiveEvent> {
        let event = self.log.borrow_mut().pending.pop_front();
        if let Some(AdaptiveEvent::ManifestParsed { levels }) = &event {
            self.levels = levels.clone();
        }
        event
    }
}
