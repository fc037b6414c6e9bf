use std::cell::RefCell;
use std::rc::Rc;

use super::testing::{EngineLog, PlayerLog, RecordingPlayer, StubEngine};
use super::*;
use crate::playlist::{PlaylistStore, Track};
use crate::render::{self, Mounts, TITLE_MOUNT};
use crate::storage::MemoryStore;

struct Harness {
    coordinator: Coordinator,
    player: Rc<RefCell<PlayerLog>>,
    engine: Rc<RefCell<EngineLog>>,
    store: PlaylistStore,
    mounts: Mounts,
}

fn harness(with_engine: bool, supported: bool) -> Harness {
    let player_log = Rc::new(RefCell::new(PlayerLog::default()));
    let engine_log = Rc::new(RefCell::new(EngineLog::default()));

    let player = Box::new(RecordingPlayer::new(&player_log));
    let engine: Option<Box<dyn AdaptiveEngine>> = if with_engine {
        Some(Box::new(StubEngine::new(supported, &engine_log)))
    } else {
        None
    };

    let mut kv = MemoryStore::new();
    let mut store = PlaylistStore::new();
    store.add(Track::new("Alpha", "a.mp4"), &mut kv).unwrap();
    store.add(Track::new("Beta Show", "b.m3u8"), &mut kv).unwrap();
    store
        .add(
            Track {
                title: Some("Silent".into()),
                ..Track::default()
            },
            &mut kv,
        )
        .unwrap();

    let mut mounts = Mounts::from_ids(&["title", "playlist"]);
    render::render_full(&mut mounts, &store, None);

    Harness {
        coordinator: Coordinator::new(player, engine, vec!["m3u8".to_string()]),
        player: player_log,
        engine: engine_log,
        store,
        mounts,
    }
}

impl Harness {
    fn play_at(&mut self, index: usize) {
        self.coordinator.play_at(index, &self.store, &mut self.mounts);
    }
}

#[test]
fn play_at_out_of_range_is_a_noop() {
    let mut h = harness(true, true);

    h.play_at(3);
    h.play_at(usize::MAX);

    assert_eq!(h.coordinator.selection(), None);
    assert!(!h.coordinator.is_playing());
    assert_eq!(h.player.borrow().plays, 0);
    assert!(h.player.borrow().sources.is_empty());
    assert!(h.engine.borrow().loaded.is_empty());
    assert_eq!(h.mounts.list().unwrap().active_index(), None);
    assert_eq!(h.mounts.label(TITLE_MOUNT), None);
}

#[test]
fn direct_url_is_assigned_to_player() {
    let mut h = harness(true, true);

    h.play_at(0);

    assert_eq!(h.player.borrow().sources, vec!["a.mp4"]);
    assert_eq!(h.player.borrow().quality_sets, 1);
    assert!(h.engine.borrow().loaded.is_empty());
    assert_eq!(h.player.borrow().plays, 1);
    assert!(h.coordinator.is_playing());
    assert_eq!(h.coordinator.selection(), Some(0));
    assert_eq!(h.mounts.label(TITLE_MOUNT), Some("Alpha"));
    assert_eq!(h.mounts.list().unwrap().active_index(), Some(0));
}

#[test]
fn manifest_url_is_delegated_to_supported_engine() {
    let mut h = harness(true, true);

    h.play_at(1);

    assert_eq!(h.engine.borrow().loaded, vec!["b.m3u8"]);
    assert_eq!(h.engine.borrow().attached, 1);
    assert_eq!(h.player.borrow().plays, 1);
    assert_eq!(h.mounts.label(TITLE_MOUNT), Some("Beta Show"));
}

#[test]
fn manifest_url_without_engine_support_goes_direct() {
    for (with_engine, supported) in [(false, false), (true, false)] {
        let mut h = harness(with_engine, supported);

        h.play_at(1);

        assert!(h.engine.borrow().loaded.is_empty());
        assert_eq!(h.player.borrow().sources, vec!["b.m3u8"]);
        assert_eq!(h.player.borrow().plays, 1);
    }
}

#[test]
fn track_without_url_still_selects_and_plays() {
    let mut h = harness(true, true);

    h.play_at(2);

    assert!(h.player.borrow().sources.is_empty());
    assert_eq!(h.player.borrow().plays, 1);
    assert!(h.coordinator.is_playing());
    assert_eq!(h.mounts.list().unwrap().active_index(), Some(2));
}

#[test]
fn track_without_url_does_not_replay_previous_stream() {
    let mut h = harness(true, true);

    h.play_at(0);
    h.play_at(2);

    let log = h.player.borrow();
    assert_eq!(log.plays, 2);
    assert_eq!(log.started, vec!["a.mp4"]);
    assert_eq!(log.current, None);
    drop(log);
    assert_eq!(h.mounts.label(TITLE_MOUNT), Some("Silent"));
    assert_eq!(h.coordinator.selection(), Some(2));
}

#[test]
fn later_selection_moves_active_mark() {
    let mut h = harness(true, true);

    h.play_at(0);
    h.play_at(1);

    let active: Vec<bool> = h.mounts.list().unwrap().items().iter().map(|it| it.active).collect();
    assert_eq!(active, vec![false, true, false]);
    assert_eq!(h.coordinator.selection(), Some(1));
}

#[test]
fn is_playing_is_never_reset() {
    let mut h = harness(true, true);

    h.play_at(0);
    h.play_at(99);
    assert!(h.coordinator.is_playing());
}

#[test]
fn play_without_mounted_panes_still_plays() {
    let mut h = harness(true, true);
    h.mounts = Mounts::from_ids::<&str>(&[]);

    h.play_at(0);

    assert_eq!(h.player.borrow().plays, 1);
    assert_eq!(h.coordinator.selection(), Some(0));
}

#[test]
fn manifest_parsed_populates_quality_menu() {
    let mut h = harness(true, true);
    h.play_at(1);
    assert!(h.coordinator.quality_options().is_none());

    h.engine
        .borrow_mut()
        .pending
        .push_back(AdaptiveEvent::ManifestParsed {
            levels: vec![
                Level { height: 360, bitrate: 800_000 },
                Level { height: 1080, bitrate: 5_000_000 },
                Level { height: 720, bitrate: 2_500_000 },
                Level { height: 720, bitrate: 2_000_000 },
            ],
        });

    assert!(h.coordinator.pump_events());
    let options = h.coordinator.quality_options().unwrap();
    assert_eq!(options.options, vec![1080, 720, 360]);
    assert_eq!(options.default, 1080);
    assert_eq!(h.coordinator.selected_quality(), Some(1080));

    assert!(!h.coordinator.pump_events());
}

#[test]
fn quality_change_sets_engine_level_and_restarts() {
    let mut h = harness(true, true);
    h.play_at(1);
    h.engine
        .borrow_mut()
        .pending
        .push_back(AdaptiveEvent::ManifestParsed {
            levels: vec![
                Level { height: 1080, bitrate: 5_000_000 },
                Level { height: 720, bitrate: 2_500_000 },
            ],
        });
    h.coordinator.pump_events();

    assert!(h.coordinator.change_quality(720));

    assert_eq!(h.player.borrow().sources.last().map(String::as_str), Some("level-1"));
    assert_eq!(h.player.borrow().plays, 2);
    assert_eq!(h.coordinator.selected_quality(), Some(720));

    assert!(!h.coordinator.change_quality(144));
}

#[test]
fn quality_change_ignored_for_direct_sources() {
    let mut h = harness(true, true);
    h.play_at(0);

    assert!(!h.coordinator.change_quality(720));
    assert_eq!(h.player.borrow().plays, 1);
}

#[test]
fn new_selection_clears_quality_menu() {
    let mut h = harness(true, true);
    h.play_at(1);
    h.engine
        .borrow_mut()
        .pending
        .push_back(AdaptiveEvent::ManifestParsed {
            levels: vec![Level { height: 480, bitrate: 1_000_000 }],
        });
    h.coordinator.pump_events();
    assert!(h.coordinator.quality_options().is_some());

    h.play_at(0);
    assert!(h.coordinator.quality_options().is_none());
}

#[test]
fn engine_errors_are_drained_quietly() {
    let mut h = harness(true, true);
    h.play_at(1);
    h.engine.borrow_mut().pending.push_back(AdaptiveEvent::Error {
        url: "b.m3u8".into(),
        reason: "404".into(),
    });

    assert!(!h.coordinator.pump_events());
    assert!(h.coordinator.quality_options().is_none());
    assert!(h.coordinator.is_playing());
}

#[test]
fn manifest_arriving_after_switch_to_direct_is_ignored() {
    let mut h = harness(true, true);
    h.play_at(1);
    h.play_at(0);

    h.engine
        .borrow_mut()
        .pending
        .push_back(AdaptiveEvent::ManifestParsed {
            levels: vec![Level { height: 360, bitrate: 800_000 }],
        });

    assert!(!h.coordinator.pump_events());
    assert!(h.coordinator.quality_options().is_none());
    assert_eq!(h.coordinator.selected_quality(), None);
    assert!(!h.coordinator.change_quality(360));
}

#[test]
fn selected_quality_follows_engine_level() {
    let mut h = harness(true, true);
    h.play_at(1);
    h.engine
        .borrow_mut()
        .pending
        .push_back(AdaptiveEvent::ManifestParsed {
            levels: vec![
                Level { height: 1080, bitrate: 5_000_000 },
                Level { height: 480, bitrate: 1_000_000 },
            ],
        });
    h.coordinator.pump_events();
    h.coordinator.change_quality(480);
    assert_eq!(h.coordinator.selected_quality(), Some(480));

    // Reloading the manifest goes back to automatic level selection.
    h.play_at(1);
    h.engine
        .borrow_mut()
        .pending
        .push_back(AdaptiveEvent::ManifestParsed {
            levels: vec![
                Level { height: 1080, bitrate: 5_000_000 },
                Level { height: 480, bitrate: 1_000_000 },
            ],
        });
    h.coordinator.pump_events();
    assert_eq!(h.coordinator.selected_quality(), Some(1080));
}
