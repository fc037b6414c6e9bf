use super::store::parse_persisted;
use super::track::{UNKNOWN_LANGUAGE, UNTITLED};
use super::*;
use crate::storage::{KeyValueStore, MemoryStore, PLAYLIST_KEY};

fn kv_with(raw: &str) -> MemoryStore {
    let mut kv = MemoryStore::new();
    kv.set(PLAYLIST_KEY, raw.to_string()).unwrap();
    kv
}

#[test]
fn load_without_saved_state_uses_demo_tracks() {
    let kv = MemoryStore::new();
    let mut store = PlaylistStore::new();
    store.load(&kv);
    assert_eq!(store.all(), demo_tracks().as_slice());
}

#[test]
fn load_malformed_state_falls_back_to_demo_tracks() {
    let malformed = [
        "",
        "{",
        "null",
        "42",
        "\"text\"",
        "{\"title\":\"not an array\"}",
        "[{\"title\": 5}]",
        "[1, 2, 3]",
        "[]",
    ];

    for raw in malformed {
        let kv = kv_with(raw);
        let mut store = PlaylistStore::new();
        store.load(&kv);
        assert_eq!(store.all(), demo_tracks().as_slice(), "input: {raw:?}");
    }
}

#[test]
fn parse_persisted_degrades_to_empty() {
    assert!(parse_persisted(None).is_empty());
    assert!(parse_persisted(Some("not json")).is_empty());
}

#[test]
fn load_reads_both_legacy_url_fields() {
    let kv = kv_with(
        r#"[
            {"title": "New", "stream_url": "https://a/new.m3u8", "logo": "https://a/logo.png", "lang": "de"},
            {"title": "Old", "stream": "https://a/old.mp4"},
            {"stream_url": "", "stream": "https://a/fallback.ts"},
            {"title": "Nothing"}
        ]"#,
    );

    let mut store = PlaylistStore::new();
    store.load(&kv);

    let tracks = store.all();
    assert_eq!(tracks.len(), 4);

    assert_eq!(tracks[0].source_url(), Some("https://a/new.m3u8"));
    assert_eq!(tracks[0].logo_url(), "https://a/logo.png");
    assert_eq!(tracks[0].language(), "de");

    assert_eq!(tracks[1].source_url(), Some("https://a/old.mp4"));
    assert_eq!(tracks[1].logo_url(), "");
    assert_eq!(tracks[1].language(), UNKNOWN_LANGUAGE);

    assert_eq!(tracks[2].title(), UNTITLED);
    assert_eq!(tracks[2].raw_title(), None);
    assert_eq!(tracks[2].source_url(), Some("https://a/fallback.ts"));

    // Unplayable but still part of the playlist.
    assert!(!tracks[3].is_playable());
    assert_eq!(tracks[3].title(), "Nothing");
}

#[test]
fn stream_url_wins_over_stream() {
    let track = Track {
        stream_url: Some("https://a/primary".into()),
        stream: Some("https://a/legacy".into()),
        ..Track::default()
    };
    assert_eq!(track.source_url(), Some("https://a/primary"));
}

#[test]
fn add_is_append_only_and_persists() {
    let mut kv = MemoryStore::new();
    let mut store = PlaylistStore::new();
    store.load(&kv);
    let initial = store.len();

    store.add(Track::new("One", "https://x/1.mp4"), &mut kv).unwrap();
    store.add(Track::new("Two", "https://x/2.m3u8"), &mut kv).unwrap();
    store.add(Track::new("Three", "https://x/3.ts"), &mut kv).unwrap();

    assert_eq!(store.len(), initial + 3);
    let titles: Vec<&str> = store.all()[initial..].iter().map(Track::title).collect();
    assert_eq!(titles, vec!["One", "Two", "Three"]);

    // A fresh store sees everything, demo tracks included.
    let mut reloaded = PlaylistStore::new();
    reloaded.load(&kv);
    assert_eq!(reloaded.all(), store.all());
}

#[test]
fn persisted_json_uses_wire_keys() {
    let mut kv = MemoryStore::new();
    let mut store = PlaylistStore::new();
    store
        .add(
            Track::new("Chan", "https://x/c.m3u8")
                .with_logo("https://x/c.png")
                .with_language("fr"),
            &mut kv,
        )
        .unwrap();

    let raw = kv.get(PLAYLIST_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "title": "Chan",
            "stream_url": "https://x/c.m3u8",
            "logo": "https://x/c.png",
            "lang": "fr"
        }])
    );
}

#[test]
fn get_out_of_range_is_none() {
    let store = PlaylistStore::new();
    assert!(store.is_empty());
    assert!(store.get(0).is_none());
}
