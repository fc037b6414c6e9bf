use super::*;

#[test]
fn file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("store.json")).unwrap();
    assert_eq!(store.get(PLAYLIST_KEY), None);
}

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    let mut store = FileStore::open(&path).unwrap();
    store.set(THEME_KEY, "light".to_string()).unwrap();
    store.set(PLAYLIST_KEY, "[]".to_string()).unwrap();

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("light"));
    assert_eq!(reopened.get(PLAYLIST_KEY).as_deref(), Some("[]"));
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn file_store_discards_garbage_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let mut store = FileStore::open(&path).unwrap();
    assert_eq!(store.get(THEME_KEY), None);

    // The next write replaces the garbage with a valid map.
    store.set(THEME_KEY, "dark".to_string()).unwrap();
    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("dark"));
}

#[test]
fn open_or_memory_falls_back_when_path_is_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_or_memory(dir.path());
    store.set(THEME_KEY, "light".to_string()).unwrap();
    assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
}

#[test]
fn memory_store_overwrites_values() {
    let mut store = MemoryStore::new();
    store.set("k", "1".to_string()).unwrap();
    store.set("k", "2".to_string()).unwrap();
    assert_eq!(store.get("k").as_deref(), Some("2"));
}
