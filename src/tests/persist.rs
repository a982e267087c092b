use super::{FileStore, MemoryStore, StateStore, StoreKey};

#[test]
fn test_file_store_missing_key_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    assert_eq!(store.load(StoreKey::Sections).unwrap(), None);
}

#[test]
fn test_file_store_creates_directory_and_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("nested").join("state"));

    store.save(StoreKey::RawInput, "# Role\nYou are an assistant.").unwrap();
    store.save(StoreKey::Profile, "gpt-4").unwrap();

    assert_eq!(
        store.load(StoreKey::RawInput).unwrap().as_deref(),
        Some("# Role\nYou are an assistant.")
    );
    assert_eq!(store.load(StoreKey::Profile).unwrap().as_deref(), Some("gpt-4"));
    assert!(store.dir().join("raw_input.md").exists());
    assert!(store.dir().join("profile.txt").exists());
}

#[test]
fn test_file_store_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());

    store.save(StoreKey::History, "[1]").unwrap();
    store.save(StoreKey::History, "[2]").unwrap();

    assert_eq!(store.load(StoreKey::History).unwrap().as_deref(), Some("[2]"));
}

#[test]
fn test_file_store_read_failure_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the sections file should be cannot be read as text.
    std::fs::create_dir(dir.path().join("sections.json")).unwrap();
    let store = FileStore::new(dir.path());

    assert!(store.load(StoreKey::Sections).is_err());
}

#[test]
fn test_memory_store_seeded_values() {
    let mut store = MemoryStore::seeded([(StoreKey::Profile, "llama-2-7b".to_string())]);

    assert_eq!(store.get(StoreKey::Profile), Some("llama-2-7b"));
    assert_eq!(store.load(StoreKey::RawInput).unwrap(), None);

    store.save(StoreKey::RawInput, "text").unwrap();
    assert_eq!(store.get(StoreKey::RawInput), Some("text"));
}
