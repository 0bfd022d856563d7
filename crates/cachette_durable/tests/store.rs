//! Integration tests for the filesystem store.

use cachette_durable::{DurableStore, FsStore};

#[test]
fn write_read_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.write("ns/records?page=1", b"payload").unwrap();

    let bytes = store.read("ns/records?page=1").unwrap();
    assert_eq!(bytes.as_deref(), Some(b"payload".as_slice()));
}

#[test]
fn read_missing_key_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    assert!(store.read("ns/missing").unwrap().is_none());
}

#[test]
fn overwrite_replaces_value() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.write("ns/key", b"old").unwrap();
    store.write("ns/key", b"new").unwrap();

    assert_eq!(store.read("ns/key").unwrap().as_deref(), Some(b"new".as_slice()));
}

#[test]
fn remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.write("ns/key", b"payload").unwrap();
    store.remove("ns/key").unwrap();
    assert!(store.read("ns/key").unwrap().is_none());

    store.remove("ns/key").unwrap();
}

#[test]
fn keys_with_prefix_filters_by_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.write("a/1", b"x").unwrap();
    store.write("a/2", b"x").unwrap();
    store.write("b/1", b"x").unwrap();

    let mut keys = store.keys_with_prefix("a/").unwrap();
    keys.sort();
    assert_eq!(keys, ["a/1", "a/2"]);
}

#[test]
fn keys_with_prefix_on_unwritten_root_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path().join("never-created"));

    assert!(store.keys_with_prefix("ns/").unwrap().is_empty());
}

#[test]
fn foreign_files_are_ignored_during_enumeration() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.write("ns/key", b"payload").unwrap();
    std::fs::write(dir.path().join("not-a-hex-name.txt"), b"junk").unwrap();

    assert_eq!(store.keys_with_prefix("ns/").unwrap(), ["ns/key"]);
}
