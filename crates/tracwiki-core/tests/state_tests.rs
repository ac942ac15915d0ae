//! Tests for the state file layout and persistence

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use tempfile::TempDir;
use tracwiki_core::{Error, MetadataStore, PageRecord, RemoteConfig, StateFile};
use tracwiki_fs::{ContentHash, NormalizedPath};

fn state_path(dir: &TempDir) -> NormalizedPath {
    StateFile::path_in(&NormalizedPath::new(dir.path()))
}

fn sample_state() -> StateFile {
    let mut state = StateFile::default();
    state.configure(
        RemoteConfig::parse("https://trac.example.org/project", "alice", "secret").unwrap(),
    );
    state
        .store
        .put("WikiStart", PageRecord::new(3, ContentHash::of_text("hello world")));
    state
        .store
        .put("Guide/Install", PageRecord::new(1, ContentHash::of(b"")));
    state
}

#[test]
fn document_layout() {
    let json = sample_state().to_json().unwrap();
    insta::assert_snapshot!(json.trim_end(), @r#"
    {
      "protocol": "https",
      "location": "trac.example.org/project",
      "username": "alice",
      "password": "secret",
      "info": {
        "WikiStart": [
          3,
          "5eb63bbbe01eeed093cb22bb8f5acdc3"
        ],
        "Guide/Install": [
          1,
          "d41d8cd98f00b204e9800998ecf8427e"
        ]
      }
    }
    "#);
}

#[test]
fn reads_compact_legacy_document() {
    let dir = TempDir::new().unwrap();
    let path = state_path(&dir);
    std::fs::write(
        path.to_native(),
        r#"{"username": "", "info": {"WikiStart": [7, "5eb63bbbe01eeed093cb22bb8f5acdc3"], "Notes": [2, "d41d8cd98f00b204e9800998ecf8427e"]}, "protocol": "http", "location": "wiki.local/trac", "password": ""}"#,
    )
    .unwrap();

    let state = StateFile::load(&path).unwrap();

    let remote = state.remote().unwrap();
    assert_eq!(remote.base_url(), "http://wiki.local/trac");
    assert!(remote.credentials().is_none());
    assert_eq!(state.store.names().collect::<Vec<_>>(), vec!["WikiStart", "Notes"]);
    assert_eq!(
        state.store.get("WikiStart"),
        Some(&PageRecord::new(7, ContentHash::of_text("hello world")))
    );
}

#[test]
fn save_is_atomic_and_reloadable() {
    let dir = TempDir::new().unwrap();
    let path = state_path(&dir);

    sample_state().save(&path).unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temporary files left: {leftovers:?}");
    assert_eq!(StateFile::load(&path).unwrap(), sample_state());
}

#[test]
fn configure_keeps_records() {
    let dir = TempDir::new().unwrap();
    let path = state_path(&dir);
    sample_state().save(&path).unwrap();

    let mut state = StateFile::load(&path).unwrap();
    state.configure(RemoteConfig::parse("http://other.host", "", "").unwrap());
    state.save(&path).unwrap();

    let reloaded = StateFile::load(&path).unwrap();
    assert_eq!(reloaded.remote().unwrap().base_url(), "http://other.host");
    assert_eq!(reloaded.store.len(), 2);
}

#[test]
fn records_without_remote_are_not_configured() {
    let dir = TempDir::new().unwrap();
    let path = state_path(&dir);
    std::fs::write(path.to_native(), r#"{"info": {}}"#).unwrap();

    let state = StateFile::load(&path).unwrap();
    assert!(matches!(state.remote(), Err(Error::NotConfigured)));
}

#[rstest]
#[case::truncated(r#"{"protocol": "http", "info": {"#)]
#[case::wrong_record_shape(r#"{"info": {"Home": {"version": 1}}}"#)]
#[case::bad_hash(r#"{"info": {"Home": [1, "xyz"]}}"#)]
#[case::negative_version(r#"{"info": {"Home": [-1, "d41d8cd98f00b204e9800998ecf8427e"]}}"#)]
#[case::not_an_object("[1, 2, 3]")]
fn corrupt_documents_are_rejected(#[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let path = state_path(&dir);
    std::fs::write(path.to_native(), content).unwrap();

    let err = StateFile::load(&path).unwrap_err();
    assert!(
        matches!(err, Error::CorruptConfig { .. }),
        "expected CorruptConfig, got {err:?}"
    );
}

#[test]
fn non_utf8_document_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = state_path(&dir);
    std::fs::write(path.to_native(), [0x7b, 0xff, 0x7d]).unwrap();

    assert!(matches!(
        StateFile::load(&path),
        Err(Error::CorruptConfig { .. })
    ));
}

#[test]
fn save_into_missing_directory_fails_distinctly() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "a file, not a directory").unwrap();
    let path = NormalizedPath::new(blocker.join(".trac_config"));

    let err = sample_state().save(&path).unwrap_err();
    assert!(matches!(err, Error::MetadataSave { .. }));
}

fn arb_store() -> impl Strategy<Value = MetadataStore> {
    prop::collection::vec(
        (
            "[A-Za-z][A-Za-z0-9_/]{0,15}",
            0u64..1_000_000,
            prop::collection::vec(any::<u8>(), 0..64),
        ),
        0..12,
    )
    .prop_map(|entries| {
        let mut store = MetadataStore::new();
        for (name, version, bytes) in entries {
            store.put(name, PageRecord::new(version, ContentHash::of(&bytes)));
        }
        store
    })
}

proptest! {
    #[test]
    fn store_round_trips(store in arb_store()) {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        let state = StateFile { remote: None, store };

        state.save(&path).unwrap();
        let first = std::fs::read(path.to_native()).unwrap();
        let loaded = StateFile::load(&path).unwrap();
        prop_assert_eq!(&loaded, &state);

        loaded.save(&path).unwrap();
        let second = std::fs::read(path.to_native()).unwrap();
        prop_assert_eq!(first, second);
    }
}
