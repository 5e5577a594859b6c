// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_filled_state;
use crate::{FileSnapshotStore, InMemorySnapshotStore, SnapshotStore, WizardSession, WizardState};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

fn unique_dir() -> PathBuf {
    let id: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "hpc_config_snapshots_{}_{id}",
        std::process::id()
    ))
}

#[test]
fn test_in_memory_store_replaces_value() {
    let mut store: InMemorySnapshotStore = InMemorySnapshotStore::new();

    store.set("a", String::from("1")).unwrap();
    store.set("a", String::from("2")).unwrap();

    assert_eq!(store.get("a").as_deref(), Some("2"));
    assert!(store.get("b").is_none());
}

#[test]
fn test_file_store_round_trip() {
    let dir: PathBuf = unique_dir();
    let mut store: FileSnapshotStore = FileSnapshotStore::open(&dir).unwrap();
    let state: WizardState = create_filled_state(8);

    store.set("wizard", state.to_snapshot().unwrap()).unwrap();

    let reopened: FileSnapshotStore = FileSnapshotStore::open(&dir).unwrap();
    let snapshot: String = reopened.get("wizard").unwrap();
    assert_eq!(WizardState::from_snapshot(&snapshot).unwrap(), state);
    assert!(dir.join("wizard.json").exists());
    assert!(!dir.join("wizard.json.tmp").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_file_store_escapes_keys() {
    let dir: PathBuf = unique_dir();
    let mut store: FileSnapshotStore = FileSnapshotStore::open(&dir).unwrap();

    store.set("../escape/me", String::from("{}")).unwrap();

    assert!(dir.join("_2e_2e_2fescape_2fme.json").exists());
    assert_eq!(store.get("../escape/me").as_deref(), Some("{}"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_file_store_keeps_similar_keys_apart() {
    let dir: PathBuf = unique_dir();
    let mut store: FileSnapshotStore = FileSnapshotStore::open(&dir).unwrap();

    store.set("user.a", String::from("A")).unwrap();
    store.set("user/a", String::from("B")).unwrap();
    store.set("user_a", String::from("C")).unwrap();
    store.set("user_2ea", String::from("D")).unwrap();

    assert_eq!(store.get("user.a").as_deref(), Some("A"));
    assert_eq!(store.get("user/a").as_deref(), Some("B"));
    assert_eq!(store.get("user_a").as_deref(), Some("C"));
    assert_eq!(store.get("user_2ea").as_deref(), Some("D"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_file_store_missing_key() {
    let dir: PathBuf = unique_dir();
    let store: FileSnapshotStore = FileSnapshotStore::open(&dir).unwrap();

    assert!(store.get("absent").is_none());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_session_restores_from_file_store() {
    let dir: PathBuf = unique_dir();
    let mut session: WizardSession<FileSnapshotStore> =
        WizardSession::new(FileSnapshotStore::open(&dir).unwrap(), "wizard");
    session
        .update_step(crate::StepData::System(
            crate::tests::helpers::create_test_system(8),
        ))
        .unwrap();
    let expected: WizardState = session.state().clone();
    drop(session);

    let restored: WizardSession<FileSnapshotStore> =
        WizardSession::restore(FileSnapshotStore::open(&dir).unwrap(), "wizard");

    assert_eq!(restored.state(), &expected);

    std::fs::remove_dir_all(&dir).unwrap();
}
