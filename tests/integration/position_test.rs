//! Resume-position persistence contract.

use std::fs;

use tempfile::TempDir;
use tome::PositionStore;

#[test]
fn save_load_round_trips_various_offsets() {
    let dir = TempDir::new().unwrap();
    let store = PositionStore::new(dir.path().join("position"));

    for offset in [0.0, 0.5, 42.0, 12345.678, 86399.99] {
        store.save(offset).unwrap();
        assert_eq!(store.load(), offset);
    }
}

#[test]
fn fresh_store_loads_zero() {
    let dir = TempDir::new().unwrap();
    let store = PositionStore::new(dir.path().join("position"));
    assert_eq!(store.load(), 0.0);
}

#[test]
fn stale_temp_file_does_not_block_save() {
    let dir = TempDir::new().unwrap();
    let store = PositionStore::new(dir.path().join("position"));

    // Leftover from a crashed write
    fs::write(dir.path().join("position.tmp"), "99.9").unwrap();

    store.save(7.0).unwrap();
    assert_eq!(store.load(), 7.0);
}

#[test]
fn interrupted_write_leaves_prior_value_loadable() {
    let dir = TempDir::new().unwrap();
    let store = PositionStore::new(dir.path().join("position"));
    store.save(30.0).unwrap();

    // A crash after writing the temp file but before the rename leaves
    // the temp sibling behind; the real file still holds the old value.
    fs::write(dir.path().join("position.tmp"), "garb").unwrap();
    assert_eq!(store.load(), 30.0);
}

#[test]
fn failed_save_keeps_previous_state_readable() {
    let dir = TempDir::new().unwrap();
    let store = PositionStore::new(dir.path().join("position"));
    store.save(12.0).unwrap();

    let doomed = PositionStore::new(dir.path().join("nope").join("position"));
    assert!(doomed.save(50.0).is_err());

    assert_eq!(store.load(), 12.0);
}
