//! Ledger file survives a close and reopen

use pnl::db::{run_migrations, Database};
use pnl::models::FoodRecord;
use pnl::store::{FoodStore, SqliteFoodStore};
use tempfile::TempDir;

fn open(dir: &TempDir) -> SqliteFoodStore {
    let database = Database::new(dir.path().join("pnl.db")).unwrap();
    database.with_conn(run_migrations).unwrap();
    SqliteFoodStore::new(database)
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let banana = FoodRecord::from_macros("banana", 1.0, 27.0, 0.0, 3.0).unwrap();

    {
        let store = open(&dir);
        store.put(&banana).unwrap();
    }

    let store = open(&dir);
    assert_eq!(store.get("BANANA").unwrap(), Some(banana.clone()));
    assert_eq!(store.count().unwrap(), 1);

    let err = store.put(&banana).unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn test_delete_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let apple = FoodRecord::from_macros("apple", 0.0, 25.0, 0.0, 4.0).unwrap();

    {
        let store = open(&dir);
        store.put(&apple).unwrap();
        store.delete("apple").unwrap();
    }

    let store = open(&dir);
    assert_eq!(store.get("apple").unwrap(), None);
    assert!(store.delete("apple").unwrap_err().is_not_found());
}
