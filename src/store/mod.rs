//! Food record store
//!
//! Keyed, durable storage of food records. Keys are normalized names, so
//! "apple" and "APPLE" address the same record.

mod memory;
mod sqlite;

pub use memory::MemoryFoodStore;
pub use sqlite::SqliteFoodStore;

use crate::error::StoreError;
use crate::models::FoodRecord;

pub type StoreResult<T> = Result<T, StoreError>;

/// A backend holding at most one record per normalized name.
///
/// Mutations are committed before they return.
pub trait FoodStore {
    /// Insert a new record. An existing record with the same name is kept
    /// and `StoreError::Conflict` is returned.
    fn put(&self, record: &FoodRecord) -> StoreResult<()>;

    fn get(&self, name: &str) -> StoreResult<Option<FoodRecord>>;

    /// `StoreError::NotFound` when there is nothing to delete
    fn delete(&self, name: &str) -> StoreResult<()>;

    /// Every record, ordered by name
    fn list(&self) -> StoreResult<Vec<FoodRecord>>;

    fn count(&self) -> StoreResult<i64> {
        Ok(self.list()?.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{run_migrations, Database};

    fn sqlite_store() -> SqliteFoodStore {
        let db = Database::in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        SqliteFoodStore::new(db)
    }

    fn apple() -> FoodRecord {
        FoodRecord::from_macros("apple", 0.0, 25.0, 0.0, 4.0).unwrap()
    }

    /// The laws every backend has to honor
    fn check_store_laws<S: FoodStore>(store: &S) {
        let original = apple();
        store.put(&original).unwrap();
        assert_eq!(store.get("APPLE").unwrap(), Some(original.clone()));

        let rival = FoodRecord::from_macros("Apple", 2.0, 30.0, 1.0, 0.0).unwrap();
        let err = store.put(&rival).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(err.to_string(), "Apple is already in the database, the new entry was discarded");
        assert_eq!(store.get("apple").unwrap(), Some(original));

        assert!(store.delete("kumquat").unwrap_err().is_not_found());

        let pear = FoodRecord::from_macros("pear", 0.5, 15.0, 0.1, 3.0).unwrap();
        store.put(&pear).unwrap();
        let names: Vec<String> = store.list().unwrap().iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["Apple", "Pear"]);
        assert_eq!(store.count().unwrap(), 2);

        store.delete(" apple ").unwrap();
        assert_eq!(store.get("apple").unwrap(), None);
        assert!(store.delete("apple").unwrap_err().is_not_found());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_sqlite_store_laws() {
        check_store_laws(&sqlite_store());
    }

    #[test]
    fn test_memory_store_laws() {
        check_store_laws(&MemoryFoodStore::new());
    }

    #[test]
    fn test_get_miss_is_not_an_error() {
        assert_eq!(sqlite_store().get("nothing").unwrap(), None);
        assert_eq!(MemoryFoodStore::new().get("nothing").unwrap(), None);
    }
}
