//! SQLite-backed food store

use super::{FoodStore, StoreResult};
use crate::db::Database;
use crate::error::StoreError;
use crate::models::{normalize_name, FoodRecord};

/// Food store over the `foods` relation.
///
/// Each mutation is a single autocommitted statement, so a call either
/// lands completely or not at all.
#[derive(Clone)]
pub struct SqliteFoodStore {
    database: Database,
}

impl SqliteFoodStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

impl FoodStore for SqliteFoodStore {
    fn put(&self, record: &FoodRecord) -> StoreResult<()> {
        let inserted = self.database.with_conn(|conn| FoodRecord::insert(conn, record))?;
        if !inserted {
            tracing::warn!(food = record.name(), "Insert conflict, keeping stored record");
            return Err(StoreError::Conflict(record.name().to_string()));
        }

        tracing::info!(food = record.name(), calories = record.nutrition().calories, "Saved food");
        Ok(())
    }

    fn get(&self, name: &str) -> StoreResult<Option<FoodRecord>> {
        Ok(self.database.with_conn(|conn| FoodRecord::get_by_name(conn, name))?)
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        let deleted = self.database.with_conn(|conn| FoodRecord::delete_by_name(conn, name))?;
        if !deleted {
            return Err(StoreError::NotFound(normalize_name(name)));
        }

        tracing::info!(food = %normalize_name(name), "Deleted food");
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<FoodRecord>> {
        Ok(self.database.with_conn(FoodRecord::list)?)
    }

    fn count(&self) -> StoreResult<i64> {
        Ok(self.database.with_conn(FoodRecord::count)?)
    }
}
