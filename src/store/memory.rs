//! In-memory food store, for tests and throwaway sessions

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{FoodStore, StoreResult};
use crate::error::StoreError;
use crate::models::{normalize_name, FoodRecord};

#[derive(Default)]
pub struct MemoryFoodStore {
    foods: Mutex<BTreeMap<String, FoodRecord>>,
}

impl MemoryFoodStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poisoning can't leave the map half-written, so recover the guard
    fn foods(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, FoodRecord>> {
        self.foods.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FoodStore for MemoryFoodStore {
    fn put(&self, record: &FoodRecord) -> StoreResult<()> {
        let mut foods = self.foods();
        if foods.contains_key(record.name()) {
            return Err(StoreError::Conflict(record.name().to_string()));
        }
        foods.insert(record.name().to_string(), record.clone());
        Ok(())
    }

    fn get(&self, name: &str) -> StoreResult<Option<FoodRecord>> {
        Ok(self.foods().get(&normalize_name(name)).cloned())
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        let key = normalize_name(name);
        match self.foods().remove(&key) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(key)),
        }
    }

    fn list(&self) -> StoreResult<Vec<FoodRecord>> {
        Ok(self.foods().values().cloned().collect())
    }
}
