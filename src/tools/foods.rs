//! Food MCP Tools
//!
//! Tools for managing food records in the ledger.

use serde::Serialize;

use crate::error::StoreError;
use crate::models::{normalize_name, FoodDraft, FoodRecord, Nutrition};
use crate::report::saved_notice;
use crate::store::FoodStore;

/// Response for a saved food
#[derive(Debug, Serialize)]
pub struct AddFoodResponse {
    pub success: bool,
    pub name: String,
    pub nutrition: Nutrition,
    pub message: String,
}

/// Response for add_food when the name is already taken
#[derive(Debug, Serialize)]
pub struct FoodConflictResponse {
    pub error: String,
    pub name: String,
    /// The record that was kept
    pub existing: Option<FoodDetail>,
}

#[derive(Debug, Serialize)]
pub struct FoodDetail {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbohydrate: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl From<&FoodRecord> for FoodDetail {
    fn from(record: &FoodRecord) -> Self {
        let n = record.nutrition();
        Self {
            name: record.name().to_string(),
            calories: n.calories,
            protein: n.protein,
            carbohydrate: n.carbohydrate,
            fat: n.fat,
            fiber: n.fiber,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListFoodsResponse {
    pub foods: Vec<FoodDetail>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteFoodResponse {
    pub success: bool,
    pub deleted: String,
}

#[derive(Debug, Serialize)]
pub struct FoodNotFoundResponse {
    pub error: String,
    pub name: String,
}

/// Validate and save a new food
pub fn add_food<S: FoodStore>(
    store: &S,
    draft: FoodDraft,
    tolerance: f64,
) -> Result<Result<AddFoodResponse, FoodConflictResponse>, String> {
    let record = FoodRecord::from_draft(&draft, tolerance).map_err(|e| e.to_string())?;

    match store.put(&record) {
        Ok(()) => Ok(Ok(AddFoodResponse {
            success: true,
            name: record.name().to_string(),
            nutrition: *record.nutrition(),
            message: saved_notice(record.name()),
        })),
        Err(e @ StoreError::Conflict(_)) => {
            let existing = store
                .get(record.name())
                .map_err(|e| format!("Database error: {}", e))?;
            Ok(Err(FoodConflictResponse {
                error: e.to_string(),
                name: record.name().to_string(),
                existing: existing.as_ref().map(FoodDetail::from),
            }))
        }
        Err(e) => Err(format!("Failed to save food: {}", e)),
    }
}

/// Look a food up by name
pub fn get_food<S: FoodStore>(store: &S, name: &str) -> Result<Option<FoodDetail>, String> {
    let record = store
        .get(name)
        .map_err(|e| format!("Failed to get food: {}", e))?;
    Ok(record.as_ref().map(FoodDetail::from))
}

pub fn list_foods<S: FoodStore>(store: &S) -> Result<ListFoodsResponse, String> {
    let foods: Vec<FoodDetail> = store
        .list()
        .map_err(|e| format!("Failed to list foods: {}", e))?
        .iter()
        .map(FoodDetail::from)
        .collect();
    let total = foods.len();

    Ok(ListFoodsResponse { foods, total })
}

/// Delete a food; a missing name is reported, not failed
pub fn delete_food<S: FoodStore>(
    store: &S,
    name: &str,
) -> Result<Result<DeleteFoodResponse, FoodNotFoundResponse>, String> {
    match store.delete(name) {
        Ok(()) => Ok(Ok(DeleteFoodResponse {
            success: true,
            deleted: normalize_name(name),
        })),
        Err(e @ StoreError::NotFound(_)) => Ok(Err(FoodNotFoundResponse {
            error: e.to_string(),
            name: normalize_name(name),
        })),
        Err(e) => Err(format!("Failed to delete food: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryFoodStore;

    fn apple_draft() -> FoodDraft {
        FoodDraft {
            name: "apple".to_string(),
            calories: None,
            protein: 0.0,
            carbohydrate: 25.0,
            fat: 0.0,
            fiber: 4.0,
        }
    }

    #[test]
    fn test_add_food_confirms_save() {
        let store = MemoryFoodStore::new();
        let saved = add_food(&store, apple_draft(), 0.5).unwrap().unwrap();

        assert_eq!(saved.name, "Apple");
        assert_eq!(saved.nutrition.calories, 84.0);
        assert_eq!(saved.message, "Successfully saved Apple to the database.");
    }

    #[test]
    fn test_add_food_conflict_names_the_duplicate() {
        let store = MemoryFoodStore::new();
        add_food(&store, apple_draft(), 0.5).unwrap().unwrap();

        let mut again = apple_draft();
        again.protein = 1.0;
        let conflict = add_food(&store, again, 0.5).unwrap().unwrap_err();

        assert_eq!(conflict.name, "Apple");
        assert!(conflict.error.contains("Apple is already in the database"));
        assert_eq!(conflict.existing.unwrap().protein, 0.0);
    }

    #[test]
    fn test_add_food_validation_error() {
        let store = MemoryFoodStore::new();
        let mut draft = apple_draft();
        draft.calories = Some(200.0);

        let err = add_food(&store, draft, 0.5).unwrap_err();
        assert!(err.starts_with("The calories don't seem right"));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_food_not_found_is_reported() {
        let store = MemoryFoodStore::new();
        let missing = delete_food(&store, "ghost pepper").unwrap().unwrap_err();

        assert_eq!(missing.name, "Ghost pepper");
        assert_eq!(missing.error, "Ghost pepper was not found in the database");
    }

    #[test]
    fn test_get_list_delete() {
        let store = MemoryFoodStore::new();
        add_food(&store, apple_draft(), 0.5).unwrap().unwrap();

        assert_eq!(get_food(&store, "APPLE").unwrap().unwrap().calories, 84.0);
        assert_eq!(list_foods(&store).unwrap().total, 1);

        let deleted = delete_food(&store, "apple").unwrap().unwrap();
        assert_eq!(deleted.deleted, "Apple");
        assert!(get_food(&store, "apple").unwrap().is_none());
    }
}
