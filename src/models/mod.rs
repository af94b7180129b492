//! Data models
//!
//! Rust structs representing ledger entities.

mod food;
mod nutrition;

pub use food::{normalize_name, FoodDraft, FoodRecord, RawFoodEntry};
pub use nutrition::Nutrition;
