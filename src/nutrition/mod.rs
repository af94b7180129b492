//! Nutrition calculation module
//!
//! Calorie arithmetic, consumption totals and the consumed-food summary.

pub mod aggregator;
pub mod atwater;
pub mod summary;

pub use aggregator::{Aggregator, Breakdown};
pub use atwater::{
    calories_from_macros, is_calorie_consistent, DEFAULT_CALORIE_TOLERANCE, KCAL_PER_G_CARBOHYDRATE,
    KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN,
};
pub use summary::summarize_consumed;
