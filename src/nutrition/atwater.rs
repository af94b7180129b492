//! Atwater calorie arithmetic
//!
//! 4 kcal per gram of protein and net carbohydrate, 9 kcal per gram of fat.
//! Fiber is counted inside carbohydrate and contributes nothing.

/// kcal per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal per gram of net carbohydrate
pub const KCAL_PER_G_CARBOHYDRATE: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Default window for calorie figures supplied alongside macros.
///
/// Label calories are rounded to whole kcal, so half a kcal either way.
pub const DEFAULT_CALORIE_TOLERANCE: f64 = 0.5;

/// Calories implied by a macro composition.
///
/// Total over all reals; negative grams are the caller's problem.
pub fn calories_from_macros(protein_g: f64, carbohydrate_g: f64, fat_g: f64, fiber_g: f64) -> f64 {
    protein_g * KCAL_PER_G_PROTEIN
        + (carbohydrate_g - fiber_g) * KCAL_PER_G_CARBOHYDRATE
        + fat_g * KCAL_PER_G_FAT
}

/// Whether `calories` is within `tolerance` of the macro-derived figure.
///
/// The window is open (`<`); a tolerance of zero accepts only an exact match.
pub fn is_calorie_consistent(
    calories: f64,
    protein_g: f64,
    carbohydrate_g: f64,
    fat_g: f64,
    fiber_g: f64,
    tolerance: f64,
) -> bool {
    let delta = (calories - calories_from_macros(protein_g, carbohydrate_g, fat_g, fiber_g)).abs();
    delta == 0.0 || delta < tolerance
}
