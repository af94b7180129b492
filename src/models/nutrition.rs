//! Calorie and macro-nutrient amounts
//!
//! The same shape describes one stored food and a day's running totals.

use serde::{Deserialize, Serialize};

/// Calories and macro-nutrients of one food, or of a day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,     // kcal
    pub protein: f64,      // grams
    pub carbohydrate: f64, // grams, fiber included
    pub fat: f64,          // grams
    pub fiber: f64,        // grams
}

impl Nutrition {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Carbohydrate that carries calories
    pub fn net_carbohydrate(&self) -> f64 {
        self.carbohydrate - self.fiber
    }
}

impl std::ops::AddAssign<&Nutrition> for Nutrition {
    fn add_assign(&mut self, other: &Nutrition) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbohydrate += other.carbohydrate;
        self.fat += other.fat;
        self.fiber += other.fiber;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assign_sums_every_field() {
        let mut day = Nutrition::zero();
        let banana = Nutrition {
            calories: 100.0,
            protein: 1.0,
            carbohydrate: 27.0,
            fat: 0.0,
            fiber: 3.0,
        };
        day += &banana;
        day += &banana;

        assert_eq!(day.calories, 200.0);
        assert_eq!(day.carbohydrate, 54.0);
        assert_eq!(day.fiber, 6.0);
        assert_eq!(day.net_carbohydrate(), 48.0);
    }
}
