//! Consumption aggregator
//!
//! Running totals for one tracking session and the percentage-of-calories
//! breakdown derived from them.

use serde::Serialize;

use super::atwater::{KCAL_PER_G_CARBOHYDRATE, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use crate::error::EmptyAggregation;
use crate::models::{FoodRecord, Nutrition};

/// Share of total calories contributed by each macro, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakdown {
    pub totals: Nutrition,
    pub protein_pct: f64,
    pub carbohydrate_pct: f64,
    pub fat_pct: f64,
    /// Magnitude of calories the macros don't explain.
    /// Nonzero means recorded calories drifted from the Atwater figure.
    pub unaccounted_pct: f64,
}

/// Folds consumed food records into day totals
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    totals: Nutrition,
    records: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, record: &FoodRecord) {
        self.totals += record.nutrition();
        self.records += 1;
    }

    pub fn totals(&self) -> &Nutrition {
        &self.totals
    }

    /// Number of records accumulated so far
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Percentages of total calories.
    ///
    /// Fails closed with `EmptyAggregation` when nothing was consumed, the
    /// consumed foods carry no calories (fiber only, say), or the total
    /// overflowed.
    pub fn finalize(&self) -> Result<Breakdown, EmptyAggregation> {
        let t = &self.totals;
        if self.is_empty() || !t.calories.is_finite() || t.calories <= 0.0 {
            return Err(EmptyAggregation);
        }

        let protein_pct = t.protein * KCAL_PER_G_PROTEIN * 100.0 / t.calories;
        let fat_pct = t.fat * KCAL_PER_G_FAT * 100.0 / t.calories;
        let carbohydrate_pct = t.net_carbohydrate() * KCAL_PER_G_CARBOHYDRATE * 100.0 / t.calories;
        let unaccounted_pct = (100.0 - protein_pct - fat_pct - carbohydrate_pct).abs();

        Ok(Breakdown {
            totals: *t,
            protein_pct,
            carbohydrate_pct,
            fat_pct,
            unaccounted_pct,
        })
    }
}
