//! Error types for the ledger core
//!
//! None of these are fatal: each is returned to the caller, which decides
//! whether to retry the entry, report it, or move on.

use thiserror::Error;

use crate::db::DbError;

/// A candidate food record was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Food name cannot be empty")]
    EmptyName,

    #[error("{field} must be a number, got {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("{field} must be a finite, non-negative number, got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("fiber ({fiber}g) cannot exceed carbohydrate ({carbohydrate}g)")]
    FiberExceedsCarbohydrate { fiber: f64, carbohydrate: f64 },

    #[error(
        "The calories don't seem right for the macro-nutrients: \
         got {calories} kcal, macros give {expected} kcal (tolerance {tolerance})"
    )]
    CalorieMismatch {
        calories: f64,
        expected: f64,
        tolerance: f64,
    },
}

/// Outcome of a failed store operation
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert refused, the stored record was kept
    #[error("{0} is already in the database, the new entry was discarded")]
    Conflict(String),

    #[error("{0} was not found in the database")]
    NotFound(String),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Nothing (or nothing caloric) was consumed, so no percentages exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No data available")]
pub struct EmptyAggregation;
