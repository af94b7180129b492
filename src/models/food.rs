//! Food record model
//!
//! A named food with its calories and macro-nutrients. Records are only
//! built through validating constructors, so a `FoodRecord` in hand always
//! satisfies the calorie invariant.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::Nutrition;
use crate::db::DbResult;
use crate::error::ValidationError;
use crate::nutrition::{calories_from_macros, is_calorie_consistent};

/// Store key for a food name: trimmed, lower-cased, first letter upper-cased.
///
/// "  PEANUT butter" and "peanut Butter" both become "Peanut butter".
pub fn normalize_name(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A validated, immutable food record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodRecord {
    name: String,
    nutrition: Nutrition,
}

/// Typed but unvalidated food data, as a caller supplies it.
///
/// `calories: None` means "derive from the macros".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodDraft {
    pub name: String,
    #[serde(default)]
    pub calories: Option<f64>,
    pub protein: f64,
    pub carbohydrate: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
}

/// Raw strings from an input provider (console prompts and the like)
#[derive(Debug, Clone, Default)]
pub struct RawFoodEntry {
    pub name: String,
    /// Blank means "derive from the macros"
    pub calories: String,
    pub protein: String,
    pub carbohydrate: String,
    pub fat: String,
    pub fiber: String,
}

impl From<&FoodRecord> for FoodDraft {
    fn from(record: &FoodRecord) -> Self {
        let n = record.nutrition();
        Self {
            name: record.name().to_string(),
            calories: Some(n.calories),
            protein: n.protein,
            carbohydrate: n.carbohydrate,
            fat: n.fat,
            fiber: n.fiber,
        }
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotNumeric {
            field,
            value: value.to_string(),
        })
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, value })
    }
}

impl RawFoodEntry {
    /// Parse every numeric field; the first non-numeric one rejects the entry
    pub fn parse(&self) -> Result<FoodDraft, ValidationError> {
        let calories = if self.calories.trim().is_empty() {
            None
        } else {
            Some(parse_number("calories", &self.calories)?)
        };

        Ok(FoodDraft {
            name: self.name.clone(),
            calories,
            protein: parse_number("protein", &self.protein)?,
            carbohydrate: parse_number("carbohydrate", &self.carbohydrate)?,
            fat: parse_number("fat", &self.fat)?,
            fiber: parse_number("fiber", &self.fiber)?,
        })
    }
}

impl FoodRecord {
    /// Build a record whose calories are derived from its macros
    pub fn from_macros(
        name: &str,
        protein: f64,
        carbohydrate: f64,
        fat: f64,
        fiber: f64,
    ) -> Result<Self, ValidationError> {
        Self::from_draft(
            &FoodDraft {
                name: name.to_string(),
                calories: None,
                protein,
                carbohydrate,
                fat,
                fiber,
            },
            0.0,
        )
    }

    /// Validate a draft.
    ///
    /// Supplied calories must fall within `tolerance` of the macro-derived
    /// figure; they are rejected, not corrected, when they don't.
    pub fn from_draft(draft: &FoodDraft, tolerance: f64) -> Result<Self, ValidationError> {
        let name = normalize_name(&draft.name);
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        check_amount("protein", draft.protein)?;
        check_amount("carbohydrate", draft.carbohydrate)?;
        check_amount("fat", draft.fat)?;
        check_amount("fiber", draft.fiber)?;

        if draft.fiber > draft.carbohydrate {
            return Err(ValidationError::FiberExceedsCarbohydrate {
                fiber: draft.fiber,
                carbohydrate: draft.carbohydrate,
            });
        }

        let expected = calories_from_macros(draft.protein, draft.carbohydrate, draft.fat, draft.fiber);
        let calories = match draft.calories {
            None => expected,
            Some(calories) => {
                check_amount("calories", calories)?;
                if !is_calorie_consistent(
                    calories,
                    draft.protein,
                    draft.carbohydrate,
                    draft.fat,
                    draft.fiber,
                    tolerance,
                ) {
                    return Err(ValidationError::CalorieMismatch {
                        calories,
                        expected,
                        tolerance,
                    });
                }
                calories
            }
        };
        // Huge macros overflow the derived figure
        check_amount("calories", calories)?;

        Ok(Self {
            name,
            nutrition: Nutrition {
                calories,
                protein: draft.protein,
                carbohydrate: draft.carbohydrate,
                fat: draft.fat,
                fiber: draft.fiber,
            },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nutrition(&self) -> &Nutrition {
        &self.nutrition
    }

    /// Rows are trusted: they were validated on the way in
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get("Food")?,
            nutrition: Nutrition {
                calories: row.get("Calories")?,
                protein: row.get("Protein")?,
                carbohydrate: row.get("Carbohydrate")?,
                fat: row.get("Fat")?,
                fiber: row.get("Fiber")?,
            },
        })
    }

    /// Insert unless the name is taken.
    ///
    /// Returns `Ok(false)` on a name conflict; the stored row is untouched.
    pub fn insert(conn: &Connection, record: &FoodRecord) -> DbResult<bool> {
        let n = &record.nutrition;
        let rows = conn.execute(
            r#"
            INSERT OR IGNORE INTO foods (Food, Calories, Protein, Fat, Carbohydrate, Fiber)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![record.name, n.calories, n.protein, n.fat, n.carbohydrate, n.fiber],
        )?;
        Ok(rows > 0)
    }

    /// Get a food by name (normalized before lookup)
    pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM foods WHERE Food = ?1")?;

        let result = stmt.query_row([normalize_name(name)], Self::from_row);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All foods, alphabetically
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM foods ORDER BY Food ASC")?;

        let records = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM foods", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a food by name.
    /// Returns Ok(true) if deleted, Ok(false) if not found
    pub fn delete_by_name(conn: &Connection, name: &str) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM foods WHERE Food = ?1", [normalize_name(name)])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;

    fn ledger() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn draft(calories: Option<f64>) -> FoodDraft {
        FoodDraft {
            name: "banana".to_string(),
            calories,
            protein: 1.0,
            carbohydrate: 27.0,
            fat: 0.0,
            fiber: 3.0,
        }
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("apple"), "Apple");
        assert_eq!(normalize_name("  APPLE "), "Apple");
        assert_eq!(normalize_name("peanut BUTTER"), "Peanut butter");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_from_macros_derives_calories() {
        let apple = FoodRecord::from_macros("apple", 0.0, 25.0, 0.0, 4.0).unwrap();
        assert_eq!(apple.name(), "Apple");
        assert_eq!(apple.nutrition().calories, 84.0);
    }

    #[test]
    fn test_supplied_calories_within_tolerance() {
        let banana = FoodRecord::from_draft(&draft(Some(100.4)), 0.5).unwrap();
        assert_eq!(banana.nutrition().calories, 100.4);
    }

    #[test]
    fn test_inconsistent_calories_rejected_not_corrected() {
        let err = FoodRecord::from_draft(&draft(Some(110.0)), 0.5).unwrap_err();
        assert_eq!(
            err,
            ValidationError::CalorieMismatch {
                calories: 110.0,
                expected: 100.0,
                tolerance: 0.5,
            }
        );
    }

    #[test]
    fn test_rejects_bad_amounts() {
        let mut d = draft(None);
        d.fat = -1.0;
        assert!(matches!(
            FoodRecord::from_draft(&d, 0.5),
            Err(ValidationError::OutOfRange { field: "fat", .. })
        ));

        let mut d = draft(None);
        d.fiber = 30.0;
        assert!(matches!(
            FoodRecord::from_draft(&d, 0.5),
            Err(ValidationError::FiberExceedsCarbohydrate { .. })
        ));

        let mut d = draft(None);
        d.name = "  ".to_string();
        assert_eq!(FoodRecord::from_draft(&d, 0.5), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_rejects_overflowing_derived_calories() {
        let lard = FoodDraft {
            name: "lard".to_string(),
            fat: 1e308,
            ..Default::default()
        };
        assert!(matches!(
            FoodRecord::from_draft(&lard, 0.5),
            Err(ValidationError::OutOfRange { field: "calories", value }) if value.is_infinite()
        ));
    }

    #[test]
    fn test_raw_entry_rejects_non_numeric() {
        let raw = RawFoodEntry {
            name: "apple".to_string(),
            calories: String::new(),
            protein: "0".to_string(),
            carbohydrate: "lots".to_string(),
            fat: "0".to_string(),
            fiber: "4".to_string(),
        };
        assert_eq!(
            raw.parse().unwrap_err(),
            ValidationError::NotNumeric {
                field: "carbohydrate",
                value: "lots".to_string(),
            }
        );
    }

    #[test]
    fn test_raw_entry_blank_calories_are_derived() {
        let raw = RawFoodEntry {
            name: "apple".to_string(),
            calories: "  ".to_string(),
            protein: "0".to_string(),
            carbohydrate: " 25 ".to_string(),
            fat: "0".to_string(),
            fiber: "4".to_string(),
        };
        let draft = raw.parse().unwrap();
        assert_eq!(draft.calories, None);

        let record = FoodRecord::from_draft(&draft, 0.5).unwrap();
        assert_eq!(record.nutrition().calories, 84.0);
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let conn = ledger();
        let apple = FoodRecord::from_macros("Apple", 0.0, 25.0, 0.0, 4.0).unwrap();

        assert!(FoodRecord::insert(&conn, &apple).unwrap());
        assert_eq!(FoodRecord::get_by_name(&conn, "APPLE").unwrap(), Some(apple));
    }

    #[test]
    fn test_insert_conflict_keeps_original() {
        let conn = ledger();
        let first = FoodRecord::from_macros("apple", 0.0, 25.0, 0.0, 4.0).unwrap();
        let second = FoodRecord::from_macros("Apple", 1.0, 30.0, 1.0, 2.0).unwrap();

        assert!(FoodRecord::insert(&conn, &first).unwrap());
        assert!(!FoodRecord::insert(&conn, &second).unwrap());
        assert_eq!(FoodRecord::get_by_name(&conn, "apple").unwrap(), Some(first));
        assert_eq!(FoodRecord::count(&conn).unwrap(), 1);
    }

    #[test]
    fn test_delete_by_name() {
        let conn = ledger();
        let apple = FoodRecord::from_macros("apple", 0.0, 25.0, 0.0, 4.0).unwrap();
        FoodRecord::insert(&conn, &apple).unwrap();

        assert!(!FoodRecord::delete_by_name(&conn, "pear").unwrap());
        assert!(FoodRecord::delete_by_name(&conn, " apple").unwrap());
        assert_eq!(FoodRecord::get_by_name(&conn, "apple").unwrap(), None);
    }

    #[test]
    fn test_list_is_alphabetical() {
        let conn = ledger();
        for name in ["pear", "apple", "mango"] {
            let record = FoodRecord::from_macros(name, 0.0, 10.0, 0.0, 1.0).unwrap();
            FoodRecord::insert(&conn, &record).unwrap();
        }

        let names: Vec<String> = FoodRecord::list(&conn)
            .unwrap()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["Apple", "Mango", "Pear"]);
    }
}
