//! Day report
//!
//! What a finished tracking session hands to the output sink.

use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::nutrition::Breakdown;

/// End-of-session result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Summary {
    /// Nothing caloric was consumed; percentages are suppressed
    NoData,
    Report(DayReport),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayReport {
    pub started_at: DateTime<Local>,
    /// "2x Apples" lines, first-occurrence order
    pub consumed: Vec<String>,
    pub breakdown: Breakdown,
}

/// Plain-text report, every figure to two decimals
impl fmt::Display for DayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.breakdown;
        let t = &b.totals;

        writeln!(f, "Tracking session started {}", self.started_at.format("%Y-%m-%d %H:%M"))?;
        writeln!(f, "You consumed:")?;
        for line in &self.consumed {
            writeln!(f, "  {}", line)?;
        }
        writeln!(f)?;
        writeln!(f, "Calories:     {:.2} kcal", t.calories)?;
        writeln!(f, "Protein:      {:.2} g ({:.2}% of calories)", t.protein, b.protein_pct)?;
        writeln!(
            f,
            "Carbohydrate: {:.2} g ({:.2}% of calories)",
            t.carbohydrate, b.carbohydrate_pct
        )?;
        writeln!(f, "Fat:          {:.2} g ({:.2}% of calories)", t.fat, b.fat_pct)?;
        writeln!(f, "Fiber:        {:.2} g", t.fiber)?;
        write!(f, "Unaccounted:  {:.2}% of calories", b.unaccounted_pct)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::NoData => f.write_str("No data available"),
            Summary::Report(report) => fmt::Display::fmt(report, f),
        }
    }
}

impl DayReport {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Summary {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Output sink line after a successful save
pub fn saved_notice(name: &str) -> String {
    format!("Successfully saved {} to the database.", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodRecord;
    use crate::nutrition::Aggregator;

    #[test]
    fn test_render_two_decimals() {
        let mut agg = Aggregator::new();
        agg.accumulate(&FoodRecord::from_macros("apple", 0.0, 25.0, 0.0, 4.0).unwrap());
        agg.accumulate(&FoodRecord::from_macros("banana", 1.0, 27.0, 0.0, 3.0).unwrap());

        let report = DayReport {
            started_at: Local::now(),
            consumed: vec!["1x Apple".to_string(), "1x Banana".to_string()],
            breakdown: agg.finalize().unwrap(),
        };
        let text = report.render();

        assert!(text.contains("  1x Apple\n  1x Banana\n"));
        assert!(text.contains("Calories:     184.00 kcal"));
        assert!(text.contains("Protein:      1.00 g (2.17% of calories)"));
        assert!(text.contains("Carbohydrate: 52.00 g (97.83% of calories)"));
        assert!(text.contains("Fat:          0.00 g (0.00% of calories)"));
        assert!(text.contains("Fiber:        7.00 g"));
        assert!(text.ends_with("Unaccounted:  0.00% of calories"));
    }

    #[test]
    fn test_no_data() {
        assert_eq!(Summary::NoData.render(), "No data available");
    }

    #[test]
    fn test_summary_display_matches_report() {
        let mut agg = Aggregator::new();
        agg.accumulate(&FoodRecord::from_macros("egg", 6.0, 1.0, 5.0, 0.0).unwrap());
        let report = DayReport {
            started_at: Local::now(),
            consumed: vec!["1x Egg".to_string()],
            breakdown: agg.finalize().unwrap(),
        };

        let summary = Summary::Report(report.clone());
        assert_eq!(format!("{}", summary), report.render());
        assert!(summary.render().contains("Calories:     73.00 kcal"));
    }
}
