//! PNL Status Tool
//!
//! Runtime status of the service, plus the tracking how-to text.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::store::FoodStore;

/// Tracking instructions for AI assistants
pub const TRACKING_INSTRUCTIONS: &str = r#"
# PNL Tracking Instructions

## Foods

Every food is stored once, under its normalized name ("apple", "APPLE" and
" Apple " are all "Apple"). Provide grams of protein, carbohydrate, fat and
fiber. Carbohydrate includes fiber.

Calories are optional. When omitted they are derived:

    calories = protein*4 + (carbohydrate - fiber)*4 + fat*9

When given, they must match that figure within the configured tolerance or
the food is rejected. Nothing is ever silently corrected.

- `add_food` saves a new food. A name that already exists is NOT
  overwritten; the response names the duplicate and shows the kept record.
- `get_food`, `list_foods`, `delete_food` do what they say. Foods cannot be
  edited; delete and add again instead.

## Tracking a day

1. `start_tracking`
2. `consume_food` once per item eaten (repeat for repeats).
   - outcome `added`: counted.
   - outcome `unknown_food`: the food is not stored. Call `register_food`
     with its macros (saves it and counts it) or `skip_food` (counts
     nothing). Nothing else is accepted until you do.
3. `finish_tracking` returns the report: foods with counts, totals, and the
   percentage of calories from protein, carbohydrate and fat, plus the
   unaccounted share. A large unaccounted share means stored calories
   drifted from the macros.

If nothing with calories was eaten the report is "No data available".
"#;

#[derive(Debug, Serialize)]
pub struct PnlStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub food_count: Option<i64>,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status<S: FoodStore>(&self, store: &S) -> PnlStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let food_count = match store.count() {
            Ok(n) => Some(n),
            Err(e) => {
                tracing::warn!(error = %e, "Could not count foods for status");
                None
            }
        };

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        PnlStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            food_count,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodRecord;
    use crate::store::MemoryFoodStore;

    #[test]
    fn test_status_counts_foods() {
        let store = MemoryFoodStore::new();
        store
            .put(&FoodRecord::from_macros("apple", 0.0, 25.0, 0.0, 4.0).unwrap())
            .unwrap();

        let status = StatusTracker::new(PathBuf::from("/nonexistent/pnl.db")).get_status(&store);
        assert_eq!(status.food_count, Some(1));
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
    }
}
