//! Runtime configuration
//!
//! Read from the environment:
//! - `PNL_DATABASE_PATH`: ledger file (default `<project>/data/pnl.db`)
//! - `PNL_CALORIE_TOLERANCE`: kcal window for supplied calorie values

use std::path::PathBuf;

use thiserror::Error;

use crate::nutrition::DEFAULT_CALORIE_TOLERANCE;

pub const DATABASE_PATH_VAR: &str = "PNL_DATABASE_PATH";
pub const CALORIE_TOLERANCE_VAR: &str = "PNL_CALORIE_TOLERANCE";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PNL_CALORIE_TOLERANCE must be a finite number >= 0, got {0:?}")]
    InvalidTolerance(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub calorie_tolerance: f64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let tolerance = std::env::var(CALORIE_TOLERANCE_VAR).ok();
        Ok(Self {
            database_path: database_path_from(std::env::var(DATABASE_PATH_VAR).ok()),
            calorie_tolerance: parse_tolerance(tolerance.as_deref())?,
        })
    }
}

fn parse_tolerance(raw: Option<&str>) -> Result<f64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_CALORIE_TOLERANCE);
    };

    match raw.trim().parse::<f64>() {
        Ok(t) if t.is_finite() && t >= 0.0 => Ok(t),
        _ => Err(ConfigError::InvalidTolerance(raw.to_string())),
    }
}

/// Explicit path, or `data/pnl.db` next to the project root
fn database_path_from(explicit: Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("pnl.db");
    path
}
