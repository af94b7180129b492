//! Personal Nutrition Ledger (PNL) Library
//!
//! Food records validated against their macros, a durable food store, and
//! the daily macro tally.

pub mod build_info;
pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod report;
pub mod session;
pub mod store;
pub mod tools;
