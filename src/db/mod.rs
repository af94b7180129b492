//! Database module
//!
//! The SQLite ledger file: pooled connections and schema migrations.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
pub use migrations::run_migrations;
