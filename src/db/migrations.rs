//! Database migrations
//!
//! The `foods` relation keeps the column names of the original ledger file
//! (`Food`, `Calories`, ...) so existing ledgers open without conversion.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 2;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;
    if current_version < SCHEMA_VERSION {
        tracing::info!(from = current_version, to = SCHEMA_VERSION, "Migrating ledger schema");
    }

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    if current_version < 2 {
        migrate_v2(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (2)", [])?;
    }

    Ok(())
}

/// Migration v1: the foods relation.
///
/// `IF NOT EXISTS` so a ledger written by the older tool (no Fiber column,
/// no migrations table) is adopted as-is; v2 fills in the gap.
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS foods (
            Food TEXT NOT NULL PRIMARY KEY,  -- normalized name
            Calories REAL NOT NULL,          -- kcal
            Protein REAL NOT NULL,           -- grams
            Fat REAL NOT NULL,               -- grams
            Carbohydrate REAL NOT NULL       -- grams
        );
        "#,
    )?;

    Ok(())
}

/// Migration v2: fiber, needed for net-carbohydrate calories
fn migrate_v2(conn: &Connection) -> DbResult<()> {
    if !has_column(conn, "foods", "Fiber")? {
        conn.execute(
            "ALTER TABLE foods ADD COLUMN Fiber REAL NOT NULL DEFAULT 0",
            [],
        )?;
        tracing::info!("Added Fiber column to foods table");
    }

    Ok(())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(names.iter().any(|n| n.eq_ignore_ascii_case(column)))
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_database_reaches_current_version() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(has_column(&conn, "foods", "Fiber").unwrap());
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_legacy_ledger_gains_fiber_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE foods(
                Food TEXT NOT NULL PRIMARY KEY,
                Calories INT NOT NULL,
                Protein INT NOT NULL,
                Fat INT NOT NULL,
                Carbohydrate INT NOT NULL
            );
            INSERT INTO foods VALUES ('Egg', 78, 6, 5, 1);",
        )
        .unwrap();

        run_migrations(&conn).unwrap();

        let fiber: f64 = conn
            .query_row("SELECT Fiber FROM foods WHERE Food = 'Egg'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fiber, 0.0);
    }
}
