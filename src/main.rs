//! Personal Nutrition Ledger (PNL)
//!
//! An MCP server for recording foods and tallying daily macros.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use pnl::config::Config;
use pnl::db::{self, Database};
use pnl::mcp::PnlService;
use pnl::store::SqliteFoodStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr; stdout is the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pnl=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    pnl::build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env()?;
    eprintln!("Database path: {}", config.database_path.display());
    eprintln!("Calorie tolerance: {} kcal", config.calorie_tolerance);

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::new(&config.database_path)?;
    database.with_conn(|conn| {
        db::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    let store = SqliteFoodStore::new(database);
    let service = PnlService::new(config.database_path, store, config.calorie_tolerance);

    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
