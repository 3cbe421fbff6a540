use chrono::Local;
use color_eyre::Result;
use sqlx::{
    migrate::MigrateDatabase, query, query_scalar, sqlite::SqlitePoolOptions, Sqlite, SqlitePool,
};
use tracing::{debug, info};

use crate::db::models::NewBlip;
use crate::db::queries::insert_new_blip;

/// Sets up the database by creating the necessary tables if they don't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS blip (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            sector TEXT,
            ring TEXT,
            description TEXT,
            created TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Creates a database connection pool for the given URL, creating the
/// database file and schema on first run.
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    debug!(database_url, "initializing database");

    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!(database_url, "database does not exist, creating it");
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create SQLite database: {e}"))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                // WAL for better concurrency, NORMAL sync for reliability
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to connect to SQLite database: {e}"))?;

    setup_database(&pool)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to set up database schema: {e}"))?;

    Ok(pool)
}

/// A starter radar so a fresh database renders something worth looking at.
pub fn demo_blips() -> Vec<NewBlip> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    let entries = [
        ("Kubernetes", "platforms", "adopt", "Container orchestration"),
        ("AWS Lambda", "platforms", "trial", "Serverless functions"),
        ("Edge Workers", "platforms", "assess", "Compute at the CDN edge"),
        ("OpenStack", "platforms", "hold", "Self-managed private cloud"),
        ("Rust", "languages", "adopt", "Systems programming"),
        ("TypeScript", "languages", "adopt", "Typed JavaScript"),
        ("Kotlin", "languages", "trial", "JVM services"),
        ("Elm", "languages", "assess", "Typed frontend"),
        ("CoffeeScript", "languages", "hold", "Superseded by ES2015+"),
        ("Terraform", "tools", "adopt", "Infrastructure as code"),
        ("Grafana", "tools", "adopt", "Dashboards and alerting"),
        ("Nix", "tools", "trial", "Reproducible builds"),
        ("Bazel", "tools", "assess", "Monorepo build system"),
        ("Jenkins", "tools", "hold", "Legacy CI"),
        ("Trunk-based dev", "techniques", "adopt", "Short-lived branches"),
        ("Chaos engineering", "techniques", "trial", "Failure injection"),
        ("Event storming", "techniques", "assess", "Domain discovery workshop"),
        ("Gitflow", "techniques", "hold", "Heavyweight branching"),
    ];

    entries
        .iter()
        .map(|(name, sector, ring, description)| NewBlip {
            name: (*name).to_string(),
            sector: (*sector).to_string(),
            ring: (*ring).to_string(),
            description: (*description).to_string(),
            created: today.clone(),
        })
        .collect()
}

/// Inserts the demo radar into an empty blip table; a populated table is
/// left alone.
pub async fn seed_demo_blips(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let count: i64 = query_scalar("SELECT COUNT(*) FROM blip")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    info!("seeding demo blips into empty database");
    for blip in demo_blips() {
        insert_new_blip(pool, &blip).await?;
    }

    Ok(())
}
