use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// How long a writer waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection, creating the database file if needed
    pub async fn new(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url '{}'", url))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open database '{}'", url))?;

        Self::setup_schema(&pool).await?;
        info!("Connected to database {}", url);

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a private in-memory database.
    ///
    /// The pool holds exactly one connection that never expires, since every
    /// connection to `:memory:` would otherwise see its own empty database.
    pub async fn init_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Recurring expense definitions
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                summary TEXT NOT NULL,
                amount TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                frequency TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (user_id, id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_expenses_user_id
            ON expenses(user_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Materialized occurrences, regenerated on every refresh
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                recurrence_id TEXT NOT NULL,
                expense_id TEXT NOT NULL,
                summary TEXT NOT NULL,
                date TEXT NOT NULL,
                amount TEXT NOT NULL,
                frequency TEXT NOT NULL,
                total TEXT NOT NULL DEFAULT '0',
                excluded BOOLEAN NOT NULL DEFAULT FALSE,
                PRIMARY KEY (user_id, id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Window queries filter by user and date range
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_events_user_date
            ON events(user_id, date);
            "#,
        )
        .execute(pool)
        .await?;

        // One row per user; a missing row reads as the default account
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                user_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                checking_balance TEXT NOT NULL DEFAULT '0',
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS debts (
                id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                balance TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (user_id, id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
