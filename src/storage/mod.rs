// SPDX-License-Identifier: MIT
//! SQLite-backed persistence.
//!
//! WAL journal, one pooled connection. SQLite allows a single writer at a
//! time; capping the pool at one connection serializes writes instead of
//! surfacing SQLITE_BUSY to requests. Every store operation is a single
//! parameterized statement.

pub mod tasks;

use anyhow::{Context as _, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use std::path::Path;
use std::str::FromStr;

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open (creating if missing) the database at `db_path` and apply the
    /// schema.
    ///
    /// `slow_query_ms` is the threshold in milliseconds — statements
    /// exceeding it are logged at WARN level. Set to 0 to disable.
    pub async fn open(db_path: &Path, slow_query_ms: u64) -> Result<Self> {
        if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating database directory {}", dir.display()))?;
        }

        let mut opts =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", db_path.display()))?
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .create_if_missing(true);

        if slow_query_ms > 0 {
            opts = opts.log_slow_statements(
                log::LevelFilter::Warn,
                std::time::Duration::from_millis(slow_query_ms),
            );
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .context("opening SQLite database")?;
        Self::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Return a clone of the connection pool (cheap — Arc-backed).
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Idempotent DDL, applied on every startup.
    async fn init_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tasks (
                 id          INTEGER PRIMARY KEY AUTOINCREMENT,
                 title       TEXT NOT NULL,
                 description TEXT NOT NULL DEFAULT '',
                 user_id     INTEGER NOT NULL,
                 due_date    TEXT,
                 status      TEXT NOT NULL DEFAULT 'Todo',
                 created_at  TEXT NOT NULL,
                 updated_at  TEXT NOT NULL
             )",
        )
        .execute(pool)
        .await
        .context("creating tasks table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_tasks_user ON tasks(user_id, created_at)")
            .execute(pool)
            .await
            .context("creating tasks index")?;

        Ok(())
    }
}
