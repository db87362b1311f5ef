mod error;
pub mod repos;
pub mod sqlite;

#[cfg(test)]
pub mod tests;

use std::sync::Arc;

pub use error::{DbError, DbResult};
pub use repos::*;

use crate::config::StoreConfig;

/// Cached repository trait objects, created once at startup.
struct CachedRepos {
    benchmarks: Arc<dyn BenchmarkRepo>,
    prompts: Arc<dyn PromptRepo>,
}

/// SQLite pool with cached repositories.
///
/// Repositories are created at construction time to avoid allocation on each
/// access.
pub struct DbPool {
    pool: sqlx::SqlitePool,
    repos: CachedRepos,
}

impl DbPool {
    /// Create a DbPool from an existing SQLite pool.
    /// Primarily useful for testing.
    pub fn from_sqlite(pool: sqlx::SqlitePool) -> Self {
        let repos = CachedRepos {
            benchmarks: Arc::new(sqlite::SqliteBenchmarkRepo::new(pool.clone())),
            prompts: Arc::new(sqlite::SqlitePromptRepo::new(pool.clone())),
        };
        DbPool { pool, repos }
    }

    /// Open the benchmark store described by the configuration.
    ///
    /// A missing store file (with `create_if_missing` off) surfaces as an
    /// error here; no partial reads or writes are attempted.
    pub async fn connect(config: &StoreConfig) -> DbResult<Self> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(
                sqlx::sqlite::SqliteConnectOptions::new()
                    .filename(&config.path)
                    .create_if_missing(config.create_if_missing)
                    .journal_mode(if config.wal_mode {
                        sqlx::sqlite::SqliteJournalMode::Wal
                    } else {
                        sqlx::sqlite::SqliteJournalMode::Delete
                    })
                    .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms)),
            )
            .await?;

        Ok(Self::from_sqlite(pool))
    }

    /// Run store migrations using sqlx's migration runner.
    ///
    /// In shared deployments the orchestrator owns the schema and this is a
    /// no-op against an already-migrated store; embedded deployments and the
    /// test harness use it to materialize the same shape.
    pub async fn run_migrations(&self) -> DbResult<()> {
        tracing::info!("Running benchmark store migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get benchmark repository
    pub fn benchmarks(&self) -> Arc<dyn BenchmarkRepo> {
        Arc::clone(&self.repos.benchmarks)
    }

    /// Get prompt repository
    pub fn prompts(&self) -> Arc<dyn PromptRepo> {
        Arc::clone(&self.repos.prompts)
    }

    /// Get a reference to the underlying pool.
    /// Useful for operations that need direct pool access.
    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }

    /// Health check for store connectivity
    pub async fn health_check(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
