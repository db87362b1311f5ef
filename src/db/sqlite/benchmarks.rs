use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::common::parse_uuid;
use crate::{
    db::{
        error::{DbError, DbResult},
        repos::BenchmarkRepo,
    },
    models::{Benchmark, BenchmarkStatus, CompletionCounts, Run, StatusTransition},
};

/// Counts distinct models and distinct models with at least one scored
/// prompt, in one statement.
const COMPLETION_COUNTS_SQL: &str = r#"
    SELECT
        (SELECT COUNT(DISTINCT model_name)
           FROM runs
          WHERE benchmark_id = ?) AS model_count,
        (SELECT COUNT(DISTINCT r.model_name)
           FROM runs r
           JOIN prompts p ON p.run_id = r.id
          WHERE r.benchmark_id = ?
            AND p.score IS NOT NULL) AS completed_model_count
"#;

pub struct SqliteBenchmarkRepo {
    pool: SqlitePool,
}

impl SqliteBenchmarkRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BenchmarkRepo for SqliteBenchmarkRepo {
    async fn list(&self) -> DbResult<Vec<Benchmark>> {
        let rows = sqlx::query("SELECT id, status FROM benchmarks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(Benchmark {
                    id: parse_uuid(&row.get::<String, _>("id"))?,
                    status: BenchmarkStatus::from_str(&row.get::<String, _>("status")),
                })
            })
            .collect()
    }

    async fn runs(&self, benchmark_id: Uuid) -> DbResult<Vec<Run>> {
        let rows = sqlx::query(
            "SELECT id, benchmark_id, model_name FROM runs WHERE benchmark_id = ? ORDER BY id",
        )
        .bind(benchmark_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(Run {
                    id: parse_uuid(&row.get::<String, _>("id"))?,
                    benchmark_id: parse_uuid(&row.get::<String, _>("benchmark_id"))?,
                    model_name: row.get("model_name"),
                })
            })
            .collect()
    }

    async fn completion_counts(&self, benchmark_id: Uuid) -> DbResult<CompletionCounts> {
        let row = sqlx::query(COMPLETION_COUNTS_SQL)
            .bind(benchmark_id.to_string())
            .bind(benchmark_id.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(CompletionCounts {
            model_count: row.get("model_count"),
            completed_model_count: row.get("completed_model_count"),
        })
    }

    async fn reconcile_status(&self, benchmark_id: Uuid) -> DbResult<StatusTransition> {
        let mut tx = self.pool.begin().await?;

        let stored: Option<String> = sqlx::query_scalar("SELECT status FROM benchmarks WHERE id = ?")
            .bind(benchmark_id.to_string())
            .fetch_optional(&mut *tx)
            .await?;
        let Some(stored) = stored else {
            return Err(DbError::NotFound);
        };
        let old_status = BenchmarkStatus::from_str(&stored);

        let row = sqlx::query(COMPLETION_COUNTS_SQL)
            .bind(benchmark_id.to_string())
            .bind(benchmark_id.to_string())
            .fetch_one(&mut *tx)
            .await?;
        let counts = CompletionCounts {
            model_count: row.get("model_count"),
            completed_model_count: row.get("completed_model_count"),
        };
        let new_status = BenchmarkStatus::derive(&counts);

        if new_status != old_status {
            sqlx::query("UPDATE benchmarks SET status = ? WHERE id = ?")
                .bind(new_status.as_str())
                .bind(benchmark_id.to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(StatusTransition {
            benchmark_id,
            old_status,
            new_status,
        })
    }
}
