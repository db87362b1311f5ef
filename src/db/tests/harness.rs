//! Test harness for store repository testing.
//!
//! Provides an in-memory SQLite pool with real migrations, plus seed helpers
//! that write rows the way the external orchestrator would. Seeding goes
//! through raw SQL on purpose: the repository interfaces never create rows.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::BenchmarkStatus;

/// Create an in-memory SQLite pool with migrations applied.
pub async fn create_store() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub async fn seed_benchmark(pool: &SqlitePool, status: BenchmarkStatus) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO benchmarks (id, status) VALUES (?, ?)")
        .bind(id.to_string())
        .bind(status.as_str())
        .execute(pool)
        .await
        .expect("Failed to seed benchmark");
    id
}

pub async fn seed_run(pool: &SqlitePool, benchmark_id: Uuid, model_name: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO runs (id, benchmark_id, model_name) VALUES (?, ?, ?)")
        .bind(id.to_string())
        .bind(benchmark_id.to_string())
        .bind(model_name)
        .execute(pool)
        .await
        .expect("Failed to seed run");
    id
}

pub async fn seed_prompt(
    pool: &SqlitePool,
    run_id: Uuid,
    score: Option<f64>,
    web_search_used: bool,
    web_search_sources: Option<&str>,
) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO prompts (id, run_id, score, web_search_used, web_search_sources)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(run_id.to_string())
    .bind(score)
    .bind(web_search_used)
    .bind(web_search_sources)
    .execute(pool)
    .await
    .expect("Failed to seed prompt");
    id
}

/// Read a benchmark's stored status directly, bypassing the repos.
pub async fn stored_status(pool: &SqlitePool, benchmark_id: Uuid) -> BenchmarkStatus {
    let status: String = sqlx::query_scalar("SELECT status FROM benchmarks WHERE id = ?")
        .bind(benchmark_id.to_string())
        .fetch_one(pool)
        .await
        .expect("Failed to read benchmark status");
    BenchmarkStatus::from_str(&status)
}

/// Read a prompt's stored flag directly, bypassing the repos.
pub async fn stored_search_flag(pool: &SqlitePool, prompt_id: Uuid) -> bool {
    sqlx::query_scalar("SELECT web_search_used FROM prompts WHERE id = ?")
        .bind(prompt_id.to_string())
        .fetch_one(pool)
        .await
        .expect("Failed to read prompt flag")
}
