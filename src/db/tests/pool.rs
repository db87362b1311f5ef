//! Pool construction and store-availability tests.

use crate::{config::StoreConfig, db::DbPool, models::BenchmarkStatus};

use super::harness::{create_store, seed_benchmark};

#[tokio::test]
async fn test_from_sqlite_serves_cached_repos() {
    let pool = create_store().await;
    let id = seed_benchmark(&pool, BenchmarkStatus::InProgress).await;

    let db = DbPool::from_sqlite(pool);
    db.health_check().await.unwrap();

    let benchmarks = db.benchmarks().list().await.unwrap();
    assert_eq!(benchmarks.len(), 1);
    assert_eq!(benchmarks[0].id, id);
    assert!(db.prompts().find_search_flag_violations().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_connect_creates_and_migrates_store_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = StoreConfig::new(dir.path().join("bench.db"));
    config.create_if_missing = true;

    let db = DbPool::connect(&config).await.unwrap();
    db.run_migrations().await.unwrap();

    // The schema is in place: an empty store reconciles to nothing.
    assert!(db.benchmarks().list().await.unwrap().is_empty());

    sqlx::query("INSERT INTO benchmarks (id, status) VALUES (?, ?)")
        .bind(uuid::Uuid::new_v4().to_string())
        .bind("in-progress")
        .execute(db.pool())
        .await
        .unwrap();
    assert_eq!(db.benchmarks().list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_connect_fails_on_missing_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("absent.db"));

    // create_if_missing defaults to off; the orchestrator owns store creation.
    assert!(DbPool::connect(&config).await.is_err());
}
