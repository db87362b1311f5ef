use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::common::parse_uuid;
use crate::{
    db::{
        error::{DbError, DbResult},
        repos::{PromptRepo, SEARCH_SOURCE_LENGTH_THRESHOLD},
    },
    models::{Prompt, RepairedPrompt},
};

pub struct SqlitePromptRepo {
    pool: SqlitePool,
}

impl SqlitePromptRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromptRepo for SqlitePromptRepo {
    async fn get(&self, id: Uuid) -> DbResult<Option<Prompt>> {
        let row = sqlx::query(
            "SELECT id, run_id, score, web_search_used, web_search_sources \
             FROM prompts WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(Prompt {
                id: parse_uuid(&row.get::<String, _>("id"))?,
                run_id: parse_uuid(&row.get::<String, _>("run_id"))?,
                score: row.get("score"),
                web_search_used: row.get("web_search_used"),
                web_search_sources: row.get("web_search_sources"),
            })
        })
        .transpose()
    }

    async fn find_search_flag_violations(&self) -> DbResult<Vec<Uuid>> {
        let rows = sqlx::query(
            r#"
            SELECT id
            FROM prompts
            WHERE web_search_used = 0
              AND web_search_sources IS NOT NULL
              AND length(trim(web_search_sources)) > ?
            ORDER BY id
            "#,
        )
        .bind(SEARCH_SOURCE_LENGTH_THRESHOLD)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| parse_uuid(&row.get::<String, _>("id")))
            .collect()
    }

    async fn repair_search_flags(&self, ids: &[Uuid]) -> DbResult<Vec<RepairedPrompt>> {
        let mut tx = self.pool.begin().await?;

        for id in ids {
            let result = sqlx::query("UPDATE prompts SET web_search_used = 1 WHERE id = ?")
                .bind(id.to_string())
                .execute(&mut *tx)
                .await?;
            // A targeted id that matches no row aborts the whole batch; the
            // transaction rolls back on drop.
            if result.rows_affected() != 1 {
                return Err(DbError::NotFound);
            }
        }

        // Verification re-read inside the same transaction, so the report
        // reflects exactly the state being committed.
        let mut verified = Vec::with_capacity(ids.len());
        for id in ids {
            let row = sqlx::query(
                r#"
                SELECT id, web_search_used,
                       length(coalesce(web_search_sources, '')) AS source_length
                FROM prompts
                WHERE id = ?
                "#,
            )
            .bind(id.to_string())
            .fetch_one(&mut *tx)
            .await?;

            verified.push(RepairedPrompt {
                prompt_id: parse_uuid(&row.get::<String, _>("id"))?,
                web_search_used: row.get("web_search_used"),
                source_length: row.get("source_length"),
            });
        }

        tx.commit().await?;
        Ok(verified)
    }
}
