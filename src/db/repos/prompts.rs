use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::error::DbResult,
    models::{Prompt, RepairedPrompt},
};

/// Minimum stored-source length (after trimming) above which a prompt with
/// `web_search_used = false` is considered inconsistent. The boundary is
/// exclusive: exactly this length is not a violation.
pub const SEARCH_SOURCE_LENGTH_THRESHOLD: i64 = 10;

/// Access to prompt rows for search-flag consistency maintenance. Only the
/// `web_search_used` column is ever written; no other field is touched.
#[async_trait]
pub trait PromptRepo: Send + Sync {
    /// Fetch one prompt row.
    async fn get(&self, id: Uuid) -> DbResult<Option<Prompt>>;

    /// Ids of every prompt whose stored sources imply search was used but
    /// whose flag says otherwise, ordered by id for re-runnable reports.
    async fn find_search_flag_violations(&self) -> DbResult<Vec<Uuid>>;

    /// Set `web_search_used = true` for exactly the given prompts in one
    /// atomic batch, then re-read those rows for verification.
    ///
    /// All-or-nothing: any failure mid-batch (including a targeted id that
    /// does not exist) rolls the whole update back. Safe to re-run on
    /// already-repaired rows.
    async fn repair_search_flags(&self, ids: &[Uuid]) -> DbResult<Vec<RepairedPrompt>>;
}
