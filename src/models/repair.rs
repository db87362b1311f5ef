use serde::Serialize;
use uuid::Uuid;

/// Post-update verification row for one repaired prompt.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RepairedPrompt {
    pub prompt_id: Uuid,
    /// Flag value re-read after the batch update.
    pub web_search_used: bool,
    /// Length of the stored sources blob, for the audit trail.
    pub source_length: i64,
}

/// Report produced by a search-flag repair pass.
///
/// When `confirmed` is false the pass was a dry run: `updated` is zero and
/// `verified` is empty, and the store is untouched.
#[derive(Debug, Clone, Serialize)]
pub struct RepairReport {
    pub confirmed: bool,
    /// Prompt ids the pass targeted.
    pub targeted: Vec<Uuid>,
    /// Rows actually updated. Re-running on already-repaired rows still
    /// counts them; the update is idempotent.
    pub updated: usize,
    pub verified: Vec<RepairedPrompt>,
}
