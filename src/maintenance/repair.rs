use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{DbResult, PromptRepo},
    models::RepairReport,
};

/// Detects and corrects prompts whose stored search sources contradict their
/// `web_search_used` flag.
///
/// The confirmation gate is an explicit parameter: `apply` with
/// `confirmed = false` is a guaranteed no-op that only reports what would
/// change, independent of any input channel.
pub struct IntegrityRepair {
    prompts: Arc<dyn PromptRepo>,
}

impl IntegrityRepair {
    pub fn new(prompts: Arc<dyn PromptRepo>) -> Self {
        Self { prompts }
    }

    /// Find every prompt violating the search-flag consistency rule.
    pub async fn scan(&self) -> DbResult<Vec<Uuid>> {
        let violations = self.prompts.find_search_flag_violations().await?;
        tracing::info!(count = violations.len(), "Search-flag scan finished");
        Ok(violations)
    }

    /// Repair the given prompts, or dry-run when `confirmed` is false.
    ///
    /// The confirmed path updates all targeted rows in one atomic batch and
    /// re-reads them for the verification report. Re-entrant: repairing
    /// already-consistent rows is a safe no-op.
    pub async fn apply(&self, ids: &[Uuid], confirmed: bool) -> DbResult<RepairReport> {
        if !confirmed {
            tracing::info!(targeted = ids.len(), "Search-flag repair dry run");
            return Ok(RepairReport {
                confirmed: false,
                targeted: ids.to_vec(),
                updated: 0,
                verified: Vec::new(),
            });
        }

        match self.prompts.repair_search_flags(ids).await {
            Ok(verified) => {
                tracing::info!(updated = verified.len(), "Search-flag repair applied");
                Ok(RepairReport {
                    confirmed: true,
                    targeted: ids.to_vec(),
                    updated: verified.len(),
                    verified,
                })
            }
            Err(e) => {
                tracing::error!(targeted = ids.len(), error = %e, "Search-flag repair rolled back");
                Err(e)
            }
        }
    }
}
