use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::error::DbResult,
    models::{Benchmark, CompletionCounts, Run, StatusTransition},
};

/// Read access to benchmarks and their runs, plus the single status write
/// this crate is allowed to make. Rows are created and mutated by the
/// external orchestrator; this interface never creates or deletes them.
#[async_trait]
pub trait BenchmarkRepo: Send + Sync {
    /// Every benchmark with its stored status, ordered by id for stable
    /// batch reports.
    async fn list(&self) -> DbResult<Vec<Benchmark>>;

    /// Runs belonging to one benchmark.
    async fn runs(&self, benchmark_id: Uuid) -> DbResult<Vec<Run>>;

    /// Aggregate completion counts for one benchmark, in a single read pass.
    async fn completion_counts(&self, benchmark_id: Uuid) -> DbResult<CompletionCounts>;

    /// Recompute the benchmark's status from completion counts and persist
    /// it when it differs from the stored value.
    ///
    /// The counts read and the conditional write execute inside one
    /// transaction so a concurrent orchestrator writer cannot make the
    /// written status stale. Returns the transition, including no-ops.
    /// `DbError::NotFound` if the benchmark does not exist.
    async fn reconcile_status(&self, benchmark_id: Uuid) -> DbResult<StatusTransition>;
}
