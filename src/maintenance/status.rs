use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{BenchmarkRepo, DbResult},
    models::StatusTransition,
};

/// Recomputes cached benchmark statuses from ground-truth run/prompt data.
///
/// Each benchmark's counts read and conditional status write happen in one
/// store transaction; the pass is idempotent and safe to re-run at any time.
pub struct StatusReconciler {
    benchmarks: Arc<dyn BenchmarkRepo>,
}

impl StatusReconciler {
    pub fn new(benchmarks: Arc<dyn BenchmarkRepo>) -> Self {
        Self { benchmarks }
    }

    /// Reconcile one benchmark, returning the (possibly no-op) transition.
    pub async fn reconcile(&self, benchmark_id: Uuid) -> DbResult<StatusTransition> {
        let transition = self.benchmarks.reconcile_status(benchmark_id).await?;
        if transition.is_noop() {
            tracing::debug!(
                benchmark_id = %transition.benchmark_id,
                status = %transition.new_status,
                "Benchmark status confirmed"
            );
        } else {
            tracing::info!(
                benchmark_id = %transition.benchmark_id,
                old_status = %transition.old_status,
                new_status = %transition.new_status,
                "Benchmark status corrected"
            );
        }
        Ok(transition)
    }

    /// Reconcile every benchmark in the store, reporting every transition
    /// including no-ops so callers can observe the full pass.
    pub async fn reconcile_all(&self) -> DbResult<Vec<StatusTransition>> {
        let benchmarks = self.benchmarks.list().await?;
        let mut transitions = Vec::with_capacity(benchmarks.len());
        for benchmark in benchmarks {
            transitions.push(self.reconcile(benchmark.id).await?);
        }
        Ok(transitions)
    }
}
