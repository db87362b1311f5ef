use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a benchmark. Derived from run/prompt completion data,
/// never independently authored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BenchmarkStatus {
    #[default]
    InProgress,
    Complete,
}

impl BenchmarkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Complete => "complete",
        }
    }

    /// Lenient parse for stored values; anything unrecognized reads as
    /// in-progress.
    pub fn from_str(s: &str) -> Self {
        match s {
            "complete" => Self::Complete,
            _ => Self::InProgress,
        }
    }

    /// Derive the status from aggregate completion counts.
    ///
    /// A benchmark is complete iff it has at least one run and every distinct
    /// model among its runs has at least one scored prompt. Zero runs is an
    /// internal `no-runs` classification that maps to in-progress on write.
    pub fn derive(counts: &CompletionCounts) -> Self {
        if counts.model_count > 0 && counts.model_count == counts.completed_model_count {
            Self::Complete
        } else {
            Self::InProgress
        }
    }
}

impl std::fmt::Display for BenchmarkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate completion counts for one benchmark, read in a single pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionCounts {
    /// Distinct model names across the benchmark's runs.
    pub model_count: i64,
    /// Distinct model names with at least one scored prompt in any of that
    /// model's runs.
    pub completed_model_count: i64,
}

/// A logical grouping of evaluation runs across one or more models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Benchmark {
    pub id: Uuid,
    pub status: BenchmarkStatus,
}

/// One model's execution pass within a benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: Uuid,
    pub benchmark_id: Uuid,
    pub model_name: String,
}

/// A single evaluated input/output pair within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: Uuid,
    pub run_id: Uuid,
    /// None until the prompt has been evaluated.
    pub score: Option<f64>,
    pub web_search_used: bool,
    pub web_search_sources: Option<String>,
}

/// Outcome of reconciling one benchmark's status, including no-op passes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatusTransition {
    pub benchmark_id: Uuid,
    pub old_status: BenchmarkStatus,
    pub new_status: BenchmarkStatus,
}

impl StatusTransition {
    /// True when reconciliation confirmed the stored status.
    pub fn is_noop(&self) -> bool {
        self.old_status == self.new_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_requires_runs() {
        let counts = CompletionCounts {
            model_count: 0,
            completed_model_count: 0,
        };
        assert_eq!(BenchmarkStatus::derive(&counts), BenchmarkStatus::InProgress);
    }

    #[test]
    fn test_derive_requires_every_model_scored() {
        let partial = CompletionCounts {
            model_count: 2,
            completed_model_count: 1,
        };
        assert_eq!(
            BenchmarkStatus::derive(&partial),
            BenchmarkStatus::InProgress
        );

        let full = CompletionCounts {
            model_count: 2,
            completed_model_count: 2,
        };
        assert_eq!(BenchmarkStatus::derive(&full), BenchmarkStatus::Complete);
    }

    #[test]
    fn test_status_string_round_trip() {
        assert_eq!(BenchmarkStatus::from_str("complete"), BenchmarkStatus::Complete);
        assert_eq!(
            BenchmarkStatus::from_str("in-progress"),
            BenchmarkStatus::InProgress
        );
        assert_eq!(
            BenchmarkStatus::from_str("garbage"),
            BenchmarkStatus::InProgress
        );
        assert_eq!(BenchmarkStatus::Complete.as_str(), "complete");
    }
}
