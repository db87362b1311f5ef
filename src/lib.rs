//! benchledger: cost accounting and state reconciliation for LLM benchmark
//! runs.
//!
//! Two concerns live here:
//!
//! - **Cost computation**: deterministic multi-tier pricing (token, web
//!   search, image generation) over a versioned static catalog. See
//!   [`pricing`].
//! - **Store maintenance**: keeping a benchmark's derived `status` and the
//!   `web_search_used` flag consistent with the run/prompt ground truth the
//!   orchestrator writes incrementally. See [`maintenance`] and [`db`].
//!
//! The crate makes no network calls and owns no UI; it consumes usage
//! counters and persisted rows, and produces cost breakdowns and corrected
//! state.

pub mod config;
pub mod db;
pub mod maintenance;
pub mod models;
pub mod pricing;

pub use config::{CatalogOverrides, StoreConfig};
pub use db::{DbError, DbPool, DbResult};
pub use maintenance::{IntegrityRepair, StatusReconciler};
pub use pricing::{
    CostBreakdown, CostEngine, CostError, ImageBreakdown, ImageRequest, ModelProvider,
    PricingCatalog, SearchContextTier, UsageSample, classify_provider,
};
