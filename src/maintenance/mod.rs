//! On-demand maintenance passes over the benchmark store.
//!
//! Both passes are discrete batch jobs: no scheduler, no service loop. They
//! read ground truth, correct exactly one derived column each, and report
//! enough detail (affected ids, old/new values) to re-run safely.

mod repair;
mod status;

pub use repair::IntegrityRepair;
pub use status::StatusReconciler;
