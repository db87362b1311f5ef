//! Shared store repository test infrastructure.
//!
//! Fast in-memory SQLite pools with real migrations, so every test runs
//! against the exact schema the orchestrator writes.

pub mod harness;
mod pool;
