use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Benchmark store (SQLite) connection configuration.
///
/// # Example Configuration
///
/// ```toml
/// [store]
/// path = "benchmarks.db"
/// max_connections = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// The orchestrator owns the store; by default a missing file is an
    /// error rather than an empty database.
    #[serde(default)]
    pub create_if_missing: bool,

    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: default_max_connections(),
            create_if_missing: false,
            wal_mode: default_wal_mode(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_wal_mode() -> bool {
    true
}

fn default_busy_timeout_ms() -> u64 {
    5000
}
