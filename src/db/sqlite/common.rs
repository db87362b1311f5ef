use uuid::Uuid;

use crate::db::error::{DbError, DbResult};

/// Parse a UUID column stored as TEXT, surfacing corruption as an internal
/// error rather than a panic.
pub fn parse_uuid(s: &str) -> DbResult<Uuid> {
    Uuid::parse_str(s).map_err(|e| DbError::Internal(format!("Invalid UUID in database: {}", e)))
}
