//! Rows from the `users` table.
//!
//! Authentication lives with the external session provider; this table
//! only backs author references and role lookups.

use sqlx::FromRow;

use masthead_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
