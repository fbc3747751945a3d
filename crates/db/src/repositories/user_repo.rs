//! Repository for the `users` table.

use sqlx::PgPool;

use masthead_core::types::DbId;

use crate::models::UserRow;

const USER_COLUMNS: &str = "id, email, display_name, role, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
