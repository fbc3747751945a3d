//! Repository for the singleton `site_settings` row.

use sqlx::PgPool;

use crate::models::SettingsRow;

const SETTINGS_COLUMNS: &str = "maintenance_mode, invitation_mode, updated_at";

pub struct SettingsRepo;

impl SettingsRepo {
    /// Read the settings row (seeded by the initial migration).
    pub async fn get(pool: &PgPool) -> Result<SettingsRow, sqlx::Error> {
        let query = format!("SELECT {SETTINGS_COLUMNS} FROM site_settings WHERE id = TRUE");
        sqlx::query_as::<_, SettingsRow>(&query).fetch_one(pool).await
    }

    /// Overwrite both mode flags. Callers refresh the settings cache
    /// immediately after.
    pub async fn update(
        pool: &PgPool,
        maintenance_mode: bool,
        invitation_mode: bool,
    ) -> Result<SettingsRow, sqlx::Error> {
        let query = format!(
            "UPDATE site_settings \
             SET maintenance_mode = $1, invitation_mode = $2, updated_at = now() \
             WHERE id = TRUE \
             RETURNING {SETTINGS_COLUMNS}"
        );
        sqlx::query_as::<_, SettingsRow>(&query)
            .bind(maintenance_mode)
            .bind(invitation_mode)
            .fetch_one(pool)
            .await
    }
}
