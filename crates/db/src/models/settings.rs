//! The singleton `site_settings` row.

use sqlx::FromRow;

use masthead_core::settings::SiteSettings;
use masthead_core::types::Timestamp;

#[derive(Debug, Clone, FromRow)]
pub struct SettingsRow {
    pub maintenance_mode: bool,
    pub invitation_mode: bool,
    pub updated_at: Timestamp,
}

impl From<SettingsRow> for SiteSettings {
    fn from(row: SettingsRow) -> Self {
        SiteSettings {
            maintenance_mode: row.maintenance_mode,
            invitation_mode: row.invitation_mode,
            updated_at: row.updated_at,
        }
    }
}
