use std::sync::Arc;

use masthead_core::editorial::EditorialService;
use masthead_core::settings::SettingsCache;
use masthead_db::PgEditorialStore;

use crate::config::ServerConfig;
use crate::notifications::Notifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: masthead_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Editorial workflow service over the Postgres store.
    pub service: Arc<EditorialService<PgEditorialStore>>,
    /// Process-wide TTL cache for the site settings row.
    pub settings_cache: Arc<SettingsCache>,
    /// Broadcast bus for editorial events.
    pub notifier: Arc<Notifier>,
}
