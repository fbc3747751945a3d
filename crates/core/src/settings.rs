//! Site-wide settings, the request-time mode gates, and the TTL cache.
//!
//! The settings record is a single row read on nearly every request, so it
//! is cached process-wide with a short TTL. The cache is an explicit object
//! with populate-on-miss, expiry, and an `invalidate()` that every settings
//! write path must call.

use std::future::Future;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::Timestamp;

/// The persisted settings record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Non-admin traffic is redirected to a maintenance page.
    pub maintenance_mode: bool,
    /// Anonymous traffic is redirected to the invitation landing page.
    pub invitation_mode: bool,
    pub updated_at: Timestamp,
}

/// Whether a mode flag should gate this actor.
///
/// Admins always pass through; everyone else (including anonymous traffic,
/// `role = None`) is gated while the flag is set.
pub fn should_gate(flag_enabled: bool, role: Option<Role>) -> bool {
    if !flag_enabled {
        return false;
    }
    match role {
        Some(Role::Admin) => false,
        Some(Role::Writer | Role::Poet) | None => true,
    }
}

struct CacheSlot {
    value: SiteSettings,
    expires_at: Instant,
}

/// Process-wide settings cache with a time-based TTL.
pub struct SettingsCache {
    ttl: Duration,
    slot: RwLock<Option<CacheSlot>>,
}

impl SettingsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached settings, loading through `load` on a miss or
    /// after expiry.
    ///
    /// Load failures propagate; the gate middleware decides whether to
    /// fail open.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<SiteSettings, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SiteSettings, CoreError>>,
    {
        {
            let slot = self.slot.read().await;
            if let Some(cached) = slot.as_ref() {
                if cached.expires_at > Instant::now() {
                    return Ok(cached.value.clone());
                }
            }
        }

        let value = load().await?;
        let mut slot = self.slot.write().await;
        *slot = Some(CacheSlot {
            value: value.clone(),
            expires_at: Instant::now() + self.ttl,
        });
        Ok(value)
    }

    /// Replace the cached value, restarting the TTL. Called after a
    /// settings write so reads within the TTL window stay consistent.
    pub async fn put(&self, value: SiteSettings) {
        let mut slot = self.slot.write().await;
        *slot = Some(CacheSlot {
            value,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Drop the cached value so the next read goes to the store.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }
}
