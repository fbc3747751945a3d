//! Handlers for site settings. Admin only.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use masthead_core::error::CoreError;
use masthead_core::roles::Role;
use masthead_core::store::SettingsUpdate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct UpdateSettingsRequest {
    pub maintenance_mode: bool,
    pub invitation_mode: bool,
}

/// GET /settings
pub async fn get_settings(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    if auth.role != Role::Admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins may view site settings".into(),
        )));
    }

    let settings = state.service.settings().await?;
    Ok(Json(DataResponse::new(settings)))
}

/// PUT /settings
///
/// Persist the mode flags and refresh the settings cache so the gates
/// see the change immediately instead of after TTL expiry.
pub async fn update_settings(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateSettingsRequest>,
) -> AppResult<impl IntoResponse> {
    let updated = state
        .service
        .update_settings(
            &auth.actor(),
            SettingsUpdate {
                maintenance_mode: input.maintenance_mode,
                invitation_mode: input.invitation_mode,
            },
        )
        .await?;

    state.settings_cache.put(updated.clone()).await;

    tracing::info!(
        user_id = auth.user_id,
        maintenance_mode = updated.maintenance_mode,
        invitation_mode = updated.invitation_mode,
        "Site settings updated"
    );

    Ok(Json(DataResponse::new(updated)))
}
