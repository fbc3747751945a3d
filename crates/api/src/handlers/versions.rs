//! Handlers for article version history and restore.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use masthead_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /articles/{id}/versions
///
/// Version history, most recent first. Admin or the article's author.
pub async fn list_versions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let versions = state.service.versions(&auth.actor(), id).await?;
    Ok(Json(DataResponse::new(versions)))
}

/// POST /articles/{id}/versions/{version_id}/restore
///
/// Copy a stored version's content back onto the live article. The
/// current content is snapshotted first, so the restore is undoable.
pub async fn restore_version(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, version_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let article = state
        .service
        .restore_version(&auth.actor(), id, version_id)
        .await?;

    tracing::info!(
        user_id = auth.user_id,
        article_id = id,
        version_id,
        "Article version restored"
    );

    Ok(Json(DataResponse::new(article)))
}
