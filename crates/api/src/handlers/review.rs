//! Handlers for the admin review queue.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use masthead_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

/// GET /review/queue
///
/// Articles awaiting review, oldest submission first.
pub async fn queue(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let articles = state.service.review_queue(&auth.actor()).await?;
    Ok(Json(DataResponse::new(articles)))
}

/// POST /review/{id}/approve
///
/// Publish a pending article.
pub async fn approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = state.service.approve(&auth.actor(), id).await?;

    tracing::info!(
        user_id = auth.user_id,
        article_id = id,
        "Article approved and published"
    );

    Ok(Json(DataResponse::new(article)))
}

/// POST /review/{id}/reject
///
/// Send a pending article back to its author with a reason.
pub async fn reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<impl IntoResponse> {
    let article = state
        .service
        .reject(&auth.actor(), id, &input.reason)
        .await?;

    tracing::info!(user_id = auth.user_id, article_id = id, "Article rejected");

    Ok(Json(DataResponse::new(article)))
}
