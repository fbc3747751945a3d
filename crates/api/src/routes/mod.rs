//! Route table for the `/api/v1` surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{articles, review, settings, versions};
use crate::state::AppState;

pub mod health;

/// All versioned API routes.
///
/// The mode gate middleware is layered on top of this router by
/// [`crate::router::build_app_router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Articles.
        .route("/articles", post(articles::create_article))
        .route(
            "/articles/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route("/articles/{id}/submit", post(articles::submit_article))
        .route("/articles/{id}/view", post(articles::record_view))
        // Version history.
        .route("/articles/{id}/versions", get(versions::list_versions))
        .route(
            "/articles/{id}/versions/{version_id}/restore",
            post(versions::restore_version),
        )
        // Review queue.
        .route("/review/queue", get(review::queue))
        .route("/review/{id}/approve", post(review::approve))
        .route("/review/{id}/reject", post(review::reject))
        // Site settings.
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
}
