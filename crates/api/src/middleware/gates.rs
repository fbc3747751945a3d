//! Site-mode gate middleware.
//!
//! Applied to everything under `/api/v1`. Reads the site settings through
//! the TTL cache and short-circuits requests while a mode flag is set:
//!
//! - maintenance mode blocks all non-admin traffic with 503,
//! - invitation mode blocks anonymous traffic with 403.
//!
//! If the settings cannot be loaded the gate fails open; a broken
//! settings table must not take the whole API down with it.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use masthead_core::settings::should_gate;

use crate::middleware::auth::OptionalAuthUser;
use crate::state::AppState;

pub async fn mode_gates(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    request: Request,
    next: Next,
) -> Response {
    let service = state.service.clone();
    let settings = state
        .settings_cache
        .get_or_load(move || async move { service.settings().await })
        .await;

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load site settings; gates fail open");
            return next.run(request).await;
        }
    };

    let role = auth.role();

    if should_gate(settings.maintenance_mode, role) {
        return gate_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "MAINTENANCE",
            "The site is down for maintenance",
        );
    }

    // Invitation mode only keeps out visitors without an account.
    if settings.invitation_mode && role.is_none() {
        return gate_response(
            StatusCode::FORBIDDEN,
            "INVITATION_ONLY",
            "The site is currently invitation-only",
        );
    }

    next.run(request).await
}

fn gate_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}
