//! Handlers for article CRUD, the workflow submit action, and view
//! recording.
//!
//! The public read path never serializes the raw [`Article`]: author
//! identity goes through the reveal gate and the rejection reason is
//! only shown to the article's author and to admins.

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use masthead_core::article::{Article, ArticleDraft, ArticleUpdate};
use masthead_core::reveal::{self, AuthorDisplay};
use masthead_core::roles::Role;
use masthead_core::status::ArticleStatus;
use masthead_core::types::{DbId, Timestamp};
use masthead_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub body: String,
    pub featured_image: Option<String>,
    pub category_id: DbId,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Requested initial status name; omitted means draft.
    pub status: Option<String>,
    pub author_reveal_date: Option<Timestamp>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub clear_featured_image: bool,
    pub category_id: Option<DbId>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub author_reveal_date: Option<Timestamp>,
    #[serde(default)]
    pub clear_author_reveal: bool,
    pub change_note: Option<String>,
}

/// An article as served to clients, with authorship behind the reveal
/// gate.
#[derive(Debug, serde::Serialize)]
pub struct ArticleView {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub featured_image: Option<String>,
    pub category_id: DbId,
    pub tags: Vec<String>,
    pub status: ArticleStatus,
    pub submitted_at: Option<Timestamp>,
    pub published_at: Option<Timestamp>,
    /// Only present for the article's author and for admins.
    pub rejection_reason: Option<String>,
    pub author_reveal_date: Option<Timestamp>,
    pub views: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author: AuthorDisplay,
    /// Display name of the author, resolved only once revealed.
    pub author_name: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct ViewRecorded {
    pub counted: bool,
}

/// Parse a status name from a request body into the domain enum.
fn parse_status(status: Option<String>) -> AppResult<Option<ArticleStatus>> {
    status
        .map(|s| ArticleStatus::from_str(&s).map_err(AppError::Core))
        .transpose()
}

/// Build the client-facing view of an article.
///
/// `viewer` determines whether the rejection reason is included.
async fn article_view(
    state: &AppState,
    article: Article,
    viewer: Option<&AuthUser>,
) -> AppResult<ArticleView> {
    let author = reveal::author_display(article.author_id, article.author_reveal_date, Utc::now());

    let author_name = match author.author_id {
        Some(author_id) => UserRepo::find_by_id(&state.pool, author_id)
            .await?
            .map(|user| user.display_name),
        None => None,
    };

    let can_see_moderation = viewer.is_some_and(|user| {
        user.role == Role::Admin || user.user_id == article.author_id
    });
    let rejection_reason = can_see_moderation
        .then_some(article.rejection_reason)
        .flatten();

    Ok(ArticleView {
        id: article.id,
        slug: article.slug,
        title: article.title,
        excerpt: article.excerpt,
        body: article.body,
        featured_image: article.featured_image,
        category_id: article.category_id,
        tags: article.tags,
        status: article.status,
        submitted_at: article.submitted_at,
        published_at: article.published_at,
        rejection_reason,
        author_reveal_date: article.author_reveal_date,
        views: article.views,
        created_at: article.created_at,
        updated_at: article.updated_at,
        author,
        author_name,
    })
}

/// Best-effort viewer address for view deduplication.
///
/// Takes the first hop of `X-Forwarded-For`, falling back to `X-Real-IP`,
/// then to a fixed sentinel so a proxyless deployment still counts one
/// view per article.
fn viewer_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }
    "unknown".to_string()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /articles/{id}
///
/// Fetch a single article with reveal-gated authorship.
pub async fn get_article(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = state.service.get_article(id).await?;
    let view = article_view(&state, article, auth.0.as_ref()).await?;
    Ok(Json(DataResponse::new(view)))
}

/// POST /articles
///
/// Create an article authored by the caller.
pub async fn create_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateArticleRequest>,
) -> AppResult<impl IntoResponse> {
    let draft = ArticleDraft {
        title: input.title,
        excerpt: input.excerpt,
        body: input.body,
        featured_image: input.featured_image,
        category_id: input.category_id,
        tags: input.tags,
        status: parse_status(input.status)?,
        author_reveal_date: input.author_reveal_date,
    };

    let article = state.service.create_article(&auth.actor(), draft).await?;

    tracing::info!(
        user_id = auth.user_id,
        article_id = article.id,
        slug = %article.slug,
        status = %article.status,
        "Article created"
    );

    let view = article_view(&state, article, Some(&auth)).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(view))))
}

/// PUT /articles/{id}
///
/// Update content and/or status. Content changes snapshot the previous
/// revision before the overwrite lands.
pub async fn update_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArticleRequest>,
) -> AppResult<impl IntoResponse> {
    let featured_image = if input.clear_featured_image {
        Some(None)
    } else {
        input.featured_image.map(Some)
    };
    let author_reveal_date = if input.clear_author_reveal {
        Some(None)
    } else {
        input.author_reveal_date.map(Some)
    };

    let update = ArticleUpdate {
        title: input.title,
        excerpt: input.excerpt,
        body: input.body,
        featured_image,
        category_id: input.category_id,
        tags: input.tags,
        status: parse_status(input.status)?,
        author_reveal_date,
        change_note: input.change_note,
    };

    let article = state
        .service
        .update_article(&auth.actor(), id, update)
        .await?;

    tracing::info!(
        user_id = auth.user_id,
        article_id = id,
        status = %article.status,
        "Article updated"
    );

    let view = article_view(&state, article, Some(&auth)).await?;
    Ok(Json(DataResponse::new(view)))
}

/// DELETE /articles/{id}
pub async fn delete_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.service.delete_article(&auth.actor(), id).await?;

    tracing::info!(user_id = auth.user_id, article_id = id, "Article deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /articles/{id}/submit
///
/// Submit a draft or rejected article for review.
pub async fn submit_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = state.service.submit_for_review(&auth.actor(), id).await?;
    let view = article_view(&state, article, Some(&auth)).await?;
    Ok(Json(DataResponse::new(view)))
}

/// POST /articles/{id}/view
///
/// Record one deduplicated view for the calling address.
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let ip = viewer_ip(&headers);
    let counted = state.service.record_view(id, &ip).await?;
    Ok(Json(DataResponse::new(ViewRecorded { counted })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn viewer_ip_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(viewer_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn viewer_ip_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        assert_eq!(viewer_ip(&headers), "198.51.100.4");
    }

    #[test]
    fn viewer_ip_defaults_when_no_headers() {
        assert_eq!(viewer_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn unknown_status_name_is_a_validation_error() {
        let err = parse_status(Some("HALF_DONE".to_string())).unwrap_err();
        assert!(matches!(
            err,
            AppError::Core(masthead_core::error::CoreError::Validation(_))
        ));
    }
}
