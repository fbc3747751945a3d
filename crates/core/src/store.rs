//! Storage seam for the editorial service.
//!
//! The core depends on plain keyed CRUD plus a slug-uniqueness read; it
//! knows nothing about SQL. `masthead-db` implements this trait over
//! Postgres; the workflow integration tests implement it in memory.

use async_trait::async_trait;

use crate::article::{Article, ArticleVersion, NewArticle, NewVersion};
use crate::error::CoreError;
use crate::settings::SiteSettings;
use crate::types::DbId;

/// Fields the store needs to update the settings record.
#[derive(Debug, Clone, Copy)]
pub struct SettingsUpdate {
    pub maintenance_mode: bool,
    pub invitation_mode: bool,
}

#[async_trait]
pub trait EditorialStore: Send + Sync {
    // -- Articles --

    async fn insert_article(&self, article: NewArticle) -> Result<Article, CoreError>;

    async fn fetch_article(&self, id: DbId) -> Result<Option<Article>, CoreError>;

    async fn fetch_article_by_slug(&self, slug: &str) -> Result<Option<Article>, CoreError>;

    /// Persist every mutable field of `article` (content, slug, tags, and
    /// workflow fields). The store refreshes `updated_at`.
    async fn update_article(&self, article: &Article) -> Result<Article, CoreError>;

    /// Hard delete. Returns false when the row did not exist.
    async fn delete_article(&self, id: DbId) -> Result<bool, CoreError>;

    /// Uniqueness read for slug collision avoidance. `exclude` skips the
    /// article's own row during regeneration.
    async fn slug_exists(&self, slug: &str, exclude: Option<DbId>) -> Result<bool, CoreError>;

    /// Articles awaiting review, oldest submission first.
    async fn list_pending(&self) -> Result<Vec<Article>, CoreError>;

    /// Record one view for this viewer IP. Returns true (and bumps the
    /// counter) only the first time this IP views this article.
    async fn record_view(&self, article_id: DbId, viewer_ip: &str) -> Result<bool, CoreError>;

    // -- Versions --

    async fn insert_version(&self, version: NewVersion) -> Result<ArticleVersion, CoreError>;

    /// Version history, most recent first.
    async fn list_versions(&self, article_id: DbId) -> Result<Vec<ArticleVersion>, CoreError>;

    async fn fetch_version(
        &self,
        article_id: DbId,
        version_id: DbId,
    ) -> Result<Option<ArticleVersion>, CoreError>;

    /// Highest version number for an article, 0 when none exist.
    async fn max_version(&self, article_id: DbId) -> Result<i32, CoreError>;

    // -- Settings --

    async fn fetch_settings(&self) -> Result<SiteSettings, CoreError>;

    async fn update_settings(&self, update: SettingsUpdate) -> Result<SiteSettings, CoreError>;
}
