//! Rows from the `articles` and `article_versions` tables.

use sqlx::FromRow;

use masthead_core::article::{Article, ArticleVersion};
use masthead_core::error::CoreError;
use masthead_core::status::ArticleStatus;
use masthead_core::types::{DbId, Timestamp};

/// A row from the `articles` table. Status is stored as text and parsed
/// strictly on the way out.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleRow {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub featured_image: Option<String>,
    pub category_id: DbId,
    pub author_id: DbId,
    pub tags: Vec<String>,
    pub status: String,
    pub submitted_at: Option<Timestamp>,
    pub published_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub author_reveal_date: Option<Timestamp>,
    pub views: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ArticleRow {
    /// Convert into the domain entity. A status outside the closed set
    /// means corrupted data and surfaces as an internal error, not a
    /// validation error.
    pub fn into_domain(self) -> Result<Article, CoreError> {
        let status: ArticleStatus = self.status.parse().map_err(|_| {
            CoreError::Internal(format!(
                "article {} has invalid stored status '{}'",
                self.id, self.status
            ))
        })?;
        Ok(Article {
            id: self.id,
            slug: self.slug,
            title: self.title,
            excerpt: self.excerpt,
            body: self.body,
            featured_image: self.featured_image,
            category_id: self.category_id,
            author_id: self.author_id,
            tags: self.tags,
            status,
            submitted_at: self.submitted_at,
            published_at: self.published_at,
            rejection_reason: self.rejection_reason,
            author_reveal_date: self.author_reveal_date,
            views: self.views,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A row from the `article_versions` table.
#[derive(Debug, Clone, FromRow)]
pub struct VersionRow {
    pub id: DbId,
    pub article_id: DbId,
    pub version: i32,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub changed_by: DbId,
    pub change_note: Option<String>,
    pub created_at: Timestamp,
}

impl From<VersionRow> for ArticleVersion {
    fn from(row: VersionRow) -> Self {
        ArticleVersion {
            id: row.id,
            article_id: row.article_id,
            version: row.version,
            title: row.title,
            excerpt: row.excerpt,
            body: row.body,
            changed_by: row.changed_by,
            change_note: row.change_note,
            created_at: row.created_at,
        }
    }
}
