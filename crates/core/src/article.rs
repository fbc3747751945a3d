//! Article and article-version domain entities plus the create/update
//! payloads accepted by the editorial service.

use serde::{Deserialize, Serialize};

use crate::status::ArticleStatus;
use crate::types::{DbId, Timestamp};

/// A live article row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: DbId,
    /// Globally unique, derived from the title; stable until the title
    /// changes.
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub featured_image: Option<String>,
    pub category_id: DbId,
    pub author_id: DbId,
    pub tags: Vec<String>,
    pub status: ArticleStatus,
    /// Set each time the article is submitted for review.
    pub submitted_at: Option<Timestamp>,
    /// Set on first publish, preserved on later republishes.
    pub published_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    /// Author identity is withheld until this instant (absent = always
    /// shown).
    pub author_reveal_date: Option<Timestamp>,
    /// Deduplicated per viewer IP over the article's lifetime.
    pub views: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An immutable snapshot of article content taken just before an overwrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleVersion {
    pub id: DbId,
    pub article_id: DbId,
    /// 1-based, strictly increasing within an article, no gaps.
    pub version: i32,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    /// Who made the edit being overwritten.
    pub changed_by: DbId,
    pub change_note: Option<String>,
    pub created_at: Timestamp,
}

/// Payload for creating a new article. Slug and workflow fields are
/// computed by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub body: String,
    pub featured_image: Option<String>,
    pub category_id: DbId,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Requested initial status; subject to the publish downgrade rule.
    pub status: Option<ArticleStatus>,
    pub author_reveal_date: Option<Timestamp>,
}

/// Partial update for an existing article. `None` fields are left alone.
///
/// `author_reveal_date` is double-optional: the outer `None` means
/// "unchanged", `Some(None)` clears the reveal date.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub featured_image: Option<Option<String>>,
    pub category_id: Option<DbId>,
    pub tags: Option<Vec<String>>,
    /// Requested status; subject to the publish downgrade rule.
    pub status: Option<ArticleStatus>,
    pub author_reveal_date: Option<Option<Timestamp>>,
    /// Free-text note attached to the version snapshot this update creates.
    pub change_note: Option<String>,
}

/// Fields the store needs to insert a new article.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub featured_image: Option<String>,
    pub category_id: DbId,
    pub author_id: DbId,
    pub tags: Vec<String>,
    pub status: ArticleStatus,
    pub published_at: Option<Timestamp>,
    pub author_reveal_date: Option<Timestamp>,
}

/// Fields the store needs to append a version snapshot.
#[derive(Debug, Clone)]
pub struct NewVersion {
    pub article_id: DbId,
    pub version: i32,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub changed_by: DbId,
    pub change_note: Option<String>,
}
