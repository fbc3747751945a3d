//! Repository for the append-only `article_versions` table.
//!
//! Versions are written once and never updated; the unique index on
//! `(article_id, version)` backs the no-gaps numbering invariant.

use sqlx::PgPool;

use masthead_core::article::NewVersion;
use masthead_core::types::DbId;

use crate::models::VersionRow;

const VERSION_COLUMNS: &str = "\
    id, article_id, version, title, excerpt, body, changed_by, change_note, \
    created_at";

pub struct VersionRepo;

impl VersionRepo {
    pub async fn insert(pool: &PgPool, version: &NewVersion) -> Result<VersionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO article_versions \
                (article_id, version, title, excerpt, body, changed_by, change_note) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {VERSION_COLUMNS}"
        );
        sqlx::query_as::<_, VersionRow>(&query)
            .bind(version.article_id)
            .bind(version.version)
            .bind(&version.title)
            .bind(&version.excerpt)
            .bind(&version.body)
            .bind(version.changed_by)
            .bind(&version.change_note)
            .fetch_one(pool)
            .await
    }

    /// History for one article, most recent version first.
    pub async fn list_for_article(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<VersionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {VERSION_COLUMNS} FROM article_versions \
             WHERE article_id = $1 \
             ORDER BY version DESC"
        );
        sqlx::query_as::<_, VersionRow>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        article_id: DbId,
        version_id: DbId,
    ) -> Result<Option<VersionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {VERSION_COLUMNS} FROM article_versions \
             WHERE article_id = $1 AND id = $2"
        );
        sqlx::query_as::<_, VersionRow>(&query)
            .bind(article_id)
            .bind(version_id)
            .fetch_optional(pool)
            .await
    }

    /// Highest version number for an article, 0 when none exist.
    pub async fn max_version(pool: &PgPool, article_id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(version), 0) FROM article_versions WHERE article_id = $1",
        )
        .bind(article_id)
        .fetch_one(pool)
        .await
    }
}
