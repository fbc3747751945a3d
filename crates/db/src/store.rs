//! Postgres implementation of the core storage trait.
//!
//! Thin adapter: each method delegates to a repository and converts rows
//! into domain entities. Constraint violations map to the matching domain
//! errors; any other storage failure surfaces as [`CoreError::Internal`]
//! after being logged. The editorial service never sees `sqlx` types.

use async_trait::async_trait;
use sqlx::PgPool;

use masthead_core::article::{Article, ArticleVersion, NewArticle, NewVersion};
use masthead_core::error::CoreError;
use masthead_core::settings::SiteSettings;
use masthead_core::store::{EditorialStore, SettingsUpdate};
use masthead_core::types::DbId;

use crate::repositories::{ArticleRepo, SettingsRepo, VersionRepo};

#[derive(Clone)]
pub struct PgEditorialStore {
    pool: PgPool,
}

impl PgEditorialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Convert a storage failure into a domain error.
///
/// Constraint violations carry meaning for callers: a unique violation on
/// a `uq_` index is a write race losing to a concurrent duplicate, and a
/// foreign key violation means the request referenced a row that does not
/// exist. Everything else is logged and collapsed to an opaque internal
/// error.
fn storage_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        match db_err.code().as_deref() {
            Some("23505") if constraint.starts_with("uq_") => {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
            Some("23503") => {
                return CoreError::Validation(format!(
                    "Referenced row does not exist ({constraint})"
                ));
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Storage error");
    CoreError::Internal("storage failure".to_string())
}

#[async_trait]
impl EditorialStore for PgEditorialStore {
    async fn insert_article(&self, article: NewArticle) -> Result<Article, CoreError> {
        ArticleRepo::insert(&self.pool, &article)
            .await
            .map_err(storage_error)?
            .into_domain()
    }

    async fn fetch_article(&self, id: DbId) -> Result<Option<Article>, CoreError> {
        ArticleRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?
            .map(|row| row.into_domain())
            .transpose()
    }

    async fn fetch_article_by_slug(&self, slug: &str) -> Result<Option<Article>, CoreError> {
        ArticleRepo::find_by_slug(&self.pool, slug)
            .await
            .map_err(storage_error)?
            .map(|row| row.into_domain())
            .transpose()
    }

    async fn update_article(&self, article: &Article) -> Result<Article, CoreError> {
        ArticleRepo::update(&self.pool, article)
            .await
            .map_err(storage_error)?
            .into_domain()
    }

    async fn delete_article(&self, id: DbId) -> Result<bool, CoreError> {
        ArticleRepo::delete(&self.pool, id)
            .await
            .map_err(storage_error)
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<DbId>) -> Result<bool, CoreError> {
        ArticleRepo::slug_exists(&self.pool, slug, exclude)
            .await
            .map_err(storage_error)
    }

    async fn list_pending(&self) -> Result<Vec<Article>, CoreError> {
        ArticleRepo::list_pending(&self.pool)
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(|row| row.into_domain())
            .collect()
    }

    async fn record_view(&self, article_id: DbId, viewer_ip: &str) -> Result<bool, CoreError> {
        ArticleRepo::record_view(&self.pool, article_id, viewer_ip)
            .await
            .map_err(storage_error)
    }

    async fn insert_version(&self, version: NewVersion) -> Result<ArticleVersion, CoreError> {
        VersionRepo::insert(&self.pool, &version)
            .await
            .map(Into::into)
            .map_err(storage_error)
    }

    async fn list_versions(&self, article_id: DbId) -> Result<Vec<ArticleVersion>, CoreError> {
        Ok(VersionRepo::list_for_article(&self.pool, article_id)
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn fetch_version(
        &self,
        article_id: DbId,
        version_id: DbId,
    ) -> Result<Option<ArticleVersion>, CoreError> {
        Ok(VersionRepo::find_by_id(&self.pool, article_id, version_id)
            .await
            .map_err(storage_error)?
            .map(Into::into))
    }

    async fn max_version(&self, article_id: DbId) -> Result<i32, CoreError> {
        VersionRepo::max_version(&self.pool, article_id)
            .await
            .map_err(storage_error)
    }

    async fn fetch_settings(&self) -> Result<SiteSettings, CoreError> {
        SettingsRepo::get(&self.pool)
            .await
            .map(Into::into)
            .map_err(storage_error)
    }

    async fn update_settings(&self, update: SettingsUpdate) -> Result<SiteSettings, CoreError> {
        SettingsRepo::update(&self.pool, update.maintenance_mode, update.invitation_mode)
            .await
            .map(Into::into)
            .map_err(storage_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use assert_matches::assert_matches;

    #[derive(Debug)]
    struct ConstraintViolation {
        code: &'static str,
        constraint: &'static str,
    }

    impl fmt::Display for ConstraintViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "constraint {} violated", self.constraint)
        }
    }

    impl StdError for ConstraintViolation {}

    impl sqlx::error::DatabaseError for ConstraintViolation {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.code {
                "23505" => sqlx::error::ErrorKind::UniqueViolation,
                "23503" => sqlx::error::ErrorKind::ForeignKeyViolation,
                _ => sqlx::error::ErrorKind::Other,
            }
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    fn db_error(code: &'static str, constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintViolation { code, constraint }))
    }

    #[test]
    fn duplicate_slug_surfaces_as_conflict() {
        let err = storage_error(db_error("23505", "uq_articles_slug"));
        assert_matches!(err, CoreError::Conflict(msg) if msg.contains("uq_articles_slug"));
    }

    #[test]
    fn missing_referenced_row_surfaces_as_validation() {
        let err = storage_error(db_error("23503", "articles_category_id_fkey"));
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("category"));
    }

    #[test]
    fn other_database_errors_stay_internal() {
        assert_matches!(
            storage_error(db_error("57014", "unknown")),
            CoreError::Internal(_)
        );
        assert_matches!(storage_error(sqlx::Error::RowNotFound), CoreError::Internal(_));
    }
}
