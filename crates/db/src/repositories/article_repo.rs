//! Repository for the `articles` and `article_views` tables.

use sqlx::PgPool;

use masthead_core::article::{Article, NewArticle};
use masthead_core::types::DbId;

use crate::models::ArticleRow;

const ARTICLE_COLUMNS: &str = "\
    id, slug, title, excerpt, body, featured_image, category_id, author_id, \
    tags, status, submitted_at, published_at, rejection_reason, \
    author_reveal_date, views, created_at, updated_at";

/// CRUD operations for articles plus the deduplicated view counter.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article. Workflow timestamps start empty except
    /// `published_at`, which is set for admin direct publishes.
    pub async fn insert(pool: &PgPool, article: &NewArticle) -> Result<ArticleRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles \
                (slug, title, excerpt, body, featured_image, category_id, \
                 author_id, tags, status, published_at, author_reveal_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {ARTICLE_COLUMNS}"
        );
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(&article.slug)
            .bind(&article.title)
            .bind(&article.excerpt)
            .bind(&article.body)
            .bind(&article.featured_image)
            .bind(article.category_id)
            .bind(article.author_id)
            .bind(&article.tags)
            .bind(article.status.as_str())
            .bind(article.published_at)
            .bind(article.author_reveal_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ArticleRow>, sqlx::Error> {
        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ArticleRow>, sqlx::Error> {
        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1");
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Persist every mutable field of the article in one write.
    pub async fn update(pool: &PgPool, article: &Article) -> Result<ArticleRow, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET \
                slug = $2, title = $3, excerpt = $4, body = $5, \
                featured_image = $6, category_id = $7, tags = $8, \
                status = $9, submitted_at = $10, published_at = $11, \
                rejection_reason = $12, author_reveal_date = $13, \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {ARTICLE_COLUMNS}"
        );
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(article.id)
            .bind(&article.slug)
            .bind(&article.title)
            .bind(&article.excerpt)
            .bind(&article.body)
            .bind(&article.featured_image)
            .bind(article.category_id)
            .bind(&article.tags)
            .bind(article.status.as_str())
            .bind(article.submitted_at)
            .bind(article.published_at)
            .bind(&article.rejection_reason)
            .bind(article.author_reveal_date)
            .fetch_one(pool)
            .await
    }

    /// Hard delete; versions and view records cascade. Returns false when
    /// the row did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Uniqueness probe for the slug collision search. `exclude` skips the
    /// article's own row during regeneration.
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS( \
                SELECT 1 FROM articles \
                WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(pool)
        .await
    }

    /// Articles awaiting review, oldest submission first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<ArticleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             WHERE status = 'PENDING_REVIEW' \
             ORDER BY submitted_at ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, ArticleRow>(&query).fetch_all(pool).await
    }

    /// Record one view per viewer IP per article. The counter bumps only
    /// when the (article, ip) pair is new; returns whether it counted.
    pub async fn record_view(
        pool: &PgPool,
        article_id: DbId,
        viewer_ip: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "WITH ins AS ( \
                INSERT INTO article_views (article_id, viewer_ip) \
                VALUES ($1, $2) \
                ON CONFLICT DO NOTHING \
                RETURNING 1) \
             UPDATE articles SET views = views + 1 \
             WHERE id = $1 AND EXISTS (SELECT 1 FROM ins)",
        )
        .bind(article_id)
        .bind(viewer_ip)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
