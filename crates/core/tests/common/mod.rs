//! In-memory test doubles for the editorial workflow suite.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use masthead_core::article::{Article, ArticleVersion, NewArticle, NewVersion};
use masthead_core::error::CoreError;
use masthead_core::notify::{EditorialEvent, NotificationSink};
use masthead_core::settings::SiteSettings;
use masthead_core::status::ArticleStatus;
use masthead_core::store::{EditorialStore, SettingsUpdate};
use masthead_core::types::DbId;

#[derive(Default)]
struct Inner {
    next_article_id: DbId,
    next_version_id: DbId,
    articles: HashMap<DbId, Article>,
    versions: Vec<ArticleVersion>,
    views: HashSet<(DbId, String)>,
    settings: Option<SiteSettings>,
}

/// A `HashMap`-backed store faithful to the trait contract.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored versions across all articles.
    pub fn version_count(&self) -> usize {
        self.inner.lock().unwrap().versions.len()
    }
}

#[async_trait]
impl EditorialStore for MemoryStore {
    async fn insert_article(&self, article: NewArticle) -> Result<Article, CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_article_id += 1;
        let now = Utc::now();
        let stored = Article {
            id: inner.next_article_id,
            slug: article.slug,
            title: article.title,
            excerpt: article.excerpt,
            body: article.body,
            featured_image: article.featured_image,
            category_id: article.category_id,
            author_id: article.author_id,
            tags: article.tags,
            status: article.status,
            submitted_at: None,
            published_at: article.published_at,
            rejection_reason: None,
            author_reveal_date: article.author_reveal_date,
            views: 0,
            created_at: now,
            updated_at: now,
        };
        inner.articles.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn fetch_article(&self, id: DbId) -> Result<Option<Article>, CoreError> {
        Ok(self.inner.lock().unwrap().articles.get(&id).cloned())
    }

    async fn fetch_article_by_slug(&self, slug: &str) -> Result<Option<Article>, CoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .articles
            .values()
            .find(|a| a.slug == slug)
            .cloned())
    }

    async fn update_article(&self, article: &Article) -> Result<Article, CoreError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.articles.contains_key(&article.id) {
            return Err(CoreError::NotFound {
                entity: "Article",
                id: article.id,
            });
        }
        let mut updated = article.clone();
        updated.updated_at = Utc::now();
        inner.articles.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete_article(&self, id: DbId) -> Result<bool, CoreError> {
        let mut inner = self.inner.lock().unwrap();
        let existed = inner.articles.remove(&id).is_some();
        inner.versions.retain(|v| v.article_id != id);
        Ok(existed)
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<DbId>) -> Result<bool, CoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .articles
            .values()
            .any(|a| a.slug == slug && Some(a.id) != exclude))
    }

    async fn list_pending(&self) -> Result<Vec<Article>, CoreError> {
        let inner = self.inner.lock().unwrap();
        let mut pending: Vec<Article> = inner
            .articles
            .values()
            .filter(|a| a.status == ArticleStatus::PendingReview)
            .cloned()
            .collect();
        // NULLS LAST, matching the Postgres ordering.
        pending.sort_by_key(|a| (a.submitted_at.is_none(), a.submitted_at, a.id));
        Ok(pending)
    }

    async fn record_view(&self, article_id: DbId, viewer_ip: &str) -> Result<bool, CoreError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.views.insert((article_id, viewer_ip.to_string())) {
            return Ok(false);
        }
        if let Some(article) = inner.articles.get_mut(&article_id) {
            article.views += 1;
        }
        Ok(true)
    }

    async fn insert_version(&self, version: NewVersion) -> Result<ArticleVersion, CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_version_id += 1;
        let stored = ArticleVersion {
            id: inner.next_version_id,
            article_id: version.article_id,
            version: version.version,
            title: version.title,
            excerpt: version.excerpt,
            body: version.body,
            changed_by: version.changed_by,
            change_note: version.change_note,
            created_at: Utc::now(),
        };
        inner.versions.push(stored.clone());
        Ok(stored)
    }

    async fn list_versions(&self, article_id: DbId) -> Result<Vec<ArticleVersion>, CoreError> {
        let inner = self.inner.lock().unwrap();
        let mut versions: Vec<ArticleVersion> = inner
            .versions
            .iter()
            .filter(|v| v.article_id == article_id)
            .cloned()
            .collect();
        versions.sort_by_key(|v| std::cmp::Reverse(v.version));
        Ok(versions)
    }

    async fn fetch_version(
        &self,
        article_id: DbId,
        version_id: DbId,
    ) -> Result<Option<ArticleVersion>, CoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .versions
            .iter()
            .find(|v| v.article_id == article_id && v.id == version_id)
            .cloned())
    }

    async fn max_version(&self, article_id: DbId) -> Result<i32, CoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .versions
            .iter()
            .filter(|v| v.article_id == article_id)
            .map(|v| v.version)
            .max()
            .unwrap_or(0))
    }

    async fn fetch_settings(&self) -> Result<SiteSettings, CoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.settings.clone().unwrap_or(SiteSettings {
            maintenance_mode: false,
            invitation_mode: false,
            updated_at: Utc::now(),
        }))
    }

    async fn update_settings(&self, update: SettingsUpdate) -> Result<SiteSettings, CoreError> {
        let mut inner = self.inner.lock().unwrap();
        let settings = SiteSettings {
            maintenance_mode: update.maintenance_mode,
            invitation_mode: update.invitation_mode,
            updated_at: Utc::now(),
        };
        inner.settings = Some(settings.clone());
        Ok(settings)
    }
}

/// A sink that remembers everything it was asked to deliver.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<EditorialEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<EditorialEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, event: EditorialEvent) {
        self.events.lock().unwrap().push(event);
    }
}
