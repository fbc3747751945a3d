//! The editorial service: orchestration of the state machine, version
//! store, review queue, and slug handling over an [`EditorialStore`].
//!
//! Ordering invariant: on every content-changing update the pre-update
//! content is snapshotted *before* the overwrite is persisted, so no edit
//! ever loses the text it replaced. This is the only ordering the core
//! relies on; concurrent edits of the same article are last-write-wins.

use std::sync::Arc;

use chrono::Utc;

use crate::article::{Article, ArticleDraft, ArticleUpdate, ArticleVersion, NewArticle, NewVersion};
use crate::error::CoreError;
use crate::notify::{EditorialEvent, NotificationSink};
use crate::roles::{Actor, Role};
use crate::settings::SiteSettings;
use crate::slug::slugify;
use crate::status::ArticleStatus;
use crate::store::{EditorialStore, SettingsUpdate};
use crate::types::DbId;
use crate::workflow::{self, TransitionEventKind};

pub struct EditorialService<S> {
    store: S,
    notifier: Arc<dyn NotificationSink>,
}

impl<S: EditorialStore> EditorialService<S> {
    pub fn new(store: S, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { store, notifier }
    }

    /// Direct access to the underlying store (settings gates, health).
    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Articles
    // -----------------------------------------------------------------------

    /// Create a new article authored by the acting user.
    ///
    /// The initial status honours the downgrade rule: only admins can enter
    /// the world already `PUBLISHED`.
    pub async fn create_article(
        &self,
        actor: &Actor,
        draft: ArticleDraft,
    ) -> Result<Article, CoreError> {
        if draft.title.trim().is_empty() {
            return Err(CoreError::Validation("Title is required".to_string()));
        }
        if draft.category_id <= 0 {
            return Err(CoreError::Validation("Category is required".to_string()));
        }
        let base = slugify(&draft.title);
        if base.is_empty() {
            return Err(CoreError::Validation(
                "Title must contain at least one letter or digit".to_string(),
            ));
        }

        let status = workflow::initial_status(actor.role, draft.status.unwrap_or(ArticleStatus::Draft))?;
        let slug = self.unique_slug(&base, None).await?;
        let published_at = (status == ArticleStatus::Published).then(Utc::now);

        self.store
            .insert_article(NewArticle {
                slug,
                title: draft.title,
                excerpt: draft.excerpt,
                body: draft.body,
                featured_image: draft.featured_image,
                category_id: draft.category_id,
                author_id: actor.id,
                tags: draft.tags,
                status,
                published_at,
                author_reveal_date: draft.author_reveal_date,
            })
            .await
    }

    pub async fn get_article(&self, id: DbId) -> Result<Article, CoreError> {
        self.store
            .fetch_article(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Article",
                id,
            })
    }

    pub async fn get_article_by_slug(&self, slug: &str) -> Result<Option<Article>, CoreError> {
        self.store.fetch_article_by_slug(slug).await
    }

    /// Update content and/or status of an existing article.
    ///
    /// Runs the full snapshot-then-apply sequence: authorization, the
    /// status transition when one was requested (including the publish
    /// downgrade), a version snapshot of the pre-update content when it
    /// changed, slug regeneration when the normalized title moved away
    /// from the stored slug, then a single persisted write.
    pub async fn update_article(
        &self,
        actor: &Actor,
        id: DbId,
        update: ArticleUpdate,
    ) -> Result<Article, CoreError> {
        let mut article = self.get_article(id).await?;
        workflow::authorize_mutation(Some(actor), article.author_id)?;

        // Everything that can fail is checked before the snapshot so a
        // rejected update leaves no version behind.
        let new_slug = match &update.title {
            Some(title) => {
                if title.trim().is_empty() {
                    return Err(CoreError::Validation("Title must not be empty".to_string()));
                }
                let base = slugify(title);
                if base.is_empty() {
                    return Err(CoreError::Validation(
                        "Title must contain at least one letter or digit".to_string(),
                    ));
                }
                if base != article.slug {
                    Some(self.unique_slug(&base, Some(article.id)).await?)
                } else {
                    None
                }
            }
            None => None,
        };

        // Only an explicit status request goes through the state machine
        // (and its publish downgrade). A payload without one is a plain
        // content save that keeps every workflow field, including a
        // published status on a non-admin author's own article.
        let effects = match update.status {
            Some(requested) => {
                workflow::apply_transition(&article, actor, requested, None, Utc::now())?
            }
            None => workflow::TransitionEffects::keep(&article),
        };

        let content_changed = update.title.as_ref().is_some_and(|t| *t != article.title)
            || update.excerpt.as_ref().is_some_and(|e| *e != article.excerpt)
            || update.body.as_ref().is_some_and(|b| *b != article.body);

        if content_changed {
            self.snapshot(&article, actor.id, update.change_note.clone())
                .await?;
        }

        if let Some(title) = update.title {
            article.title = title;
        }
        if let Some(slug) = new_slug {
            article.slug = slug;
        }
        if let Some(excerpt) = update.excerpt {
            article.excerpt = excerpt;
        }
        if let Some(body) = update.body {
            article.body = body;
        }
        if let Some(featured_image) = update.featured_image {
            article.featured_image = featured_image;
        }
        if let Some(category_id) = update.category_id {
            article.category_id = category_id;
        }
        if let Some(tags) = update.tags {
            article.tags = tags;
        }
        if let Some(reveal) = update.author_reveal_date {
            article.author_reveal_date = reveal;
        }

        article.status = effects.status;
        article.submitted_at = effects.submitted_at;
        article.published_at = effects.published_at;
        article.rejection_reason = effects.rejection_reason.clone();

        let article = self.store.update_article(&article).await?;
        self.emit(effects.event, &article).await;
        Ok(article)
    }

    /// Hard delete. Admins may delete anything; an author only their own
    /// article, and only while it is still a draft.
    pub async fn delete_article(&self, actor: &Actor, id: DbId) -> Result<(), CoreError> {
        let article = self.get_article(id).await?;
        workflow::authorize_mutation(Some(actor), article.author_id)?;

        match actor.role {
            Role::Admin => {}
            Role::Writer | Role::Poet => {
                if article.status != ArticleStatus::Draft {
                    return Err(CoreError::Forbidden(
                        "Only draft articles can be deleted by their author".to_string(),
                    ));
                }
            }
        }

        self.store.delete_article(id).await?;
        Ok(())
    }

    /// Record one deduplicated view. Returns true when the view counted.
    pub async fn record_view(&self, id: DbId, viewer_ip: &str) -> Result<bool, CoreError> {
        // Existence check first so unknown ids surface as 404, not a
        // silent no-op.
        self.get_article(id).await?;
        self.store.record_view(id, viewer_ip).await
    }

    // -----------------------------------------------------------------------
    // Workflow transitions
    // -----------------------------------------------------------------------

    /// Draft/Rejected -> PendingReview, by the article's own author.
    pub async fn submit_for_review(&self, actor: &Actor, id: DbId) -> Result<Article, CoreError> {
        self.transition(actor, id, ArticleStatus::PendingReview, None)
            .await
    }

    /// PendingReview -> Published, by an admin.
    pub async fn approve(&self, actor: &Actor, id: DbId) -> Result<Article, CoreError> {
        self.transition(actor, id, ArticleStatus::Published, None)
            .await
    }

    /// PendingReview -> Rejected, by an admin, with a mandatory reason.
    pub async fn reject(
        &self,
        actor: &Actor,
        id: DbId,
        reason: &str,
    ) -> Result<Article, CoreError> {
        // Checked before the state machine runs: an empty reason must not
        // touch the queue entry.
        if reason.trim().is_empty() {
            return Err(CoreError::Validation(
                "A rejection reason is required".to_string(),
            ));
        }
        self.transition(actor, id, ArticleStatus::Rejected, Some(reason))
            .await
    }

    /// Any -> Archived, admin only.
    pub async fn archive(&self, actor: &Actor, id: DbId) -> Result<Article, CoreError> {
        self.transition(actor, id, ArticleStatus::Archived, None)
            .await
    }

    /// Articles awaiting review, oldest submission first. Admin only.
    pub async fn review_queue(&self, actor: &Actor) -> Result<Vec<Article>, CoreError> {
        match actor.role {
            Role::Admin => self.store.list_pending().await,
            Role::Writer | Role::Poet => Err(CoreError::Forbidden(
                "Only admins may view the review queue".to_string(),
            )),
        }
    }

    async fn transition(
        &self,
        actor: &Actor,
        id: DbId,
        requested: ArticleStatus,
        reason: Option<&str>,
    ) -> Result<Article, CoreError> {
        let mut article = self.get_article(id).await?;
        let effects = workflow::apply_transition(&article, actor, requested, reason, Utc::now())?;

        article.status = effects.status;
        article.submitted_at = effects.submitted_at;
        article.published_at = effects.published_at;
        article.rejection_reason = effects.rejection_reason.clone();

        let article = self.store.update_article(&article).await?;
        self.emit(effects.event, &article).await;
        Ok(article)
    }

    // -----------------------------------------------------------------------
    // Versions
    // -----------------------------------------------------------------------

    /// Version history, most recent first. Admin or the article's author.
    pub async fn versions(
        &self,
        actor: &Actor,
        article_id: DbId,
    ) -> Result<Vec<ArticleVersion>, CoreError> {
        let article = self.get_article(article_id).await?;
        workflow::authorize_mutation(Some(actor), article.author_id)?;
        self.store.list_versions(article_id).await
    }

    /// Copy a stored version's content back onto the live article.
    ///
    /// The current content is snapshotted first so the restore itself can
    /// be undone. Status, slug, and the other workflow fields are left
    /// untouched.
    pub async fn restore_version(
        &self,
        actor: &Actor,
        article_id: DbId,
        version_id: DbId,
    ) -> Result<Article, CoreError> {
        let mut article = self.get_article(article_id).await?;
        workflow::authorize_mutation(Some(actor), article.author_id)?;

        let version = self
            .store
            .fetch_version(article_id, version_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "ArticleVersion",
                id: version_id,
            })?;

        self.snapshot(
            &article,
            actor.id,
            Some(format!("Before restoring version {}", version.version)),
        )
        .await?;

        article.title = version.title;
        article.excerpt = version.excerpt;
        article.body = version.body;

        self.store.update_article(&article).await
    }

    /// Append a snapshot of the article's current content as the next
    /// sequential version.
    async fn snapshot(
        &self,
        article: &Article,
        changed_by: DbId,
        change_note: Option<String>,
    ) -> Result<ArticleVersion, CoreError> {
        let next = self.store.max_version(article.id).await? + 1;
        self.store
            .insert_version(NewVersion {
                article_id: article.id,
                version: next,
                title: article.title.clone(),
                excerpt: article.excerpt.clone(),
                body: article.body.clone(),
                changed_by,
                change_note,
            })
            .await
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    pub async fn settings(&self) -> Result<SiteSettings, CoreError> {
        self.store.fetch_settings().await
    }

    /// Update the settings record. Admin only; callers must invalidate
    /// their settings cache afterwards.
    pub async fn update_settings(
        &self,
        actor: &Actor,
        update: SettingsUpdate,
    ) -> Result<SiteSettings, CoreError> {
        match actor.role {
            Role::Admin => self.store.update_settings(update).await,
            Role::Writer | Role::Poet => Err(CoreError::Forbidden(
                "Only admins may change site settings".to_string(),
            )),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Find the first free slug: `base`, `base-1`, `base-2`, ...
    async fn unique_slug(&self, base: &str, exclude: Option<DbId>) -> Result<String, CoreError> {
        if !self.store.slug_exists(base, exclude).await? {
            return Ok(base.to_string());
        }
        let mut suffix = 1u32;
        loop {
            let candidate = format!("{base}-{suffix}");
            if !self.store.slug_exists(&candidate, exclude).await? {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }

    async fn emit(&self, kind: Option<TransitionEventKind>, article: &Article) {
        let Some(kind) = kind else { return };
        let event = match kind {
            TransitionEventKind::SubmittedForReview => EditorialEvent::SubmittedForReview {
                article_id: article.id,
                title: article.title.clone(),
                author_id: article.author_id,
                submitted_at: article.submitted_at.unwrap_or_else(Utc::now),
            },
            TransitionEventKind::Published => EditorialEvent::Published {
                article_id: article.id,
                title: article.title.clone(),
                author_id: article.author_id,
            },
            TransitionEventKind::Rejected => EditorialEvent::Rejected {
                article_id: article.id,
                title: article.title.clone(),
                author_id: article.author_id,
                reason: article.rejection_reason.clone().unwrap_or_default(),
            },
        };
        self.notifier.deliver(event).await;
    }
}
