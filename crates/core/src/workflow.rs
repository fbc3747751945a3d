//! The article editorial state machine.
//!
//! All transition legality lives in [`can_transition`]; all status writes
//! flow through [`apply_transition`]. No other code path may touch
//! `Article::status`. Permission sites match exhaustively on [`Role`] so a
//! new role cannot slip past review.

use crate::article::Article;
use crate::error::CoreError;
use crate::roles::{Actor, Role};
use crate::status::ArticleStatus;
use crate::types::Timestamp;

/// Notification kind emitted by a transition, delivered by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEventKind {
    /// Draft/Rejected -> PendingReview; reviewers are notified.
    SubmittedForReview,
    /// PendingReview -> Published; the author is notified.
    Published,
    /// PendingReview -> Rejected; the author is notified.
    Rejected,
}

/// New values for the workflow fields computed by [`apply_transition`].
///
/// Content fields are untouched by transitions; the service applies these
/// on top of whatever content edit triggered the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEffects {
    pub status: ArticleStatus,
    pub submitted_at: Option<Timestamp>,
    pub published_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub event: Option<TransitionEventKind>,
}

impl TransitionEffects {
    /// Effects of a plain save: every workflow field keeps its value.
    pub fn keep(article: &Article) -> Self {
        Self {
            status: article.status,
            submitted_at: article.submitted_at,
            published_at: article.published_at,
            rejection_reason: article.rejection_reason.clone(),
            event: None,
        }
    }
}

/// The downgrade rule: a non-privileged actor asking for `PUBLISHED` gets
/// `DRAFT` instead, silently. Admin requests pass through untouched.
pub fn downgrade_published(role: Role, requested: ArticleStatus) -> ArticleStatus {
    match role {
        Role::Admin => requested,
        Role::Writer | Role::Poet => {
            if requested == ArticleStatus::Published {
                ArticleStatus::Draft
            } else {
                requested
            }
        }
    }
}

/// Resolve the status a brand-new article is created with.
///
/// Only `DRAFT` and (admin-only) `PUBLISHED` are legal entry points; the
/// downgrade rule applies first, so a writer asking for `PUBLISHED` simply
/// gets a draft.
pub fn initial_status(role: Role, requested: ArticleStatus) -> Result<ArticleStatus, CoreError> {
    match downgrade_published(role, requested) {
        s @ (ArticleStatus::Draft | ArticleStatus::Published) => Ok(s),
        other => Err(CoreError::Validation(format!(
            "New articles cannot be created with status {other}"
        ))),
    }
}

/// Require an authenticated actor with rights over the given article.
///
/// Admins may act on any article; writers and poets only on their own.
pub fn authorize_mutation(actor: Option<&Actor>, author_id: i64) -> Result<(), CoreError> {
    let actor =
        actor.ok_or_else(|| CoreError::Unauthorized("Authentication required".to_string()))?;
    match actor.role {
        Role::Admin => Ok(()),
        Role::Writer | Role::Poet => {
            if actor.id == author_id {
                Ok(())
            } else {
                Err(CoreError::Forbidden(
                    "You may only modify your own articles".to_string(),
                ))
            }
        }
    }
}

/// The transition table.
///
/// | from              | to             | allowed                    |
/// |-------------------|----------------|----------------------------|
/// | Draft, Rejected   | PendingReview  | the article's own author   |
/// | PendingReview     | Published      | admin                      |
/// | PendingReview     | Rejected       | admin                      |
/// | any               | Draft          | admin or own author        |
/// | any               | Published      | admin                      |
/// | any               | Archived       | admin                      |
/// | x                 | x (no change)  | any authorized actor       |
pub fn can_transition(
    role: Role,
    is_owner: bool,
    from: ArticleStatus,
    to: ArticleStatus,
) -> bool {
    use ArticleStatus::*;

    if from == to {
        // A save that keeps the current status is not a transition.
        return true;
    }

    match (to, role) {
        (PendingReview, Role::Admin | Role::Writer | Role::Poet) => {
            is_owner && matches!(from, Draft | Rejected)
        }
        (Published, Role::Admin) => true,
        (Published, Role::Writer | Role::Poet) => false,
        (Rejected, Role::Admin) => from == PendingReview,
        (Rejected, Role::Writer | Role::Poet) => false,
        (Draft, Role::Admin) => true,
        (Draft, Role::Writer | Role::Poet) => is_owner,
        (Archived, Role::Admin) => true,
        (Archived, Role::Writer | Role::Poet) => false,
    }
}

/// The single entry point for status changes.
///
/// Validates authorization and legality, then returns the new workflow
/// field values plus the notification to emit. Pure: the caller persists
/// the effects and delivers the event.
///
/// `rejection_reason` is only consulted for transitions into `REJECTED`,
/// where it must be non-empty.
pub fn apply_transition(
    article: &Article,
    actor: &Actor,
    requested: ArticleStatus,
    rejection_reason: Option<&str>,
    now: Timestamp,
) -> Result<TransitionEffects, CoreError> {
    authorize_mutation(Some(actor), article.author_id)?;

    let target = downgrade_published(actor.role, requested);
    let is_owner = actor.id == article.author_id;

    if !can_transition(actor.role, is_owner, article.status, target) {
        return Err(CoreError::Forbidden(format!(
            "{} may not move an article from {} to {}",
            actor.role, article.status, target
        )));
    }

    let mut effects = TransitionEffects::keep(article);
    if target == article.status {
        return Ok(effects);
    }
    effects.status = target;

    match target {
        ArticleStatus::PendingReview => {
            effects.submitted_at = Some(now);
            // A resubmit clears the stale reason from the previous review.
            effects.rejection_reason = None;
            effects.event = Some(TransitionEventKind::SubmittedForReview);
        }
        ArticleStatus::Published => {
            // First publish stamps the date; later republishes keep it.
            effects.published_at = article.published_at.or(Some(now));
            if article.status == ArticleStatus::PendingReview {
                effects.event = Some(TransitionEventKind::Published);
            }
        }
        ArticleStatus::Rejected => {
            let reason = rejection_reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or_else(|| {
                    CoreError::Validation("A rejection reason is required".to_string())
                })?;
            effects.rejection_reason = Some(reason.to_string());
            effects.event = Some(TransitionEventKind::Rejected);
        }
        ArticleStatus::Draft | ArticleStatus::Archived => {}
    }

    Ok(effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 2, 10, 8, 0, 0).unwrap()
    }

    fn article(status: ArticleStatus, author_id: i64) -> Article {
        Article {
            id: 1,
            slug: "gece".to_string(),
            title: "Gece".to_string(),
            excerpt: "a poem".to_string(),
            body: "<p>...</p>".to_string(),
            featured_image: None,
            category_id: 10,
            author_id,
            tags: vec![],
            status,
            submitted_at: None,
            published_at: None,
            rejection_reason: None,
            author_reveal_date: None,
            views: 0,
            created_at: now(),
            updated_at: now(),
        }
    }

    const WRITER: Actor = Actor { id: 7, role: Role::Writer };
    const POET: Actor = Actor { id: 8, role: Role::Poet };
    const ADMIN: Actor = Actor { id: 1, role: Role::Admin };

    #[test]
    fn downgrade_applies_to_non_admin_roles_only() {
        assert_eq!(
            downgrade_published(Role::Writer, ArticleStatus::Published),
            ArticleStatus::Draft
        );
        assert_eq!(
            downgrade_published(Role::Poet, ArticleStatus::Published),
            ArticleStatus::Draft
        );
        assert_eq!(
            downgrade_published(Role::Admin, ArticleStatus::Published),
            ArticleStatus::Published
        );
        assert_eq!(
            downgrade_published(Role::Writer, ArticleStatus::Draft),
            ArticleStatus::Draft
        );
    }

    #[test]
    fn initial_status_allows_draft_for_everyone() {
        assert_eq!(
            initial_status(Role::Writer, ArticleStatus::Draft).unwrap(),
            ArticleStatus::Draft
        );
    }

    #[test]
    fn initial_status_downgrades_writer_publish_request() {
        assert_eq!(
            initial_status(Role::Writer, ArticleStatus::Published).unwrap(),
            ArticleStatus::Draft
        );
    }

    #[test]
    fn initial_status_allows_admin_direct_publish() {
        assert_eq!(
            initial_status(Role::Admin, ArticleStatus::Published).unwrap(),
            ArticleStatus::Published
        );
    }

    #[test]
    fn initial_status_rejects_other_entry_points() {
        assert!(initial_status(Role::Admin, ArticleStatus::PendingReview).is_err());
        assert!(initial_status(Role::Writer, ArticleStatus::Archived).is_err());
    }

    #[test]
    fn owner_may_submit_draft_and_rejected_only() {
        use ArticleStatus::*;
        assert!(can_transition(Role::Writer, true, Draft, PendingReview));
        assert!(can_transition(Role::Poet, true, Rejected, PendingReview));
        assert!(!can_transition(Role::Writer, true, Published, PendingReview));
        assert!(!can_transition(Role::Writer, false, Draft, PendingReview));
        // Admins submit their own articles like anyone else, not others'.
        assert!(can_transition(Role::Admin, true, Draft, PendingReview));
        assert!(!can_transition(Role::Admin, false, Draft, PendingReview));
    }

    #[test]
    fn only_admin_reaches_published_rejected_archived() {
        use ArticleStatus::*;
        for from in ArticleStatus::ALL {
            assert!(!can_transition(Role::Writer, true, from, Published) || from == Published);
            assert!(!can_transition(Role::Poet, true, from, Archived) || from == Archived);
        }
        assert!(can_transition(Role::Admin, false, PendingReview, Published));
        assert!(can_transition(Role::Admin, false, PendingReview, Rejected));
        assert!(can_transition(Role::Admin, false, Draft, Archived));
        assert!(!can_transition(Role::Admin, false, Draft, Rejected));
    }

    #[test]
    fn same_status_save_is_always_permitted() {
        for status in ArticleStatus::ALL {
            assert!(can_transition(Role::Writer, true, status, status));
            assert!(can_transition(Role::Admin, false, status, status));
        }
    }

    #[test]
    fn submit_sets_submitted_at_and_clears_reason() {
        let mut art = article(ArticleStatus::Rejected, WRITER.id);
        art.rejection_reason = Some("needs more detail".to_string());

        let fx =
            apply_transition(&art, &WRITER, ArticleStatus::PendingReview, None, now()).unwrap();
        assert_eq!(fx.status, ArticleStatus::PendingReview);
        assert_eq!(fx.submitted_at, Some(now()));
        assert_eq!(fx.rejection_reason, None);
        assert_eq!(fx.event, Some(TransitionEventKind::SubmittedForReview));
    }

    #[test]
    fn approve_stamps_published_at_once() {
        let mut art = article(ArticleStatus::PendingReview, WRITER.id);
        let fx = apply_transition(&art, &ADMIN, ArticleStatus::Published, None, now()).unwrap();
        assert_eq!(fx.published_at, Some(now()));
        assert_eq!(fx.event, Some(TransitionEventKind::Published));

        // A later republish preserves the original date.
        let first_publish = now() - Duration::days(30);
        art.status = ArticleStatus::Draft;
        art.published_at = Some(first_publish);
        let fx = apply_transition(&art, &ADMIN, ArticleStatus::Published, None, now()).unwrap();
        assert_eq!(fx.published_at, Some(first_publish));
        // Direct edit to published, not an approval: no author notification.
        assert_eq!(fx.event, None);
    }

    #[test]
    fn reject_requires_a_reason() {
        let art = article(ArticleStatus::PendingReview, WRITER.id);
        let err =
            apply_transition(&art, &ADMIN, ArticleStatus::Rejected, None, now()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = apply_transition(&art, &ADMIN, ArticleStatus::Rejected, Some("  "), now())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn reject_records_the_reason() {
        let art = article(ArticleStatus::PendingReview, POET.id);
        let fx = apply_transition(
            &art,
            &ADMIN,
            ArticleStatus::Rejected,
            Some("needs more detail"),
            now(),
        )
        .unwrap();
        assert_eq!(fx.rejection_reason.as_deref(), Some("needs more detail"));
        assert_eq!(fx.event, Some(TransitionEventKind::Rejected));
    }

    #[test]
    fn writer_publish_request_becomes_plain_draft_save() {
        let art = article(ArticleStatus::Draft, WRITER.id);
        let fx =
            apply_transition(&art, &WRITER, ArticleStatus::Published, None, now()).unwrap();
        assert_eq!(fx.status, ArticleStatus::Draft);
        assert_eq!(fx.published_at, None);
        assert_eq!(fx.event, None);
    }

    #[test]
    fn non_owner_writer_is_forbidden() {
        let art = article(ArticleStatus::Draft, WRITER.id);
        let err = apply_transition(&art, &POET, ArticleStatus::Draft, None, now()).unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[test]
    fn unauthenticated_actor_is_rejected() {
        let err = authorize_mutation(None, 7).unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(_)));
    }

    #[test]
    fn writer_cannot_approve_own_article() {
        let art = article(ArticleStatus::PendingReview, WRITER.id);
        // The publish request downgrades to Draft, which the owner may do;
        // the article never reaches Published.
        let fx =
            apply_transition(&art, &WRITER, ArticleStatus::Published, None, now()).unwrap();
        assert_eq!(fx.status, ArticleStatus::Draft);
    }

    #[test]
    fn status_stays_in_closed_set_for_every_legal_transition() {
        for from in ArticleStatus::ALL {
            for to in ArticleStatus::ALL {
                for (actor, owner) in [(&ADMIN, false), (&WRITER, true), (&POET, false)] {
                    let mut art = article(from, if owner { actor.id } else { 999 });
                    if from == ArticleStatus::PendingReview {
                        art.submitted_at = Some(now());
                    }
                    if let Ok(fx) =
                        apply_transition(&art, actor, to, Some("reason"), now())
                    {
                        assert!(ArticleStatus::ALL.contains(&fx.status));
                    }
                }
            }
        }
    }
}
