//! Notification seam between the workflow and the delivery layer.
//!
//! The editorial service emits an [`EditorialEvent`] after each successful
//! transition. Delivery is fire-and-forget: implementations must swallow
//! and log their own failures, because a missed notification must never
//! fail the transition that triggered it.

use async_trait::async_trait;
use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// A domain event produced by a successful workflow transition.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum EditorialEvent {
    /// An author submitted an article; reviewers should take a look.
    SubmittedForReview {
        article_id: DbId,
        title: String,
        author_id: DbId,
        submitted_at: Timestamp,
    },
    /// A reviewer approved and published the article.
    Published {
        article_id: DbId,
        title: String,
        author_id: DbId,
    },
    /// A reviewer rejected the article.
    Rejected {
        article_id: DbId,
        title: String,
        author_id: DbId,
        reason: String,
    },
}

/// Where editorial events go.
///
/// Infallible by contract: a sink that can fail must catch internally.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, event: EditorialEvent);
}

/// A sink that drops every event. Useful as a default and in tests.
#[derive(Debug, Default)]
pub struct NullSink;

#[async_trait]
impl NotificationSink for NullSink {
    async fn deliver(&self, _event: EditorialEvent) {}
}
