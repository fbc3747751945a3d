//! In-process editorial event bus.
//!
//! The editorial service emits an [`EditorialEvent`] when an article is
//! submitted, published, or rejected. The [`Notifier`] fans those events
//! out over a `tokio::sync::broadcast` channel so future consumers
//! (mail, web push, admin dashboards) can subscribe without touching the
//! workflow code. Delivery is fire-and-forget: a transition never fails
//! because nobody is listening.

use async_trait::async_trait;
use tokio::sync::broadcast;

use masthead_core::notify::{EditorialEvent, NotificationSink};

/// Default buffer size for the broadcast channel.
const CHANNEL_CAPACITY: usize = 256;

pub struct Notifier {
    sender: broadcast::Sender<EditorialEvent>,
}

impl Notifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to the event stream. Slow subscribers that fall more than
    /// the channel capacity behind will observe `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<EditorialEvent> {
        self.sender.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for Notifier {
    async fn deliver(&self, event: EditorialEvent) {
        match &event {
            EditorialEvent::SubmittedForReview {
                article_id, title, ..
            } => {
                tracing::info!(article_id, title = %title, "Article submitted for review");
            }
            EditorialEvent::Published {
                article_id, title, ..
            } => {
                tracing::info!(article_id, title = %title, "Article published");
            }
            EditorialEvent::Rejected {
                article_id, reason, ..
            } => {
                tracing::info!(article_id, reason = %reason, "Article rejected");
            }
        }

        // An Err here only means there are no subscribers right now.
        let _ = self.sender.send(event);
    }
}
