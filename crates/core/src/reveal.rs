//! Author reveal gate.
//!
//! Some pieces run anonymously until a scheduled instant. Until then the
//! author's identity must not leave the server at all; callers serialize
//! [`AuthorDisplay`] instead of the raw author reference. Independent of
//! the workflow state machine; pure given `now`.

use serde::Serialize;

use crate::countdown::{self, Remaining};
use crate::types::{DbId, Timestamp};

/// True when the author identity may be shown.
///
/// An absent reveal date, or one at or before `now`, reveals the author.
pub fn is_revealed(reveal_date: Option<Timestamp>, now: Timestamp) -> bool {
    match reveal_date {
        None => true,
        Some(at) => at <= now,
    }
}

/// What a viewer is allowed to see of an article's authorship.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorDisplay {
    pub revealed: bool,
    /// The real author reference, only when revealed.
    pub author_id: Option<DbId>,
    /// Countdown until the reveal, only while masked.
    pub remaining: Option<Remaining>,
}

/// Compose the gate with the countdown calculator.
pub fn author_display(
    author_id: DbId,
    reveal_date: Option<Timestamp>,
    now: Timestamp,
) -> AuthorDisplay {
    if is_revealed(reveal_date, now) {
        AuthorDisplay {
            revealed: true,
            author_id: Some(author_id),
            remaining: None,
        }
    } else {
        // reveal_date is Some and strictly in the future here.
        let remaining = reveal_date.and_then(|at| countdown::remaining(at, now));
        AuthorDisplay {
            revealed: false,
            author_id: None,
            remaining,
        }
    }
}
