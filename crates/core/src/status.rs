//! Article workflow status enumeration.
//!
//! These values match the strings stored in the `articles.status` column.
//! Parsing is strict: anything outside the closed set is a validation error
//! at the boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Workflow state of an article.
///
/// `Draft` is the unique initial state for new articles (except an admin
/// publishing directly at creation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleStatus {
    Draft,
    PendingReview,
    Published,
    Rejected,
    Archived,
}

impl ArticleStatus {
    /// All statuses, in workflow order.
    pub const ALL: [ArticleStatus; 5] = [
        ArticleStatus::Draft,
        ArticleStatus::PendingReview,
        ArticleStatus::Published,
        ArticleStatus::Rejected,
        ArticleStatus::Archived,
    ];

    /// The stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "DRAFT",
            ArticleStatus::PendingReview => "PENDING_REVIEW",
            ArticleStatus::Published => "PUBLISHED",
            ArticleStatus::Rejected => "REJECTED",
            ArticleStatus::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(ArticleStatus::Draft),
            "PENDING_REVIEW" => Ok(ArticleStatus::PendingReview),
            "PUBLISHED" => Ok(ArticleStatus::Published),
            "REJECTED" => Ok(ArticleStatus::Rejected),
            "ARCHIVED" => Ok(ArticleStatus::Archived),
            other => Err(CoreError::Validation(format!(
                "Invalid article status '{other}'. Must be one of: DRAFT, \
                 PENDING_REVIEW, PUBLISHED, REJECTED, ARCHIVED"
            ))),
        }
    }
}
