use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document written by one author.
///
/// `created_at` drives most-recent ordering and the "since yesterday" filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Relative link target used by notifications.
    #[must_use]
    pub fn link_target(&self) -> String {
        format!("/documents/{}", self.id)
    }
}
