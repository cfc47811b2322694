use serde::{Deserialize, Serialize};

/// A reader. Favorited authors live in a join table and are loaded
/// separately, so they are not part of this struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct User {
    pub id: i64,
    pub account_id: Option<i64>,
}
