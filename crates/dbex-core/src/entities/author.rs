use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A document author.
///
/// Identity is the name alone: two authors with the same name compare equal
/// and hash identically whatever their `id`. Deduplicating joined rows by
/// author relies on this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub img_url: Option<String>,
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
