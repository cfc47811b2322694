//! Declarative fixture shapes.
//!
//! A `FixtureSpec` says how many records of each kind to seed and how to name
//! them. Templates understand two placeholders: `{n}` is the zero-based index
//! of the record being generated and `{author}` is the owning author's name
//! (document titles only).

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FixtureSpec {
    /// Number of authors.
    #[serde(default)]
    pub authors: u32,

    /// Documents generated for each author.
    #[serde(default)]
    pub documents_per_author: u32,

    /// Number of users, each with its own account.
    #[serde(default)]
    pub users: u32,

    /// Author name template.
    #[serde(default = "default_author_name")]
    pub author_name: String,

    /// Document title template.
    #[serde(default = "default_document_title")]
    pub document_title: String,

    /// Content shared by every document.
    #[serde(default = "default_content")]
    pub content: String,

    /// Document `n` is dated `base + n * date_step_minutes`.
    #[serde(default = "default_date_step_minutes")]
    pub date_step_minutes: i64,

    /// Every seeded user favorites the first author.
    #[serde(default)]
    pub users_favorite_first_author: bool,
}

fn default_author_name() -> String {
    "Author {n}".into()
}

fn default_document_title() -> String {
    "{author} Document {n}".into()
}

fn default_content() -> String {
    "No Content Yet".into()
}

const fn default_date_step_minutes() -> i64 {
    1
}

impl Default for FixtureSpec {
    fn default() -> Self {
        Self {
            authors: 0,
            documents_per_author: 0,
            users: 0,
            author_name: default_author_name(),
            document_title: default_document_title(),
            content: default_content(),
            date_step_minutes: default_date_step_minutes(),
            users_favorite_first_author: false,
        }
    }
}

impl FixtureSpec {
    /// Render the name of author `n`.
    #[must_use]
    pub fn author_name(&self, n: u32) -> String {
        self.author_name.replace("{n}", &n.to_string())
    }

    /// Render the title of document `n` belonging to `author`.
    #[must_use]
    pub fn document_title(&self, author: &str, n: u32) -> String {
        self.document_title
            .replace("{author}", author)
            .replace("{n}", &n.to_string())
    }

    /// Total number of documents seeded.
    #[must_use]
    pub const fn total_documents(&self) -> u64 {
        self.authors as u64 * self.documents_per_author as u64
    }

    /// Check the templates and counts are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when favorites are requested with
    /// no author to favorite, or when author names would collide (authors
    /// compare by name, so a template without `{n}` only supports one).
    pub fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if self.users_favorite_first_author && self.authors == 0 {
            return Err(ConfigError::InvalidValue {
                field: format!("{section}.users_favorite_first_author"),
                reason: "requires at least one author".into(),
            });
        }
        if self.authors > 1 && !self.author_name.contains("{n}") {
            return Err(ConfigError::InvalidValue {
                field: format!("{section}.author_name"),
                reason: "must contain '{n}' when seeding more than one author".into(),
            });
        }
        Ok(())
    }
}

/// One fixture shape per catalogue group.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixturesConfig {
    /// Existence check and most-recent lookup.
    #[serde(default = "FixturesConfig::default_computation")]
    pub computation: FixtureSpec,

    /// Title listing and content hashing.
    #[serde(default = "FixturesConfig::default_data_access")]
    pub data_access: FixtureSpec,

    /// Newsletter fan-out.
    #[serde(default = "FixturesConfig::default_notification")]
    pub notification: FixtureSpec,

    /// Name projection.
    #[serde(default = "FixturesConfig::default_retrieval")]
    pub retrieval: FixtureSpec,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            computation: Self::default_computation(),
            data_access: Self::default_data_access(),
            notification: Self::default_notification(),
            retrieval: Self::default_retrieval(),
        }
    }
}

impl FixturesConfig {
    fn default_computation() -> FixtureSpec {
        FixtureSpec {
            authors: 1,
            documents_per_author: 200,
            author_name: "Matruskan".into(),
            document_title: "InefficientComputation {n}nd Edition".into(),
            ..FixtureSpec::default()
        }
    }

    fn default_data_access() -> FixtureSpec {
        FixtureSpec {
            authors: 10,
            documents_per_author: 10,
            author_name: "Matruskan {n}".into(),
            document_title: "Inefficient Data Accessing {author} {n}nd Edition".into(),
            ..FixtureSpec::default()
        }
    }

    fn default_notification() -> FixtureSpec {
        FixtureSpec {
            authors: 1,
            documents_per_author: 20,
            users: 20,
            author_name: "Matruskan".into(),
            document_title: "UnnecessaryComputation {n}nd Edition".into(),
            users_favorite_first_author: true,
            ..FixtureSpec::default()
        }
    }

    fn default_retrieval() -> FixtureSpec {
        FixtureSpec {
            authors: 500,
            author_name: "Matruskan {n}".into(),
            ..FixtureSpec::default()
        }
    }

    /// Validate every group.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.computation.validate("fixtures.computation")?;
        self.data_access.validate("fixtures.data_access")?;
        self.notification.validate("fixtures.notification")?;
        self.retrieval.validate("fixtures.retrieval")
    }
}
