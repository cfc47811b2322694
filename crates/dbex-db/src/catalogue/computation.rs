//! Existence check and most-recent lookup.

use std::cmp::Ordering;

use dbex_core::entities::{Author, Document};

use crate::DbexDb;
use crate::error::DatabaseError;
use crate::repos::document::row_to_document;

pub const COUNT_DOCUMENTS_BY_AUTHOR: &str = "SELECT count(*) FROM documents WHERE author_id = ?1";
/// Ties on `created_at` resolve to the lowest id, as in the in-memory sort.
pub const SELECT_MOST_RECENT_DOCUMENT: &str = "SELECT id, author_id, title, content, created_at \
     FROM documents WHERE author_id = ?1 \
     ORDER BY created_at DESC, id ASC LIMIT 1";

/// Newest first; equal dates fall back to ascending id.
fn newest_first(a: &Document, b: &Document) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

pub struct InefficientComputation<'a> {
    db: &'a DbexDb,
}

impl<'a> InefficientComputation<'a> {
    #[must_use]
    pub const fn new(db: &'a DbexDb) -> Self {
        Self { db }
    }

    /// Loads every document of `author` just to test for emptiness.
    pub async fn dont_document_exists(&self, author: &Author) -> Result<bool, DatabaseError> {
        let documents = self.db.documents_by_author(author).await?;
        Ok(!documents.is_empty())
    }

    /// Counts in SQL; a single row comes back.
    pub async fn do_document_exists(&self, author: &Author) -> Result<bool, DatabaseError> {
        let count = self
            .db
            .query_first(COUNT_DOCUMENTS_BY_AUTHOR, [author.id], |row| {
                Ok(row.get::<i64>(0)?)
            })
            .await?
            .ok_or(DatabaseError::NoResult)?;
        Ok(count > 0)
    }

    /// Loads every document of `author` and sorts them in memory.
    /// `None` when the author has no documents.
    pub async fn dont_most_recent_document(
        &self,
        author: &Author,
    ) -> Result<Option<Document>, DatabaseError> {
        let mut documents = self.db.documents_by_author(author).await?;
        documents.sort_by(newest_first);
        Ok(documents.into_iter().next())
    }

    /// Lets the store sort and stop after one row.
    /// `None` when the author has no documents.
    pub async fn do_most_recent_document(
        &self,
        author: &Author,
    ) -> Result<Option<Document>, DatabaseError> {
        self.db
            .query_first(SELECT_MOST_RECENT_DOCUMENT, [author.id], row_to_document)
            .await
    }
}
