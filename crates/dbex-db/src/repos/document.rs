//! Document repository.

use chrono::{DateTime, Utc};
use dbex_core::entities::{Author, Document};

use crate::DbexDb;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime, stored_datetime};

pub const INSERT_DOCUMENT: &str =
    "INSERT INTO documents (author_id, title, content, created_at) VALUES (?1, ?2, ?3, ?4)";
pub const SELECT_DOCUMENT: &str =
    "SELECT id, author_id, title, content, created_at FROM documents WHERE id = ?1";
/// Whole document records of one author, in id order.
pub const SELECT_DOCUMENTS_BY_AUTHOR: &str = "SELECT id, author_id, title, content, created_at \
     FROM documents WHERE author_id = ?1 ORDER BY id";
/// Whole document records, in id order.
pub const SELECT_ALL_DOCUMENTS: &str =
    "SELECT id, author_id, title, content, created_at FROM documents ORDER BY id";

pub(crate) fn row_to_document(row: &libsql::Row) -> Result<Document, DatabaseError> {
    document_at(row, 0)
}

/// Read the five document columns starting at column `start`.
pub(crate) fn document_at(row: &libsql::Row, start: i32) -> Result<Document, DatabaseError> {
    Ok(Document {
        id: row.get(start)?,
        author_id: row.get(start + 1)?,
        title: row.get(start + 2)?,
        content: row.get(start + 3)?,
        created_at: parse_datetime(&row.get::<String>(start + 4)?)?,
    })
}

impl DbexDb {
    pub async fn save_document(
        &self,
        author: &Author,
        title: &str,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Document, DatabaseError> {
        let created_at = stored_datetime(&created_at)?;
        self.execute(
            INSERT_DOCUMENT,
            libsql::params![author.id, title, content, format_datetime(&created_at)],
        )
        .await?;

        Ok(Document {
            id: self.last_insert_id(),
            author_id: author.id,
            title: title.to_string(),
            content: content.to_string(),
            created_at,
        })
    }

    pub async fn get_document(&self, id: i64) -> Result<Document, DatabaseError> {
        self.query_first(SELECT_DOCUMENT, [id], row_to_document)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Every document of `author`, fetched as whole records.
    pub async fn documents_by_author(&self, author: &Author) -> Result<Vec<Document>, DatabaseError> {
        self.query(SELECT_DOCUMENTS_BY_AUTHOR, [author.id], row_to_document).await
    }

    /// Every document in the store, fetched as whole records.
    pub async fn list_documents(&self) -> Result<Vec<Document>, DatabaseError> {
        self.query(SELECT_ALL_DOCUMENTS, (), row_to_document).await
    }
}
