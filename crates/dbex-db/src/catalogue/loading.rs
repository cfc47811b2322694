//! Author -> documents association loading.
//!
//! Two strategies behind one trait, picked by the caller:
//!
//! - [`LazyAuthorDocuments`] loads the authors, then one query per author for
//!   its documents (1 + N statements).
//! - [`EagerAuthorDocuments`] loads authors and documents in a single joined
//!   query and groups the rows by author (1 statement).
//!
//! Nothing is fetched implicitly: documents are only loaded when a strategy
//! is asked for them.

use std::future::Future;

use dbex_core::entities::{Author, Document};

use crate::DbexDb;
use crate::error::DatabaseError;
use crate::repos::author::row_to_author;
use crate::repos::document::document_at;

/// Every author with every document, one row per (author, document) pair.
/// Authors without documents appear once with NULL document columns.
pub const SELECT_AUTHORS_WITH_DOCUMENTS: &str = "SELECT a.id, a.name, a.img_url, \
     d.id, d.author_id, d.title, d.content, d.created_at \
     FROM authors a LEFT JOIN documents d ON d.author_id = a.id \
     ORDER BY a.id, d.id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorWithDocuments {
    pub author: Author,
    pub documents: Vec<Document>,
}

pub trait AuthorDocuments {
    /// Every author paired with its documents.
    fn authors_with_documents(
        &self,
    ) -> impl Future<Output = Result<Vec<AuthorWithDocuments>, DatabaseError>>;
}

pub struct LazyAuthorDocuments<'a> {
    db: &'a DbexDb,
}

impl<'a> LazyAuthorDocuments<'a> {
    #[must_use]
    pub const fn new(db: &'a DbexDb) -> Self {
        Self { db }
    }

    /// Parents only.
    pub async fn authors(&self) -> Result<Vec<Author>, DatabaseError> {
        self.db.list_authors().await
    }

    /// One round trip for one parent's children.
    pub async fn documents_of(&self, author: &Author) -> Result<Vec<Document>, DatabaseError> {
        self.db.documents_by_author(author).await
    }
}

impl AuthorDocuments for LazyAuthorDocuments<'_> {
    async fn authors_with_documents(&self) -> Result<Vec<AuthorWithDocuments>, DatabaseError> {
        let authors = self.authors().await?;
        let mut loaded = Vec::with_capacity(authors.len());
        for author in authors {
            let documents = self.documents_of(&author).await?;
            loaded.push(AuthorWithDocuments { author, documents });
        }
        Ok(loaded)
    }
}

pub struct EagerAuthorDocuments<'a> {
    db: &'a DbexDb,
}

impl<'a> EagerAuthorDocuments<'a> {
    #[must_use]
    pub const fn new(db: &'a DbexDb) -> Self {
        Self { db }
    }
}

impl AuthorDocuments for EagerAuthorDocuments<'_> {
    async fn authors_with_documents(&self) -> Result<Vec<AuthorWithDocuments>, DatabaseError> {
        let rows = self
            .db
            .query(SELECT_AUTHORS_WITH_DOCUMENTS, (), |row| {
                let document = match row.get::<Option<i64>>(3)? {
                    Some(_) => Some(document_at(row, 3)?),
                    None => None,
                };
                Ok((row_to_author(row)?, document))
            })
            .await?;

        // Rows arrive ordered by author id, so one author's rows are adjacent.
        let mut grouped: Vec<AuthorWithDocuments> = Vec::new();
        for (author, document) in rows {
            let is_new_author = grouped.last().is_none_or(|g| g.author.id != author.id);
            if is_new_author {
                grouped.push(AuthorWithDocuments {
                    author,
                    documents: Vec::new(),
                });
            }
            if let (Some(document), Some(group)) = (document, grouped.last_mut()) {
                group.documents.push(document);
            }
        }
        Ok(grouped)
    }
}
