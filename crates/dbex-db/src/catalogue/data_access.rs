//! Title listing (N+1 vs. join) and content hashing (whole rows vs. projection).

use std::collections::BTreeMap;

use dbex_core::hash::content_hash;
use dbex_core::title::format_title;

use crate::DbexDb;
use crate::catalogue::loading::{AuthorDocuments, EagerAuthorDocuments, LazyAuthorDocuments};
use crate::error::DatabaseError;

pub const SELECT_DOCUMENT_CONTENTS: &str = "SELECT id, content FROM documents";

/// One formatted title per document, grouped by author in load order.
pub async fn list_titles(source: &impl AuthorDocuments) -> Result<Vec<String>, DatabaseError> {
    let loaded = source.authors_with_documents().await?;
    Ok(loaded
        .iter()
        .flat_map(|entry| {
            entry
                .documents
                .iter()
                .map(|document| format_title(document, &entry.author))
        })
        .collect())
}

pub struct InefficientDataAccess<'a> {
    db: &'a DbexDb,
}

impl<'a> InefficientDataAccess<'a> {
    #[must_use]
    pub const fn new(db: &'a DbexDb) -> Self {
        Self { db }
    }

    /// Authors first, then each author's documents on demand (1 + N).
    pub async fn dont_list_titles(&self) -> Result<Vec<String>, DatabaseError> {
        list_titles(&LazyAuthorDocuments::new(self.db)).await
    }

    /// Authors and documents in one joined round trip.
    pub async fn do_list_titles(&self) -> Result<Vec<String>, DatabaseError> {
        list_titles(&EagerAuthorDocuments::new(self.db)).await
    }

    /// Loads whole documents and keeps only id and content.
    pub async fn dont_hash_document_contents(&self) -> Result<BTreeMap<i64, i32>, DatabaseError> {
        let documents = self.db.list_documents().await?;
        Ok(documents
            .iter()
            .map(|d| (d.id, content_hash(&d.content)))
            .collect())
    }

    /// Loads only the `(id, content)` projection.
    pub async fn do_hash_document_contents(&self) -> Result<BTreeMap<i64, i32>, DatabaseError> {
        let hashes = self
            .db
            .query(SELECT_DOCUMENT_CONTENTS, (), |row| {
                let content: String = row.get(1)?;
                Ok((row.get::<i64>(0)?, content_hash(&content)))
            })
            .await?;
        Ok(hashes.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalogue::loading::SELECT_AUTHORS_WITH_DOCUMENTS;
    use crate::test_support::helpers::{author_with_documents, test_db};

    #[tokio::test]
    async fn titles_match_as_multisets() {
        let db = test_db().await;
        let base = Utc.with_ymd_and_hms(2018, 7, 14, 8, 0, 0).unwrap();
        author_with_documents(&db, "A", base, &[0, 1]).await;
        author_with_documents(&db, "B", base, &[2]).await;
        let catalogue = InefficientDataAccess::new(&db);

        let mut naive = catalogue.dont_list_titles().await.unwrap();
        let mut optimized = catalogue.do_list_titles().await.unwrap();
        naive.sort();
        optimized.sort();

        assert_eq!(naive, optimized);
        assert_eq!(
            optimized,
            vec![
                "A 0 (created by A on 2018-07-14)",
                "A 1 (created by A on 2018-07-14)",
                "B 0 (created by B on 2018-07-14)",
            ]
        );
    }

    #[tokio::test]
    async fn optimized_titles_use_one_statement() {
        let db = test_db().await;
        for name in ["A", "B", "C", "D"] {
            author_with_documents(&db, name, Utc::now(), &[0, 1]).await;
        }
        let catalogue = InefficientDataAccess::new(&db);

        db.reset_stats();
        catalogue.dont_list_titles().await.unwrap();
        assert_eq!(db.stats().statements(), 5);

        db.reset_stats();
        catalogue.do_list_titles().await.unwrap();
        assert_eq!(db.stats().statements(), 1);
        assert_eq!(db.stats().executions_of(SELECT_AUTHORS_WITH_DOCUMENTS), 1);
    }

    #[tokio::test]
    async fn hashes_agree_key_for_key() {
        let db = test_db().await;
        let (_, documents) = author_with_documents(&db, "A", Utc::now(), &[0, 1, 2]).await;
        let catalogue = InefficientDataAccess::new(&db);

        let naive = catalogue.dont_hash_document_contents().await.unwrap();
        let optimized = catalogue.do_hash_document_contents().await.unwrap();

        assert_eq!(naive, optimized);
        assert_eq!(optimized.len(), 3);
        for document in &documents {
            assert_eq!(optimized[&document.id], content_hash(&document.content));
        }
    }

    #[tokio::test]
    async fn empty_store_hashes_to_empty_map() {
        let db = test_db().await;
        let catalogue = InefficientDataAccess::new(&db);
        assert!(catalogue.dont_hash_document_contents().await.unwrap().is_empty());
        assert!(catalogue.do_hash_document_contents().await.unwrap().is_empty());
    }
}
