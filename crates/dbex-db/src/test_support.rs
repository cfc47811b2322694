//! Shared test utilities for dbex-db unit tests.

pub(crate) mod helpers {
    use chrono::{DateTime, Duration, Utc};
    use dbex_core::entities::{Author, Document};

    use crate::DbexDb;

    /// Fresh in-memory store with the schema applied.
    pub async fn test_db() -> DbexDb {
        DbexDb::open_in_memory().await.unwrap()
    }

    /// Save `author` with one document per entry of `offsets_minutes`, each
    /// dated `base + offset`.
    pub async fn author_with_documents(
        db: &DbexDb,
        name: &str,
        base: DateTime<Utc>,
        offsets_minutes: &[i64],
    ) -> (Author, Vec<Document>) {
        let author = db.save_author(name, None).await.unwrap();
        let mut documents = Vec::new();
        for (i, offset) in offsets_minutes.iter().enumerate() {
            let document = db
                .save_document(
                    &author,
                    &format!("{name} {i}"),
                    &format!("content {i}"),
                    base + Duration::minutes(*offset),
                )
                .await
                .unwrap();
            documents.push(document);
        }
        (author, documents)
    }
}
