//! Name projection.

use crate::DbexDb;
use crate::error::DatabaseError;

pub const SELECT_AUTHOR_NAMES: &str = "SELECT name FROM authors ORDER BY id";

pub struct UnnecessaryDataRetrieval<'a> {
    db: &'a DbexDb,
}

impl<'a> UnnecessaryDataRetrieval<'a> {
    #[must_use]
    pub const fn new(db: &'a DbexDb) -> Self {
        Self { db }
    }

    /// Loads whole author records to read one field.
    pub async fn dont_get_author_names(&self) -> Result<Vec<String>, DatabaseError> {
        let authors = self.db.list_authors().await?;
        Ok(authors.into_iter().map(|a| a.name).collect())
    }

    /// Projects the name column in SQL.
    pub async fn do_get_author_names(&self) -> Result<Vec<String>, DatabaseError> {
        self.db
            .query(SELECT_AUTHOR_NAMES, (), |row| Ok(row.get::<String>(0)?))
            .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::test_db;

    #[tokio::test]
    async fn names_match_seeded_authors() {
        let db = test_db().await;
        for i in 0..5 {
            db.save_author(&format!("Matruskan {i}"), Some("/img.png"))
                .await
                .unwrap();
        }
        let catalogue = UnnecessaryDataRetrieval::new(&db);

        let naive = catalogue.dont_get_author_names().await.unwrap();
        let optimized = catalogue.do_get_author_names().await.unwrap();

        assert_eq!(naive, optimized);
        assert_eq!(optimized.len(), 5);
        assert_eq!(optimized[0], "Matruskan 0");
    }

    #[tokio::test]
    async fn no_authors_no_names() {
        let db = test_db().await;
        let catalogue = UnnecessaryDataRetrieval::new(&db);
        assert!(catalogue.dont_get_author_names().await.unwrap().is_empty());
        assert!(catalogue.do_get_author_names().await.unwrap().is_empty());
    }
}
