//! Author repository.

use dbex_core::entities::Author;

use crate::DbexDb;
use crate::error::DatabaseError;
use crate::helpers::get_opt_string;

pub const INSERT_AUTHOR: &str = "INSERT INTO authors (name, img_url) VALUES (?1, ?2)";
pub const SELECT_AUTHOR: &str = "SELECT id, name, img_url FROM authors WHERE id = ?1";
pub const SELECT_AUTHORS_BY_NAME: &str =
    "SELECT id, name, img_url FROM authors WHERE name = ?1 ORDER BY id";
/// Whole author records.
pub const SELECT_ALL_AUTHORS: &str = "SELECT id, name, img_url FROM authors ORDER BY id";

pub(crate) fn row_to_author(row: &libsql::Row) -> Result<Author, DatabaseError> {
    Ok(Author {
        id: row.get(0)?,
        name: row.get(1)?,
        img_url: get_opt_string(row, 2)?,
    })
}

impl DbexDb {
    pub async fn save_author(
        &self,
        name: &str,
        img_url: Option<&str>,
    ) -> Result<Author, DatabaseError> {
        self.execute(INSERT_AUTHOR, libsql::params![name, img_url])
            .await?;

        Ok(Author {
            id: self.last_insert_id(),
            name: name.to_string(),
            img_url: img_url.map(String::from),
        })
    }

    pub async fn get_author(&self, id: i64) -> Result<Author, DatabaseError> {
        self.query_first(SELECT_AUTHOR, [id], row_to_author)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    pub async fn find_authors_by_name(&self, name: &str) -> Result<Vec<Author>, DatabaseError> {
        self.query(SELECT_AUTHORS_BY_NAME, [name], row_to_author).await
    }

    pub async fn list_authors(&self) -> Result<Vec<Author>, DatabaseError> {
        self.query(SELECT_ALL_AUTHORS, (), row_to_author).await
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DatabaseError;
    use crate::test_support::helpers::test_db;

    #[tokio::test]
    async fn save_and_get_author() {
        let db = test_db().await;
        let saved = db
            .save_author("Matruskan", Some("/images/m.png"))
            .await
            .unwrap();
        let loaded = db.get_author(saved.id).await.unwrap();
        assert_eq!(loaded.id, saved.id);
        assert_eq!(loaded.name, "Matruskan");
        assert_eq!(loaded.img_url.as_deref(), Some("/images/m.png"));
    }

    #[tokio::test]
    async fn get_missing_author_is_no_result() {
        let db = test_db().await;
        assert!(matches!(
            db.get_author(42).await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn find_by_name_returns_every_match() {
        let db = test_db().await;
        db.save_author("Ada", None).await.unwrap();
        db.save_author("Grace", None).await.unwrap();
        db.save_author("Ada", None).await.unwrap();

        let found = db.find_authors_by_name("Ada").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].id < found[1].id);
        assert!(db.find_authors_by_name("Linus").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_authors_in_id_order() {
        let db = test_db().await;
        for name in ["c", "a", "b"] {
            db.save_author(name, None).await.unwrap();
        }
        let names: Vec<String> = db
            .list_authors()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, ["c", "a", "b"]);
    }
}
