//! Account repository.

use dbex_core::entities::Account;

use crate::DbexDb;
use crate::error::DatabaseError;

pub const INSERT_ACCOUNT: &str = "INSERT INTO accounts (username, password) VALUES (?1, ?2)";
pub const SELECT_ACCOUNT: &str = "SELECT id, username, password FROM accounts WHERE id = ?1";

fn row_to_account(row: &libsql::Row) -> Result<Account, DatabaseError> {
    Ok(Account {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

impl DbexDb {
    pub async fn save_account(
        &self,
        username: &str,
        password: &[u8],
    ) -> Result<Account, DatabaseError> {
        self.execute(
            INSERT_ACCOUNT,
            libsql::params![username, libsql::Value::Blob(password.to_vec())],
        )
        .await?;

        Ok(Account {
            id: self.last_insert_id(),
            username: username.to_string(),
            password: password.to_vec(),
        })
    }

    pub async fn get_account(&self, id: i64) -> Result<Account, DatabaseError> {
        self.query_first(SELECT_ACCOUNT, [id], row_to_account)
            .await?
            .ok_or(DatabaseError::NoResult)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::test_db;

    #[tokio::test]
    async fn save_then_get_roundtrips_password_bytes() {
        let db = test_db().await;
        let saved = db.save_account("reader", &[0, 1, 2, 255]).await.unwrap();
        let loaded = db.get_account(saved.id).await.unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.password, vec![0, 1, 2, 255]);
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order() {
        let db = test_db().await;
        let first = db.save_account("a", b"x").await.unwrap();
        let second = db.save_account("b", b"y").await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn account_id_cannot_be_rewritten() {
        let db = test_db().await;
        let saved = db.save_account("reader", b"pw").await.unwrap();
        let result = db
            .conn()
            .execute(
                "UPDATE accounts SET id = ?1 WHERE id = ?2",
                [saved.id + 100, saved.id],
            )
            .await;
        assert!(result.is_err());
    }
}
