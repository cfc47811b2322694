//! User repository and the user -> favorite author relation.

use dbex_core::entities::{Account, Author, User};

use crate::DbexDb;
use crate::error::DatabaseError;
use crate::repos::author::row_to_author;

pub const INSERT_USER: &str = "INSERT INTO users (account_id) VALUES (?1)";
pub const INSERT_FAVORITE: &str =
    "INSERT OR IGNORE INTO user_favorite_authors (user_id, author_id) VALUES (?1, ?2)";
pub const SELECT_USER: &str = "SELECT id, account_id FROM users WHERE id = ?1";
/// Users who favorited a given author.
pub const SELECT_USERS_FAVORITING_AUTHOR: &str = "SELECT u.id, u.account_id FROM users u \
     JOIN user_favorite_authors f ON f.user_id = u.id \
     WHERE f.author_id = ?1 ORDER BY u.id";
pub const SELECT_FAVORITE_AUTHORS: &str = "SELECT a.id, a.name, a.img_url FROM authors a \
     JOIN user_favorite_authors f ON f.author_id = a.id \
     WHERE f.user_id = ?1 ORDER BY a.id";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        account_id: row.get::<Option<i64>>(1)?,
    })
}

impl DbexDb {
    /// Save a user owning `account` (if any) with the given favorites.
    ///
    /// The user row and its favorites are written under one savepoint: if any
    /// favorite is rejected, nothing is kept.
    pub async fn save_user(
        &self,
        account: Option<&Account>,
        favorite_authors: &[&Author],
    ) -> Result<User, DatabaseError> {
        self.conn.execute("SAVEPOINT save_user", ()).await?;
        match self.insert_user(account, favorite_authors).await {
            Ok(user) => {
                self.conn.execute("RELEASE save_user", ()).await?;
                Ok(user)
            }
            Err(e) => {
                self.conn.execute("ROLLBACK TO save_user", ()).await?;
                self.conn.execute("RELEASE save_user", ()).await?;
                Err(e)
            }
        }
    }

    async fn insert_user(
        &self,
        account: Option<&Account>,
        favorite_authors: &[&Author],
    ) -> Result<User, DatabaseError> {
        let account_id = account.map(|a| a.id);
        self.execute(INSERT_USER, libsql::params![account_id]).await?;
        let user = User {
            id: self.last_insert_id(),
            account_id,
        };

        for author in favorite_authors {
            self.execute(INSERT_FAVORITE, [user.id, author.id]).await?;
        }

        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        self.query_first(SELECT_USER, [id], row_to_user)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Everyone who favorited `author`.
    pub async fn users_favoriting(&self, author: &Author) -> Result<Vec<User>, DatabaseError> {
        self.query(SELECT_USERS_FAVORITING_AUTHOR, [author.id], row_to_user).await
    }

    /// The authors `user` favorited. May be empty.
    pub async fn favorite_authors(&self, user: &User) -> Result<Vec<Author>, DatabaseError> {
        self.query(SELECT_FAVORITE_AUTHORS, [user.id], row_to_author).await
    }
}
