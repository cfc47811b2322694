//! Disposable fixture stores.
//!
//! A [`FixtureStore`] owns one freshly created database for the lifetime of a
//! verification run. File-backed stores live in their own temporary
//! directory, which is removed on [`FixtureStore::teardown`] or, failing
//! that, when the store is dropped (including during a panic unwind).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use dbex_config::{FixtureSpec, StoreConfig};
use dbex_core::entities::Author;
use tempfile::TempDir;

use crate::DbexDb;
use crate::error::DatabaseError;

const DATABASE_FILE: &str = "fixture.db";

/// Seeded store plus the on-disk artifacts that back it.
pub struct FixtureStore {
    // Field order matters: the connection must close before the directory goes.
    db: DbexDb,
    dir: Option<TempDir>,
    keep_artifacts: bool,
    authors: Vec<Author>,
}

impl FixtureStore {
    /// Open a fresh store and seed it according to `spec`.
    ///
    /// Seeding runs in one transaction; on failure it is rolled back and
    /// nothing is left behind. Statement counters start at zero once seeding
    /// completes.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Config` if `config` or `spec` is invalid, or any
    /// store error raised while opening or seeding.
    pub async fn seed(
        config: &StoreConfig,
        spec: &FixtureSpec,
        base: DateTime<Utc>,
    ) -> Result<Self, DatabaseError> {
        config.validate()?;
        spec.validate("fixture")?;

        let (db, dir) = if config.is_in_memory() {
            (DbexDb::open_in_memory().await?, None)
        } else {
            std::fs::create_dir_all(&config.location)?;
            let dir = tempfile::Builder::new()
                .prefix("dbex-")
                .tempdir_in(&config.location)?;
            let path = dir.path().join(DATABASE_FILE);
            let path = path.to_str().ok_or_else(|| {
                DatabaseError::InvalidState(format!("non UTF-8 fixture path: {}", path.display()))
            })?;
            (DbexDb::open_local(path).await?, Some(dir))
        };

        db.begin().await?;
        let authors = match populate(&db, spec, base).await {
            Ok(authors) => authors,
            Err(e) => {
                if let Err(rollback) = db.rollback().await {
                    tracing::warn!(error = %rollback, "fixture rollback failed");
                }
                return Err(e);
            }
        };
        db.commit().await?;
        db.reset_stats();

        tracing::info!(
            authors = spec.authors,
            documents = spec.total_documents(),
            users = spec.users,
            location = %config.location,
            "fixture seeded"
        );

        Ok(Self {
            db,
            dir,
            keep_artifacts: config.keep_artifacts,
            authors,
        })
    }

    #[must_use]
    pub const fn db(&self) -> &DbexDb {
        &self.db
    }

    /// Seeded authors, in creation order.
    #[must_use]
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    #[must_use]
    pub fn first_author(&self) -> Option<&Author> {
        self.authors.first()
    }

    /// Directory holding the database file; `None` for in-memory stores.
    #[must_use]
    pub fn artifact_dir(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// Close the store and remove its files.
    ///
    /// With `keep_artifacts` the files stay and their directory is returned.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Io` if the directory cannot be removed.
    pub fn teardown(self) -> Result<Option<PathBuf>, DatabaseError> {
        let Self {
            db,
            dir,
            keep_artifacts,
            ..
        } = self;
        drop(db);

        let Some(dir) = dir else {
            tracing::info!("in-memory fixture released");
            return Ok(None);
        };

        if keep_artifacts {
            let kept = dir.keep();
            tracing::info!(path = %kept.display(), "fixture artifacts kept");
            return Ok(Some(kept));
        }

        let path = dir.path().to_path_buf();
        dir.close()?;
        tracing::info!(path = %path.display(), "fixture removed");
        Ok(None)
    }
}

async fn populate(
    db: &DbexDb,
    spec: &FixtureSpec,
    base: DateTime<Utc>,
) -> Result<Vec<Author>, DatabaseError> {
    let mut authors = Vec::new();
    for a in 0..spec.authors {
        let name = spec.author_name(a);
        let img_url = format!("/images/authors/{a}.png");
        let author = db.save_author(&name, Some(&img_url)).await?;

        for d in 0..spec.documents_per_author {
            let created_at = base + Duration::minutes(i64::from(d) * spec.date_step_minutes);
            db.save_document(
                &author,
                &spec.document_title(&author.name, d),
                &spec.content,
                created_at,
            )
            .await?;
        }
        authors.push(author);
    }

    let favorites: Vec<&Author> = if spec.users_favorite_first_author {
        authors.first().into_iter().collect()
    } else {
        Vec::new()
    };
    for u in 0..spec.users {
        let account = db
            .save_account(&format!("user{u}"), format!("secret-{u}").as_bytes())
            .await?;
        db.save_user(Some(&account), &favorites).await?;
    }

    Ok(authors)
}
