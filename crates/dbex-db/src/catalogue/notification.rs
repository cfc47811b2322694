//! Newsletter fan-out: re-querying a loop-invariant result vs. hoisting it.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use dbex_core::entities::{Author, Document, User};
use dbex_core::newsletter::Newsletter;

use crate::DbexDb;
use crate::error::DatabaseError;
use crate::helpers::format_datetime;
use crate::repos::document::row_to_document;
use crate::sink::NotificationSink;

/// Documents of one author created strictly after a cutoff.
pub const SELECT_DOCUMENTS_SINCE: &str = "SELECT id, author_id, title, content, created_at \
     FROM documents WHERE author_id = ?1 AND created_at > ?2 \
     ORDER BY created_at, id";

/// Start (00:00 UTC) of the day before `now`.
#[must_use]
pub fn yesterday(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .pred_opt()
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

pub struct UnnecessaryComputation<'a> {
    db: &'a DbexDb,
}

impl<'a> UnnecessaryComputation<'a> {
    #[must_use]
    pub const fn new(db: &'a DbexDb) -> Self {
        Self { db }
    }

    /// Re-loads the favoriting users for every document, although the author
    /// (and therefore the answer) never changes inside the loop.
    ///
    /// Returns the number of newsletters sent.
    pub async fn dont_send_newsletter_about_recent_documents(
        &self,
        author: &Author,
        cutoff: DateTime<Utc>,
        sink: &impl NotificationSink,
    ) -> Result<usize, DatabaseError> {
        let documents = self.documents_since(author, cutoff).await?;
        for document in &documents {
            let users = self.db.users_favoriting(author).await?;
            send_newsletter(sink, author, document, &users);
        }
        Ok(documents.len())
    }

    /// Loads the favoriting users once and reuses them for every document.
    ///
    /// Returns the number of newsletters sent.
    pub async fn do_send_newsletter_about_recent_documents(
        &self,
        author: &Author,
        cutoff: DateTime<Utc>,
        sink: &impl NotificationSink,
    ) -> Result<usize, DatabaseError> {
        let documents = self.documents_since(author, cutoff).await?;
        let users = self.db.users_favoriting(author).await?;
        for document in &documents {
            send_newsletter(sink, author, document, &users);
        }
        Ok(documents.len())
    }

    async fn documents_since(
        &self,
        author: &Author,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Document>, DatabaseError> {
        self.db
            .query(
                SELECT_DOCUMENTS_SINCE,
                libsql::params![author.id, format_datetime(&cutoff)],
                row_to_document,
            )
            .await
    }
}

fn send_newsletter(
    sink: &impl NotificationSink,
    author: &Author,
    document: &Document,
    users: &[User],
) {
    sink.send(&Newsletter::for_document(author, document), users);
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::repos::user::SELECT_USERS_FAVORITING_AUTHOR;
    use crate::sink::RecordingSink;
    use crate::test_support::helpers::{author_with_documents, test_db};

    #[test]
    fn yesterday_is_start_of_previous_utc_day() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 15, 42, 7).unwrap();
        assert_eq!(
            yesterday(now),
            Utc.with_ymd_and_hms(2026, 2, 28, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn both_variants_send_identical_newsletters() {
        let db = test_db().await;
        let now = Utc::now();
        let (author, _) = author_with_documents(&db, "A", now, &[-3 * 24 * 60, 0, 1, 2]).await;
        let fan = db.save_user(None, &[&author]).await.unwrap();
        db.save_user(None, &[]).await.unwrap();
        let catalogue = UnnecessaryComputation::new(&db);
        let cutoff = yesterday(now);

        let naive_sink = RecordingSink::new();
        let optimized_sink = RecordingSink::new();
        let naive_sent = catalogue
            .dont_send_newsletter_about_recent_documents(&author, cutoff, &naive_sink)
            .await
            .unwrap();
        let optimized_sent = catalogue
            .do_send_newsletter_about_recent_documents(&author, cutoff, &optimized_sink)
            .await
            .unwrap();

        assert_eq!(naive_sent, 3);
        assert_eq!(optimized_sent, 3);
        assert_eq!(naive_sink.deliveries(), optimized_sink.deliveries());
        for delivery in optimized_sink.deliveries() {
            assert_eq!(delivery.recipient_ids, vec![fan.id]);
        }
    }

    #[tokio::test]
    async fn optimized_variant_queries_favorites_once() {
        let db = test_db().await;
        let now = Utc::now();
        let (author, _) = author_with_documents(&db, "A", now, &[0, 1, 2, 3, 4]).await;
        db.save_user(None, &[&author]).await.unwrap();
        let catalogue = UnnecessaryComputation::new(&db);
        let sink = RecordingSink::new();

        db.reset_stats();
        catalogue
            .dont_send_newsletter_about_recent_documents(&author, yesterday(now), &sink)
            .await
            .unwrap();
        assert_eq!(db.stats().executions_of(SELECT_USERS_FAVORITING_AUTHOR), 5);

        db.reset_stats();
        catalogue
            .do_send_newsletter_about_recent_documents(&author, yesterday(now), &sink)
            .await
            .unwrap();
        assert_eq!(db.stats().executions_of(SELECT_USERS_FAVORITING_AUTHOR), 1);
    }

    #[tokio::test]
    async fn cutoff_is_exclusive() {
        let db = test_db().await;
        let cutoff = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let (author, documents) = author_with_documents(&db, "A", cutoff, &[0, 1]).await;
        let catalogue = UnnecessaryComputation::new(&db);
        let sink = RecordingSink::new();

        let sent = catalogue
            .do_send_newsletter_about_recent_documents(&author, cutoff, &sink)
            .await
            .unwrap();

        assert_eq!(sent, 1);
        assert_eq!(
            sink.deliveries()[0].newsletter.link.target,
            documents[1].link_target()
        );
    }

    #[tokio::test]
    async fn no_recent_documents_means_no_favorites_query_in_naive_variant() {
        let db = test_db().await;
        let now = Utc::now();
        let (author, _) =
            author_with_documents(&db, "A", now - Duration::days(10), &[0]).await;
        let catalogue = UnnecessaryComputation::new(&db);
        let sink = RecordingSink::new();

        db.reset_stats();
        let sent = catalogue
            .dont_send_newsletter_about_recent_documents(&author, yesterday(now), &sink)
            .await
            .unwrap();

        assert_eq!(sent, 0);
        assert!(sink.deliveries().is_empty());
        assert_eq!(db.stats().executions_of(SELECT_USERS_FAVORITING_AUTHOR), 0);
    }
}
