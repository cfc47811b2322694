//! Human-readable document titles.

use crate::entities::{Author, Document};

/// Render `"{title} (created by {author} on {YYYY-MM-DD})"`.
///
/// The date is the calendar date of `created_at` in UTC.
#[must_use]
pub fn format_title(document: &Document, author: &Author) -> String {
    format!(
        "{} (created by {} on {})",
        document.title,
        author.name,
        document.created_at.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn author() -> Author {
        Author {
            id: 1,
            name: "Matruskan".into(),
            img_url: None,
        }
    }

    fn document_at(year: i32, month: u32, day: u32) -> Document {
        Document {
            id: 7,
            author_id: 1,
            title: "BuildTitle Test".into(),
            content: String::new(),
            created_at: Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn renders_title_author_and_date() {
        assert_eq!(
            format_title(&document_at(2018, 7, 14), &author()),
            "BuildTitle Test (created by Matruskan on 2018-07-14)"
        );
    }

    #[test]
    fn uses_calendar_year_at_year_boundary() {
        // 2018-12-31 belongs to ISO week 1 of 2019; the title must still say 2018.
        assert_eq!(
            format_title(&document_at(2018, 12, 31), &author()),
            "BuildTitle Test (created by Matruskan on 2018-12-31)"
        );
    }
}
