//! Notification message value.
//!
//! A `Newsletter` is a plain immutable description of one notification. It is
//! built once per document and handed to a sink together with its recipients.

use serde::{Deserialize, Serialize};

use crate::entities::{Author, Document};

/// Label used for the link back to the announced document.
pub const OPEN_DOCUMENT_LABEL: &str = "Open Document";

/// Banner shown above the newsletter body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub image_ref: Option<String>,
    pub text: String,
}

/// Labelled link target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Newsletter {
    pub title: String,
    pub header: Header,
    pub content: String,
    pub link: Link,
}

impl Newsletter {
    /// Announce `document`, written by `author`.
    #[must_use]
    pub fn for_document(author: &Author, document: &Document) -> Self {
        Self {
            title: format!("New Document from {}: {}", author.name, document.title),
            header: Header {
                image_ref: author.img_url.clone(),
                text: format!("{} created a new Document: {}", author.name, document.title),
            },
            content: document.content.clone(),
            link: Link {
                label: OPEN_DOCUMENT_LABEL.to_string(),
                target: document.link_target(),
            },
        }
    }
}
