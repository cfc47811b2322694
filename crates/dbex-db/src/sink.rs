//! Notification sinks.
//!
//! The newsletter example hands each message to an external collaborator.
//! Delivery is fire-and-forget: a sink accepts a message and its recipients
//! and reports nothing back.

use std::sync::{Mutex, PoisonError};

use dbex_core::entities::User;
use dbex_core::newsletter::Newsletter;

pub trait NotificationSink {
    fn send(&self, newsletter: &Newsletter, recipients: &[User]);
}

/// Emits one `tracing` event per delivery.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn send(&self, newsletter: &Newsletter, recipients: &[User]) {
        tracing::info!(
            title = %newsletter.title,
            link = %newsletter.link.target,
            recipients = recipients.len(),
            "newsletter sent"
        );
    }
}

/// One recorded call to [`NotificationSink::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub newsletter: Newsletter,
    pub recipient_ids: Vec<i64>,
}

/// Keeps every delivery in call order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for RecordingSink {
    fn send(&self, newsletter: &Newsletter, recipients: &[User]) {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Delivery {
                newsletter: newsletter.clone(),
                recipient_ids: recipients.iter().map(|u| u.id).collect(),
            });
    }
}
