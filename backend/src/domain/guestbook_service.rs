//! Guestbook domain logic: append-only congratulation messages,
//! listed newest first.

use anyhow::Result;
use chrono::{Local, Utc};
use log::info;
use shared::GuestbookMessage;

use crate::storage::GuestbookStorage;

/// Guestbook service handling message creation and listing
#[derive(Clone)]
pub struct GuestbookService<S: GuestbookStorage> {
    storage: S,
}

impl<S: GuestbookStorage> GuestbookService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Add a message to the guestbook.
    ///
    /// Both name and message are required after trimming; an empty input
    /// is silently ignored and `None` is returned.
    pub async fn add_message(&self, name: &str, message: &str) -> Result<Option<GuestbookMessage>> {
        let name = name.trim();
        let message = message.trim();

        if name.is_empty() || message.is_empty() {
            return Ok(None);
        }

        let entry = GuestbookMessage {
            id: Utc::now().timestamp_millis(),
            name: name.to_string(),
            message: message.to_string(),
            date: Local::now().format("%B %-d, %Y").to_string(),
        };

        self.storage.store_message(&entry).await?;
        info!("Guestbook message added by {}", entry.name);

        Ok(Some(entry))
    }

    /// All messages, newest first
    pub async fn messages(&self) -> Result<Vec<GuestbookMessage>> {
        self.storage.list_messages().await
    }
}
