use anyhow::Result;
use async_trait::async_trait;
use log::info;
use shared::GuestbookMessage;

use super::connection::{JsonConnection, GUESTBOOK_FILE};
use crate::storage::GuestbookStorage;

/// JSON-file-backed guestbook repository. Messages are stored newest first.
#[derive(Clone)]
pub struct GuestbookRepository {
    connection: JsonConnection,
}

impl GuestbookRepository {
    /// Create a new JSON guestbook repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl GuestbookStorage for GuestbookRepository {
    async fn store_message(&self, message: &GuestbookMessage) -> Result<()> {
        info!("Storing guestbook message {} from {}", message.id, message.name);

        let mut messages: Vec<GuestbookMessage> = self.connection.read_list(GUESTBOOK_FILE)?;
        messages.insert(0, message.clone());
        self.connection.write_list(GUESTBOOK_FILE, &messages)?;

        Ok(())
    }

    async fn list_messages(&self) -> Result<Vec<GuestbookMessage>> {
        self.connection.read_list(GUESTBOOK_FILE)
    }
}
