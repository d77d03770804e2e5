use anyhow::Result;
use async_trait::async_trait;
use log::info;
use shared::RsvpEntry;

use super::connection::{JsonConnection, MY_RSVP_FILE, RSVPS_FILE};
use crate::storage::RsvpStorage;

/// JSON-file-backed RSVP repository.
///
/// Every submission is appended to the event list; the most recent one is
/// additionally kept as this session's own entry.
#[derive(Clone)]
pub struct RsvpRepository {
    connection: JsonConnection,
}

impl RsvpRepository {
    /// Create a new JSON RSVP repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl RsvpStorage for RsvpRepository {
    async fn store_rsvp(&self, entry: &RsvpEntry) -> Result<()> {
        info!("Storing RSVP from {} ({:?})", entry.name, entry.attending);

        let mut rsvps: Vec<RsvpEntry> = self.connection.read_list(RSVPS_FILE)?;
        rsvps.push(entry.clone());
        self.connection.write_list(RSVPS_FILE, &rsvps)?;

        self.connection.write_record(MY_RSVP_FILE, entry)?;

        Ok(())
    }

    async fn list_rsvps(&self) -> Result<Vec<RsvpEntry>> {
        self.connection.read_list(RSVPS_FILE)
    }

    async fn my_rsvp(&self) -> Result<Option<RsvpEntry>> {
        self.connection.read_record(MY_RSVP_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RsvpAttendance;

    fn test_rsvp(name: &str, attending: RsvpAttendance) -> RsvpEntry {
        RsvpEntry {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: String::new(),
            guests: 1,
            attending,
            dietary: String::new(),
            message: String::new(),
            timestamp: "2025-01-06T09:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_appends_and_tracks_own_entry() {
        let dir = tempfile::tempdir().unwrap();
        let repo = RsvpRepository::new(JsonConnection::new(dir.path()).unwrap());

        assert!(repo.my_rsvp().await.unwrap().is_none());

        repo.store_rsvp(&test_rsvp("Alice", RsvpAttendance::Yes)).await.unwrap();
        repo.store_rsvp(&test_rsvp("Bob", RsvpAttendance::No)).await.unwrap();

        let rsvps = repo.list_rsvps().await.unwrap();
        assert_eq!(rsvps.len(), 2);

        // The session's own entry tracks the latest submission
        let mine = repo.my_rsvp().await.unwrap().unwrap();
        assert_eq!(mine.name, "Bob");
    }
}
