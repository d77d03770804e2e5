//! RSVP domain logic: event attendance confirmations and organizer stats.

use anyhow::Result;
use chrono::Utc;
use log::info;
use shared::{RsvpAttendance, RsvpEntry, RsvpStats};
use thiserror::Error;

use crate::domain::validation::is_valid_email;
use crate::storage::RsvpStorage;

/// Raw RSVP form input, fields already trimmed by the form reader
#[derive(Debug, Clone, Default)]
pub struct RsvpRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Raw guest count field; empty or unparseable counts as zero
    pub guests: String,
    /// Raw attendance field ("yes" / "no")
    pub attending: String,
    pub dietary: String,
    pub message: String,
}

/// Why an RSVP submission was rejected
#[derive(Debug, Error)]
pub enum RsvpError {
    #[error("Please complete all required fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// RSVP service handling submissions and aggregate stats
#[derive(Clone)]
pub struct RsvpService<S: RsvpStorage> {
    storage: S,
}

impl<S: RsvpStorage> RsvpService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Submit an RSVP. Name, email and attendance are required; the guest
    /// count defaults to zero when absent or unparseable.
    pub async fn submit(&self, request: &RsvpRequest) -> Result<RsvpEntry, RsvpError> {
        let name = request.name.trim();
        let email = request.email.trim();

        let attending = match request.attending.trim() {
            "yes" => Some(RsvpAttendance::Yes),
            "no" => Some(RsvpAttendance::No),
            _ => None,
        };

        if name.is_empty() || email.is_empty() {
            return Err(RsvpError::MissingFields);
        }
        let attending = attending.ok_or(RsvpError::MissingFields)?;

        if !is_valid_email(email) {
            return Err(RsvpError::InvalidEmail);
        }

        let entry = RsvpEntry {
            name: name.to_string(),
            email: email.to_string(),
            phone: request.phone.trim().to_string(),
            guests: request.guests.trim().parse().unwrap_or(0),
            attending,
            dietary: request.dietary.trim().to_string(),
            message: request.message.trim().to_string(),
            timestamp: Utc::now().to_rfc3339(),
        };

        self.storage.store_rsvp(&entry).await?;
        info!("RSVP recorded for {} ({:?})", entry.name, entry.attending);

        Ok(entry)
    }

    /// All RSVPs in submission order
    pub async fn all_rsvps(&self) -> Result<Vec<RsvpEntry>> {
        self.storage.list_rsvps().await
    }

    /// This session's own RSVP, if one was submitted
    pub async fn my_rsvp(&self) -> Result<Option<RsvpEntry>> {
        self.storage.my_rsvp().await
    }

    /// Aggregate numbers for the event organizers
    pub async fn stats(&self) -> Result<RsvpStats> {
        let rsvps = self.storage.list_rsvps().await?;

        Ok(RsvpStats {
            total: rsvps.len(),
            attending: rsvps
                .iter()
                .filter(|r| r.attending == RsvpAttendance::Yes)
                .count(),
            not_attending: rsvps
                .iter()
                .filter(|r| r.attending == RsvpAttendance::No)
                .count(),
            total_guests: rsvps.iter().map(|r| r.guests).sum(),
            dietary_restrictions: rsvps.iter().filter(|r| !r.dietary.is_empty()).count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::{JsonConnection, RsvpRepository};

    fn setup_service() -> (RsvpService<RsvpRepository>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let connection = JsonConnection::new(dir.path()).unwrap();
        (RsvpService::new(RsvpRepository::new(connection)), dir)
    }

    fn request(name: &str, attending: &str, guests: &str, dietary: &str) -> RsvpRequest {
        RsvpRequest {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            attending: attending.to_string(),
            guests: guests.to_string(),
            dietary: dietary.to_string(),
            ..RsvpRequest::default()
        }
    }

    #[tokio::test]
    async fn test_valid_submission_is_stored() {
        let (service, _dir) = setup_service();

        let entry = service
            .submit(&request("Alice", "yes", "2", "vegetarian"))
            .await
            .unwrap();

        assert_eq!(entry.guests, 2);
        assert_eq!(entry.attending, RsvpAttendance::Yes);
        assert_eq!(service.all_rsvps().await.unwrap().len(), 1);
        assert_eq!(service.my_rsvp().await.unwrap().unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_missing_attendance_is_rejected() {
        let (service, _dir) = setup_service();

        let result = service.submit(&request("Alice", "", "1", "")).await;

        assert!(matches!(result, Err(RsvpError::MissingFields)));
        assert!(service.all_rsvps().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_email_is_rejected() {
        let (service, _dir) = setup_service();

        let mut req = request("Alice", "yes", "1", "");
        req.email = "not-an-email".to_string();

        assert!(matches!(service.submit(&req).await, Err(RsvpError::InvalidEmail)));
    }

    #[tokio::test]
    async fn test_unparseable_guest_count_defaults_to_zero() {
        let (service, _dir) = setup_service();

        let entry = service
            .submit(&request("Alice", "no", "lots", ""))
            .await
            .unwrap();

        assert_eq!(entry.guests, 0);
    }

    #[tokio::test]
    async fn test_stats_aggregation() {
        let (service, _dir) = setup_service();

        service.submit(&request("Alice", "yes", "2", "vegetarian")).await.unwrap();
        service.submit(&request("Bob", "yes", "1", "")).await.unwrap();
        service.submit(&request("Carol", "no", "0", "")).await.unwrap();

        let stats = service.stats().await.unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.attending, 2);
        assert_eq!(stats.not_attending, 1);
        assert_eq!(stats.total_guests, 3);
        assert_eq!(stats.dietary_restrictions, 1);
    }
}
