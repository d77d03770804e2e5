use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use shared::Booking;

use super::connection::{JsonConnection, BOOKED_SLOTS_FILE, BOOKINGS_FILE};
use crate::storage::BookingStorage;

/// JSON-file-backed booking repository.
///
/// The booking list is the source of truth; the booked-slot key file is
/// regenerated from the full list on every mutation, so the two stores
/// cannot drift apart even if an earlier run left them inconsistent.
#[derive(Clone)]
pub struct BookingRepository {
    connection: JsonConnection,
}

impl BookingRepository {
    /// Create a new JSON booking repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Write the booking list and its derived slot-key set as one
    /// logical unit
    fn write_bookings(&self, bookings: &[Booking]) -> Result<()> {
        let slot_keys: Vec<String> = bookings.iter().map(|b| b.slot_key()).collect();

        self.connection.write_list(BOOKINGS_FILE, bookings)?;
        self.connection.write_list(BOOKED_SLOTS_FILE, &slot_keys)?;

        Ok(())
    }
}

#[async_trait]
impl BookingStorage for BookingRepository {
    async fn store_booking(&self, booking: &Booking) -> Result<()> {
        info!("Storing booking {} for slot {}", booking.id, booking.slot_key());

        let mut bookings: Vec<Booking> = self.connection.read_list(BOOKINGS_FILE)?;
        bookings.push(booking.clone());
        self.write_bookings(&bookings)?;

        info!("Successfully stored booking {}", booking.id);
        Ok(())
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.connection.read_list(BOOKINGS_FILE)
    }

    async fn booked_slot_keys(&self) -> Result<Vec<String>> {
        self.connection.read_list(BOOKED_SLOTS_FILE)
    }

    async fn delete_booking(&self, index: usize) -> Result<Option<Booking>> {
        let mut bookings: Vec<Booking> = self.connection.read_list(BOOKINGS_FILE)?;

        if index >= bookings.len() {
            warn!(
                "Booking index {} out of range (have {} bookings), nothing deleted",
                index,
                bookings.len()
            );
            return Ok(None);
        }

        let removed = bookings.remove(index);
        info!("Cancelling booking {} and freeing slot {}", removed.id, removed.slot_key());

        self.write_bookings(&bookings)?;

        Ok(Some(removed))
    }

    async fn clear_all(&self) -> Result<()> {
        info!("Clearing all bookings and booked slots");
        self.write_bookings(&[])
    }
}
