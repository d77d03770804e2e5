//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use shared::{Booking, GuestbookMessage, RsvpEntry};

/// Trait defining the interface for booking storage operations
///
/// Implementations must keep the persisted booking list and the booked-slot
/// key set in sync on every mutation: a slot key exists exactly when an
/// active booking references that (date, time) pair.
#[async_trait]
pub trait BookingStorage: Send + Sync {
    /// Store a new booking and register its slot key
    async fn store_booking(&self, booking: &Booking) -> Result<()>;

    /// List all bookings in stored (creation) order
    async fn list_bookings(&self) -> Result<Vec<Booking>>;

    /// The set of occupied slot keys, format `YYYY-MM-DD-HH:MM`
    async fn booked_slot_keys(&self) -> Result<Vec<String>>;

    /// Delete the booking at the given position and free its slot key.
    /// The key is reconstructed from the removed booking's date and time,
    /// never from the index. Returns the removed booking, or `None` when
    /// the index is out of range.
    async fn delete_booking(&self, index: usize) -> Result<Option<Booking>>;

    /// Remove every booking and every slot key
    async fn clear_all(&self) -> Result<()>;
}

/// Trait defining the interface for guestbook storage operations
#[async_trait]
pub trait GuestbookStorage: Send + Sync {
    /// Store a new message at the front of the list (newest first)
    async fn store_message(&self, message: &GuestbookMessage) -> Result<()>;

    /// List all messages, newest first
    async fn list_messages(&self) -> Result<Vec<GuestbookMessage>>;
}

/// Trait defining the interface for RSVP storage operations
#[async_trait]
pub trait RsvpStorage: Send + Sync {
    /// Append an RSVP to the event list and remember it as this
    /// session's own entry
    async fn store_rsvp(&self, entry: &RsvpEntry) -> Result<()>;

    /// List all RSVPs in submission order
    async fn list_rsvps(&self) -> Result<Vec<RsvpEntry>>;

    /// This session's own RSVP, if one was submitted
    async fn my_rsvp(&self) -> Result<Option<RsvpEntry>>;
}
