//! Booking submission and cancellation logic.
//!
//! Validation is fail-fast: checks run in a fixed order and the first
//! failure is reported. Successful submissions write the booking and its
//! slot key as one unit and clear the session's selection.

use anyhow::Result;
use chrono::Utc;
use log::info;
use shared::{
    Booking, BookingRequest, BookingValidationError, SelectedSlot, ServiceType,
    SessionModality,
};
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::selection::SelectionService;
use crate::domain::validation::{is_valid_email, is_valid_phone};
use crate::io::ConfirmationPrompt;
use crate::storage::BookingStorage;

/// Why a submission or cancellation did not go through
#[derive(Debug, Error)]
pub enum BookingError {
    /// The form input was rejected; the selection is left untouched
    #[error("{}", validation_message(.0))]
    Validation(BookingValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// User-facing message for a validation failure
pub fn validation_message(error: &BookingValidationError) -> &'static str {
    match error {
        BookingValidationError::NoSlotSelected => "Please select a time slot in the calendar.",
        BookingValidationError::MissingFields => "Please complete all required fields.",
        BookingValidationError::InvalidEmail => "Please enter a valid email address.",
        BookingValidationError::InvalidPhone => "Please enter a valid phone number.",
        BookingValidationError::SlotUnavailable => {
            "That time slot is no longer available. Please pick another one."
        }
    }
}

/// Booking service that handles submission, cancellation and listing
#[derive(Clone)]
pub struct BookingService<S: BookingStorage> {
    storage: S,
}

impl<S: BookingStorage> BookingService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Validate form input against the current selection.
    ///
    /// Check order: slot selected, required fields present, email shape,
    /// phone shape. First failure wins.
    pub fn validate(
        selection: Option<SelectedSlot>,
        request: &BookingRequest,
    ) -> Result<(SelectedSlot, ServiceType, SessionModality), BookingValidationError> {
        let slot = selection.ok_or(BookingValidationError::NoSlotSelected)?;

        let required = [
            request.name.trim(),
            request.email.trim(),
            request.phone.trim(),
            request.service.trim(),
            request.modality.trim(),
        ];
        if required.iter().any(|f| f.is_empty()) {
            return Err(BookingValidationError::MissingFields);
        }

        // An unknown service/modality value means nothing was actually
        // chosen on the form
        let service = ServiceType::parse(request.service.trim())
            .ok_or(BookingValidationError::MissingFields)?;
        let modality = SessionModality::parse(request.modality.trim())
            .ok_or(BookingValidationError::MissingFields)?;

        if !is_valid_email(request.email.trim()) {
            return Err(BookingValidationError::InvalidEmail);
        }
        if !is_valid_phone(request.phone.trim()) {
            return Err(BookingValidationError::InvalidPhone);
        }

        Ok((slot, service, modality))
    }

    /// Submit a booking for the currently selected slot.
    ///
    /// On success the selection is cleared; on any failure it is left
    /// untouched so the user can correct the form and resubmit. The slot is
    /// re-checked against persisted state at submit time, so a rapid double
    /// submission cannot create two bookings for the same slot.
    pub async fn submit_booking(
        &self,
        selection: &SelectionService,
        request: &BookingRequest,
    ) -> Result<Booking, BookingError> {
        let (slot, service, modality) =
            Self::validate(selection.current(), request).map_err(BookingError::Validation)?;

        let booked = self.booked_slot_keys().await?;
        let key = shared::slot_key(slot.date, slot.time);
        if booked.contains(&key) {
            return Err(BookingError::Validation(BookingValidationError::SlotUnavailable));
        }

        let booking = Booking {
            id: self.next_booking_id().await?,
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            service,
            modality,
            notes: request.notes.trim().to_string(),
            date: slot.date,
            time: slot.time,
            created_at: Utc::now().to_rfc3339(),
        };

        self.storage.store_booking(&booking).await?;
        selection.clear();

        info!("Booked slot {} for {}", key, booking.name);
        Ok(booking)
    }

    /// Next booking id: epoch millis at creation, bumped past any existing
    /// id so ids stay strictly monotonic even when two submissions land in
    /// the same millisecond.
    async fn next_booking_id(&self) -> Result<i64> {
        let now_ms = Utc::now().timestamp_millis();
        let max_id = self
            .storage
            .list_bookings()
            .await?
            .iter()
            .map(|b| b.id)
            .max()
            .unwrap_or(0);
        Ok(now_ms.max(max_id + 1))
    }

    /// Cancel the booking at the given list position.
    ///
    /// Asks the confirmation collaborator first; a declined prompt leaves
    /// everything unchanged. Returns the cancelled booking when one was
    /// removed.
    pub async fn cancel_booking(
        &self,
        index: usize,
        prompt: &dyn ConfirmationPrompt,
    ) -> Result<Option<Booking>> {
        if !prompt.confirm("Are you sure you want to cancel this booking?") {
            info!("Cancellation of booking index {} declined", index);
            return Ok(None);
        }

        self.storage.delete_booking(index).await
    }

    /// Remove every booking after explicit confirmation. Returns whether
    /// the wipe happened.
    pub async fn clear_all_bookings(&self, prompt: &dyn ConfirmationPrompt) -> Result<bool> {
        if !prompt.confirm(
            "Are you sure you want to delete all bookings? This action cannot be undone.",
        ) {
            return Ok(false);
        }

        self.storage.clear_all().await?;
        Ok(true)
    }

    /// All bookings in creation order
    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.storage.list_bookings().await
    }

    /// The persisted booked-slot key set
    pub async fn booked_slot_keys(&self) -> Result<HashSet<String>> {
        Ok(self.storage.booked_slot_keys().await?.into_iter().collect())
    }

    /// Confirmation text presented after a successful booking
    pub fn confirmation_message(&self, booking: &Booking) -> String {
        format!(
            "Your booking has been confirmed.\n\n\
             Date: {}\n\
             Time: {}\n\
             Service: {}\n\
             Modality: {}\n\n\
             We will send a confirmation email to {} with all the details.",
            booking.date.format("%A, %B %-d, %Y"),
            booking.time.format("%H:%M"),
            booking.service.display_name(),
            booking.modality.display_name(),
            booking.email,
        )
    }
}
