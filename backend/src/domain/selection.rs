//! Selection state for the booking calendar.
//!
//! At most one slot is selected per session. The selection lives in memory
//! only and is never persisted.

use log::info;
use shared::{CalendarWeek, SelectedSlot, SlotStatus};
use std::sync::{Arc, Mutex};

/// Holds the session's current slot selection
#[derive(Clone)]
pub struct SelectionService {
    current: Arc<Mutex<Option<SelectedSlot>>>,
}

impl SelectionService {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// The currently selected slot, if any
    pub fn current(&self) -> Option<SelectedSlot> {
        *self.current.lock().unwrap()
    }

    /// Select a slot out of a classified week view.
    ///
    /// Only an Available slot can be selected; any prior selection is
    /// replaced. Returns whether the selection was made.
    pub fn select(&self, week: &CalendarWeek, slot: SelectedSlot) -> bool {
        let available = week
            .days
            .iter()
            .find(|d| d.date == slot.date)
            .and_then(|d| d.slots.iter().find(|s| s.time == slot.time))
            .map(|s| s.status == SlotStatus::Available)
            .unwrap_or(false);

        if !available {
            info!("Ignoring selection of unavailable slot {} {}", slot.date, slot.time);
            return false;
        }

        *self.current.lock().unwrap() = Some(slot);
        info!("Selected slot {} {}", slot.date, slot.time);
        true
    }

    /// Drop the current selection (explicit deselection or booking success)
    pub fn clear(&self) {
        *self.current.lock().unwrap() = None;
    }
}

impl Default for SelectionService {
    fn default() -> Self {
        Self::new()
    }
}
