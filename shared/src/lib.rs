use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A confirmed appointment booking.
///
/// Booking ID format: epoch millis at creation time, bumped to stay strictly
/// monotonic when two bookings land in the same millisecond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    /// Client name as entered on the form (trimmed)
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Which service package was booked
    pub service: ServiceType,
    /// How the session is delivered
    pub modality: SessionModality,
    /// Free-text notes from the client (may be empty)
    pub notes: String,
    /// Calendar date of the session
    pub date: NaiveDate,
    /// Wall-clock start time of the session
    pub time: NaiveTime,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl Booking {
    /// The key under which this booking occupies the booked-slot set,
    /// format `YYYY-MM-DD-HH:MM`.
    pub fn slot_key(&self) -> String {
        slot_key(self.date, self.time)
    }
}

/// Build the booked-slot set key for a (date, time) pair: `YYYY-MM-DD-HH:MM`.
pub fn slot_key(date: NaiveDate, time: NaiveTime) -> String {
    format!("{}-{}", date.format("%Y-%m-%d"), time.format("%H:%M"))
}

/// Service package offered on the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Individual,
    Monthly,
    Quarterly,
}

impl ServiceType {
    /// Human-readable name used in confirmation messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceType::Individual => "Individual Session",
            ServiceType::Monthly => "Monthly Package",
            ServiceType::Quarterly => "Quarterly Program",
        }
    }

    /// Parse the form value ("individual", "monthly", "quarterly")
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "individual" => Some(ServiceType::Individual),
            "monthly" => Some(ServiceType::Monthly),
            "quarterly" => Some(ServiceType::Quarterly),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How a booked session is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionModality {
    #[serde(rename = "in-person")]
    InPerson,
    Online,
}

impl SessionModality {
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionModality::InPerson => "In person",
            SessionModality::Online => "Online (Zoom)",
        }
    }

    /// Parse the form value ("in-person", "online")
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in-person" => Some(SessionModality::InPerson),
            "online" => Some(SessionModality::Online),
            _ => None,
        }
    }
}

impl fmt::Display for SessionModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classification of a generated time slot. Exactly one state holds per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    /// Free and clickable
    Available,
    /// Occupied by an active booking; rendered disabled.
    /// Takes precedence over Past for slots that are both.
    Booked,
    /// The slot's full date+time is strictly before the current moment
    Past,
}

/// A single classified time slot within a day column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotView {
    pub time: NaiveTime,
    pub status: SlotStatus,
    /// Whether this slot is the current session selection
    pub selected: bool,
}

/// One visible day in the calendar week, with its full slot list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlotView>,
}

/// The classified view of one displayed week.
///
/// `days` contains only days that fall on an allowed weekday and are not
/// before today; a week with zero visible days is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarWeek {
    /// Monday of the displayed week
    pub week_start: NaiveDate,
    pub days: Vec<DaySlots>,
}

/// Transient per-session slot selection. At most one exists; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSlot {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Raw booking form input, fields already trimmed by the form reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Raw service form value; empty string when nothing was chosen
    pub service: String,
    /// Raw modality form value; empty string when nothing was chosen
    pub modality: String,
    pub notes: String,
}

/// Static schedule configuration for the slot generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Bookable hours in display order (24h wall-clock times)
    pub hours: Vec<NaiveTime>,
    /// Weekdays on which sessions can be booked
    pub weekdays: Vec<chrono::Weekday>,
    /// Session length, used for calendar export
    pub session_duration_minutes: i64,
    /// How far ahead the calendar is meant to be browsed
    pub days_ahead: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        use chrono::Weekday::*;
        let hour = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        Self {
            hours: vec![
                hour(9),
                hour(10),
                hour(11),
                hour(12),
                hour(14),
                hour(15),
                hour(16),
                hour(17),
                hour(18),
            ],
            weekdays: vec![Mon, Tue, Wed, Thu, Fri],
            session_duration_minutes: 60,
            days_ahead: 14,
        }
    }
}

/// Why a booking submission was rejected.
///
/// Checks run in declaration order and the first failure wins; no error
/// accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingValidationError {
    /// No calendar slot is currently selected
    NoSlotSelected,
    /// A required field is empty after trimming
    MissingFields,
    InvalidEmail,
    InvalidPhone,
    /// The selected slot was booked between classification and submit
    SlotUnavailable,
}

/// A guestbook entry. Append-only; newest entries are listed first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestbookMessage {
    /// Epoch millis at creation time
    pub id: i64,
    pub name: String,
    pub message: String,
    /// Human-readable creation date
    pub date: String,
}

/// Whether an RSVP confirms or declines attendance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpAttendance {
    Yes,
    No,
}

/// An event RSVP record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsvpEntry {
    pub name: String,
    pub email: String,
    /// Optional; empty string when not provided
    pub phone: String,
    /// Number of accompanying guests
    pub guests: u32,
    pub attending: RsvpAttendance,
    /// Dietary restrictions; empty string when none
    pub dietary: String,
    /// Free-text message to the hosts; empty string when none
    pub message: String,
    /// Submission timestamp (RFC 3339)
    pub timestamp: String,
}

/// Aggregated RSVP numbers for the event organizers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpStats {
    pub total: usize,
    pub attending: usize,
    pub not_attending: usize,
    pub total_guests: u32,
    pub dietary_restrictions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_key_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        let time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();

        assert_eq!(slot_key(date, time), "2025-01-07-10:00");
    }

    #[test]
    fn test_service_type_parse() {
        assert_eq!(ServiceType::parse("individual"), Some(ServiceType::Individual));
        assert_eq!(ServiceType::parse("monthly"), Some(ServiceType::Monthly));
        assert_eq!(ServiceType::parse("quarterly"), Some(ServiceType::Quarterly));
        assert_eq!(ServiceType::parse("weekly"), None);
        assert_eq!(ServiceType::parse(""), None);
    }

    #[test]
    fn test_session_modality_parse() {
        assert_eq!(SessionModality::parse("in-person"), Some(SessionModality::InPerson));
        assert_eq!(SessionModality::parse("online"), Some(SessionModality::Online));
        assert_eq!(SessionModality::parse("hybrid"), None);
    }

    #[test]
    fn test_booking_serialization_round_trip() {
        let booking = Booking {
            id: 1736244000000,
            name: "Ana Client".to_string(),
            email: "ana@example.com".to_string(),
            phone: "+34 600 111 222".to_string(),
            service: ServiceType::Individual,
            modality: SessionModality::Online,
            notes: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            created_at: "2025-01-06T09:00:00+00:00".to_string(),
        };

        let json = serde_json::to_string(&booking).unwrap();
        let back: Booking = serde_json::from_str(&json).unwrap();

        assert_eq!(back, booking);
        assert_eq!(back.slot_key(), "2025-01-07-10:00");
    }

    #[test]
    fn test_default_schedule_config() {
        let config = ScheduleConfig::default();

        assert_eq!(config.hours.len(), 9);
        assert_eq!(config.weekdays.len(), 5);
        assert_eq!(config.session_duration_minutes, 60);
        // Lunch hour (13:00) is not bookable
        assert!(!config.hours.contains(&NaiveTime::from_hms_opt(13, 0, 0).unwrap()));
    }
}
