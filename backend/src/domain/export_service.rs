//! Calendar export: renders a booking as a downloadable iCalendar event.

use chrono::{Duration, NaiveDateTime, Utc};
use shared::{Booking, ScheduleConfig, SessionModality};

/// Export service that turns bookings into VCALENDAR documents
#[derive(Clone)]
pub struct ExportService {
    config: ScheduleConfig,
}

impl ExportService {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// Render a booking as an iCalendar (RFC 5545) document
    pub fn booking_to_ics(&self, booking: &Booking) -> String {
        let start = booking.date.and_time(booking.time);
        let end = start + Duration::minutes(self.config.session_duration_minutes);

        let location = match booking.modality {
            SessionModality::Online => "Online - Zoom",
            SessionModality::InPerson => "In person",
        };

        [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            "PRODID:-//Booking Tracker//EN".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}@booking-tracker", booking.id),
            format!("DTSTAMP:{}", format_ics(Utc::now().naive_utc())),
            format!("DTSTART:{}", format_ics(start)),
            format!("DTEND:{}", format_ics(end)),
            "SUMMARY:Coaching session".to_string(),
            format!(
                "DESCRIPTION:Service: {}\\nModality: {}",
                booking.service.display_name(),
                booking.modality.display_name()
            ),
            format!("LOCATION:{}", location),
            "STATUS:CONFIRMED".to_string(),
            "END:VEVENT".to_string(),
            "END:VCALENDAR".to_string(),
        ]
        .join("\r\n")
    }

    /// Suggested file name for the exported event
    pub fn export_file_name(&self, booking: &Booking) -> String {
        format!("coaching-session-{}.ics", booking.date)
    }
}

fn format_ics(datetime: NaiveDateTime) -> String {
    datetime.format("%Y%m%dT%H%M%SZ").to_string()
}
