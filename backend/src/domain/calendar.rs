//! Calendar domain logic for the booking tracker.
//!
//! This module contains all business logic related to week generation,
//! date filtering, and slot classification. The UI should only handle
//! presentation concerns; all calendar computations and business rules
//! are handled here.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Weekday};
use log;
use shared::{slot_key, CalendarWeek, DaySlots, ScheduleConfig, SelectedSlot, SlotStatus, TimeSlotView};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Calendar service that handles week generation and slot classification
#[derive(Clone)]
pub struct CalendarService {
    config: ScheduleConfig,
    /// Monday of the currently displayed week.
    /// Kept in memory for navigation; never persisted.
    focus_week_start: Arc<Mutex<NaiveDate>>,
}

impl CalendarService {
    /// Create a new CalendarService focused on the current week
    pub fn new(config: ScheduleConfig) -> Self {
        Self::starting_from(config, Local::now().date_naive())
    }

    /// Create a new CalendarService focused on the week containing `today`
    pub fn starting_from(config: ScheduleConfig, today: NaiveDate) -> Self {
        Self {
            config,
            focus_week_start: Arc::new(Mutex::new(Self::week_start_of(today))),
        }
    }

    /// Monday of the week containing `date`. A Sunday rolls back six days.
    pub fn week_start_of(date: NaiveDate) -> NaiveDate {
        let offset = date.weekday().num_days_from_monday() as i64;
        date - Duration::days(offset)
    }

    /// Monday of the currently displayed week
    pub fn focus_week_start(&self) -> NaiveDate {
        *self.focus_week_start.lock().unwrap()
    }

    /// Shift the displayed week forward by seven days
    pub fn next_week(&self) -> NaiveDate {
        self.shift_focus(7)
    }

    /// Shift the displayed week back by seven days.
    ///
    /// No lower bound is enforced; the day filter already hides days before
    /// today, so navigating into an all-past week just yields zero days.
    pub fn previous_week(&self) -> NaiveDate {
        self.shift_focus(-7)
    }

    fn shift_focus(&self, days: i64) -> NaiveDate {
        let mut focus = self.focus_week_start.lock().unwrap();
        *focus = *focus + Duration::days(days);
        log::info!("Calendar focus moved to week of {}", *focus);
        *focus
    }

    /// Generate the classified view of the currently displayed week
    pub fn generate_week(
        &self,
        today: NaiveDate,
        now: NaiveDateTime,
        booked: &HashSet<String>,
        selection: Option<SelectedSlot>,
    ) -> CalendarWeek {
        classify_week(&self.config, self.focus_week_start(), today, now, booked, selection)
    }

    /// Weekdays on which sessions can be booked
    pub fn allowed_weekdays(&self) -> &[Weekday] {
        &self.config.weekdays
    }
}

/// Build the classified view of one week.
///
/// Pure projection of (config, booked set, clock, selection): days of the
/// 7-day window starting at `week_start` that fall on an allowed weekday
/// and are not strictly before `today` (date-only comparison), each carrying
/// the full configured hour list.
pub fn classify_week(
    config: &ScheduleConfig,
    week_start: NaiveDate,
    today: NaiveDate,
    now: NaiveDateTime,
    booked: &HashSet<String>,
    selection: Option<SelectedSlot>,
) -> CalendarWeek {
    let mut days = Vec::new();

    for offset in 0..7 {
        let date = week_start + Duration::days(offset);

        if !config.weekdays.contains(&date.weekday()) {
            continue;
        }
        if date < today {
            continue;
        }

        let slots = config
            .hours
            .iter()
            .map(|&time| TimeSlotView {
                time,
                status: classify_slot(date, time, booked, now),
                selected: selection == Some(SelectedSlot { date, time }),
            })
            .collect();

        days.push(DaySlots { date, slots });
    }

    CalendarWeek { week_start, days }
}

/// Classify a single (date, time) pair into exactly one slot state.
///
/// The booked check runs first: a slot that is both booked and elapsed
/// keeps its booked state.
pub fn classify_slot(
    date: NaiveDate,
    time: chrono::NaiveTime,
    booked: &HashSet<String>,
    now: NaiveDateTime,
) -> SlotStatus {
    if booked.contains(&slot_key(date, time)) {
        SlotStatus::Booked
    } else if date.and_time(time) < now {
        SlotStatus::Past
    } else {
        SlotStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn single_hour_config() -> ScheduleConfig {
        ScheduleConfig {
            hours: vec![time("09:00")],
            ..ScheduleConfig::default()
        }
    }

    #[test]
    fn test_week_start_alignment() {
        // Monday stays put
        assert_eq!(CalendarService::week_start_of(date("2025-01-06")), date("2025-01-06"));
        // Wednesday rolls back to Monday
        assert_eq!(CalendarService::week_start_of(date("2025-01-08")), date("2025-01-06"));
        // Sunday rolls back six days, not forward
        assert_eq!(CalendarService::week_start_of(date("2025-01-12")), date("2025-01-06"));
    }

    #[test]
    fn test_full_week_of_available_slots() {
        // Scenario: empty booked set, Monday 2025-01-06, Mon-Fri, one hour
        let today = date("2025-01-06");
        let now = today.and_time(time("08:00"));
        let week = classify_week(
            &single_hour_config(),
            today,
            today,
            now,
            &HashSet::new(),
            None,
        );

        assert_eq!(week.days.len(), 5);
        let statuses: Vec<SlotStatus> = week
            .days
            .iter()
            .flat_map(|d| d.slots.iter().map(|s| s.status))
            .collect();
        assert_eq!(statuses.len(), 5);
        assert!(statuses.iter().all(|s| *s == SlotStatus::Available));
    }

    #[test]
    fn test_days_before_today_are_hidden() {
        let today = date("2025-01-08"); // Wednesday
        let now = today.and_time(time("08:00"));
        let week = classify_week(
            &single_hour_config(),
            date("2025-01-06"),
            today,
            now,
            &HashSet::new(),
            None,
        );

        assert_eq!(week.days.len(), 3); // Wed, Thu, Fri
        assert!(week.days.iter().all(|d| d.date >= today));
    }

    #[test]
    fn test_weekend_days_are_never_shown() {
        let today = date("2025-01-06");
        let now = today.and_time(time("08:00"));
        let week = classify_week(
            &single_hour_config(),
            today,
            today,
            now,
            &HashSet::new(),
            None,
        );

        assert!(week
            .days
            .iter()
            .all(|d| !matches!(d.date.weekday(), Weekday::Sat | Weekday::Sun)));
    }

    #[test]
    fn test_fully_past_week_has_zero_days() {
        let today = date("2025-01-20");
        let now = today.and_time(time("08:00"));
        let week = classify_week(
            &single_hour_config(),
            date("2025-01-06"),
            today,
            now,
            &HashSet::new(),
            None,
        );

        assert!(week.days.is_empty());
    }

    #[test]
    fn test_booked_takes_precedence_over_past() {
        let booked: HashSet<String> = ["2025-01-06-09:00".to_string()].into_iter().collect();
        let now = date("2025-01-06").and_time(time("12:00")); // slot already elapsed

        let status = classify_slot(date("2025-01-06"), time("09:00"), &booked, now);
        assert_eq!(status, SlotStatus::Booked);
    }

    #[test]
    fn test_elapsed_unbooked_slot_is_past() {
        let now = date("2025-01-06").and_time(time("12:00"));

        let status = classify_slot(date("2025-01-06"), time("09:00"), &HashSet::new(), now);
        assert_eq!(status, SlotStatus::Past);
    }

    #[test]
    fn test_every_slot_gets_exactly_one_state() {
        let booked: HashSet<String> = ["2025-01-07-10:00".to_string()].into_iter().collect();
        let today = date("2025-01-06");
        let now = today.and_time(time("09:30"));
        let week = classify_week(
            &ScheduleConfig::default(),
            today,
            today,
            now,
            &booked,
            None,
        );

        // 5 days x 9 hours, each classified
        let slots: Vec<&TimeSlotView> = week.days.iter().flat_map(|d| d.slots.iter()).collect();
        assert_eq!(slots.len(), 45);
        assert!(slots
            .iter()
            .any(|s| s.status == SlotStatus::Booked));
        assert!(slots.iter().any(|s| s.status == SlotStatus::Past));
        assert!(slots.iter().any(|s| s.status == SlotStatus::Available));
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let booked: HashSet<String> =
            ["2025-01-07-10:00".to_string(), "2025-01-09-14:00".to_string()]
                .into_iter()
                .collect();
        let today = date("2025-01-06");
        let now = today.and_time(time("11:15"));
        let config = ScheduleConfig::default();

        let first = classify_week(&config, today, today, now, &booked, None);
        let second = classify_week(&config, today, today, now, &booked, None);

        assert_eq!(first, second);
    }

    #[test]
    fn test_week_navigation() {
        let service = CalendarService::starting_from(ScheduleConfig::default(), date("2025-01-08"));
        assert_eq!(service.focus_week_start(), date("2025-01-06"));

        assert_eq!(service.next_week(), date("2025-01-13"));
        assert_eq!(service.previous_week(), date("2025-01-06"));
        // Navigating behind today is allowed; the view just ends up empty
        assert_eq!(service.previous_week(), date("2024-12-30"));
    }

    #[test]
    fn test_selection_is_marked_in_view() {
        let today = date("2025-01-06");
        let now = today.and_time(time("08:00"));
        let selection = Some(SelectedSlot {
            date: date("2025-01-07"),
            time: time("10:00"),
        });
        let week = classify_week(
            &ScheduleConfig::default(),
            today,
            today,
            now,
            &HashSet::new(),
            selection,
        );

        let selected: Vec<(&NaiveDate, NaiveTime)> = week
            .days
            .iter()
            .flat_map(|d| d.slots.iter().filter(|s| s.selected).map(move |s| (&d.date, s.time)))
            .collect();

        assert_eq!(selected, vec![(&date("2025-01-07"), time("10:00"))]);
    }
}
