//! Calendar-event specification handed to a scheduling collaborator.
//!
//! The core only produces the plain data a calendar-event creator needs:
//! title, description, a start timestamp, an end one hour later, and the
//! fixed timezone label. Actual remote scheduling is out of scope. With the
//! `calendar` feature the event can also be rendered as an iCalendar document.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Fixed timezone label for produced events.
pub const EVENT_TIMEZONE: &str = "America/Guayaquil";

/// Event duration.
const EVENT_DURATION_HOURS: i64 = 1;

/// Plain-data calendar event, one per analyzed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub timezone: String,
}

impl EventSpec {
    /// Build an event starting at midnight of `date`, ending one hour later.
    pub fn new(title: String, description: String, date: NaiveDate) -> Self {
        let start = date.and_time(chrono::NaiveTime::MIN);
        Self {
            title,
            description,
            start,
            end: start + Duration::hours(EVENT_DURATION_HOURS),
            timezone: EVENT_TIMEZONE.to_string(),
        }
    }

    /// Render as an iCalendar document.
    #[cfg(feature = "calendar")]
    pub fn to_ics(&self) -> String {
        use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};

        let event = Event::new()
            .summary(&self.title)
            .description(&self.description)
            .starts(CalendarDateTime::WithTimezone {
                date_time: self.start,
                tzid: self.timezone.clone(),
            })
            .ends(CalendarDateTime::WithTimezone {
                date_time: self.end,
                tzid: self.timezone.clone(),
            })
            .done();

        Calendar::new().push(event).done().to_string()
    }
}
