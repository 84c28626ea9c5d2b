//! Calendar events with a derived, half-open time interval.
//!
//! An [`Event`] is validated once at construction and never changes its date,
//! time, or interval afterwards. Only the ID is mutable, and only the owning
//! collection is expected to assign it.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_EVENT_DURATION_MINUTES;
use crate::error::{Result, ScheduleError};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A unique campus event.
///
/// Equality is structural over title, date, time, location, and ID. The
/// interval bounds are derived from date and time, so they are not compared
/// separately. Comparing against anything other than an `Event` does not
/// type-check.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    id: Option<u64>,
    title: String,
    location: String,
    date: String,
    time: String,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
}

impl Event {
    /// Create an event lasting the default duration.
    ///
    /// # Errors
    /// Returns `ScheduleError::Format` if `date` is not `YYYY-MM-DD` or `time`
    /// is not `HH:MM`.
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self> {
        Self::with_duration(
            title,
            date,
            time,
            location,
            Duration::minutes(DEFAULT_EVENT_DURATION_MINUTES),
        )
    }

    /// Create an event lasting `duration`.
    ///
    /// # Errors
    /// Returns `ScheduleError::Format` for an unparseable date or time, and
    /// `ScheduleError::TypeMismatch` for a non-positive duration.
    pub fn with_duration(
        title: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        location: impl Into<String>,
        duration: Duration,
    ) -> Result<Self> {
        let date = date.into();
        let time = time.into();

        if duration <= Duration::zero() {
            return Err(ScheduleError::TypeMismatch(format!(
                "event duration must be positive, got {} minutes",
                duration.num_minutes()
            )));
        }

        let format_error = || ScheduleError::Format {
            date: date.clone(),
            time: time.clone(),
        };
        let start_time = NaiveDateTime::parse_from_str(&format!("{date} {time}"), DATETIME_FORMAT)
            .map_err(|_| format_error())?;
        let end_time = start_time
            .checked_add_signed(duration)
            .ok_or_else(format_error)?;

        Ok(Self {
            id: None,
            title: title.into(),
            location: location.into(),
            date,
            time,
            start_time,
            end_time,
        })
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Assign the event ID.
    ///
    /// Accepts any integer type; values that do not fit a non-negative ID
    /// (e.g. `-1_i64`) are rejected without changing the current ID.
    pub fn set_id<I>(&mut self, value: I) -> Result<()>
    where
        I: TryInto<u64> + fmt::Display + Copy,
    {
        let id = value.try_into().map_err(|_| {
            ScheduleError::TypeMismatch(format!("Cannot set ID to {value}"))
        })?;
        self.id = Some(id);
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    /// Whether the two events overlap in time.
    ///
    /// Intervals are half-open: an event ending at 10:00 does not collide with
    /// one starting at 10:00. Identical intervals always collide.
    pub fn collides_with(&self, other: &Event) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.date == other.date
            && self.time == other.time
            && self.location == other.location
            && self.id == other.id
    }
}

impl Eq for Event {}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "[{id}] ")?,
            None => write!(f, "[-] ")?,
        }
        write!(
            f,
            "{} {} | {} | {}",
            self.date, self.time, self.title, self.location
        )
    }
}

/// An unvalidated event record, as read from JSON input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub location: String,
}

impl EventDraft {
    /// Validate the draft into an [`Event`] lasting `duration`.
    pub fn into_event(self, duration: Duration) -> Result<Event> {
        Event::with_duration(self.title, self.date, self.time, self.location, duration)
    }
}
