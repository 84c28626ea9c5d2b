//! Static configuration consumed by events and collections.
//!
//! The core never reads files; callers build a [`SchedulerConfig`] (usually from
//! JSON) and hand its values to constructors.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Slots allocated by a new array collection.
pub const DEFAULT_CAPACITY: usize = 10;

/// Length of every event, in minutes.
pub const DEFAULT_EVENT_DURATION_MINUTES: i64 = 60;

/// First ID handed out by a new collection.
pub const INITIAL_ID: u64 = 1;

/// Tunables shared by the collections and event construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub initial_capacity: usize,
    pub event_duration_minutes: i64,
    pub initial_id: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            event_duration_minutes: DEFAULT_EVENT_DURATION_MINUTES,
            initial_id: INITIAL_ID,
        }
    }
}

impl SchedulerConfig {
    /// Parse a JSON document. Missing fields fall back to their defaults.
    ///
    /// ```
    /// use scheduler_core::SchedulerConfig;
    ///
    /// let config = SchedulerConfig::from_json_str(r#"{"initial_capacity": 4}"#).unwrap();
    /// assert_eq!(config.initial_capacity, 4);
    /// assert_eq!(config.event_duration_minutes, 60);
    /// ```
    ///
    /// # Errors
    /// `Config` for malformed JSON, `TypeMismatch` for an event duration that
    /// is not a positive, representable number of minutes.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.event_duration()?;
        Ok(config)
    }

    /// The configured event length as a `chrono::Duration`.
    ///
    /// # Errors
    /// `TypeMismatch` if the minute count is zero, negative, or too large for
    /// `chrono::Duration`.
    pub fn event_duration(&self) -> Result<Duration> {
        Duration::try_minutes(self.event_duration_minutes)
            .filter(|duration| *duration > Duration::zero())
            .ok_or_else(|| {
                ScheduleError::TypeMismatch(format!(
                    "event_duration_minutes must be a positive number of minutes, got {}",
                    self.event_duration_minutes
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = SchedulerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SchedulerConfig::default());
        assert_eq!(config.event_duration().unwrap(), Duration::hours(1));
    }

    #[test]
    fn malformed_document_is_config_error() {
        let err = SchedulerConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, crate::ScheduleError::Config(_)));
    }

    #[test]
    fn out_of_range_duration_is_rejected_on_parse() {
        for minutes in [i64::MAX, i64::MIN, 0, -30] {
            let json = format!(r#"{{"event_duration_minutes": {minutes}}}"#);
            let err = SchedulerConfig::from_json_str(&json).unwrap_err();
            assert!(matches!(err, ScheduleError::TypeMismatch(_)), "{minutes}: {err}");
        }
    }

    #[test]
    fn out_of_range_duration_is_an_error_not_a_panic() {
        let config = SchedulerConfig {
            event_duration_minutes: i64::MAX,
            ..SchedulerConfig::default()
        };
        assert!(config.event_duration().is_err());
    }
}
