//! Schedule arguments for WINDOW and RECURRING commands

use chrono::{DateTime, NaiveTime, SecondsFormat, Utc, Weekday};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use super::catalog::{Schedule, TimeType};
use super::validation::ValidationError;

const WINDOW_TIME_FORMAT: &str = "%H:%M";

/// The `schedule_args` block of a command envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(serialize_with = "serialize_datetime")]
    pub start_datetime: DateTime<Utc>,
    #[serde(serialize_with = "serialize_datetime")]
    pub end_datetime: DateTime<Utc>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_window_time"
    )]
    pub window_start_time: Option<NaiveTime>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_window_time"
    )]
    pub window_end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_days")]
    pub days: Vec<Weekday>,
    pub time_type: TimeType,
}

impl ScheduleArgs {
    /// Run once, between `start` and `end`, inside the daily window
    pub fn window(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        window_start: NaiveTime,
        window_end: NaiveTime,
    ) -> Self {
        Self {
            name: None,
            start_datetime: start,
            end_datetime: end,
            window_start_time: Some(window_start),
            window_end_time: Some(window_end),
            days: Vec::new(),
            time_type: TimeType::default(),
        }
    }

    /// Repeat on `days` between `start` and `end`
    pub fn recurring(
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        days: impl IntoIterator<Item = Weekday>,
    ) -> Self {
        let mut days: Vec<Weekday> = days.into_iter().collect();
        days.sort_by_key(Weekday::num_days_from_monday);
        days.dedup();

        Self {
            name: Some(name.into()),
            start_datetime: start,
            end_datetime: end,
            window_start_time: None,
            window_end_time: None,
            days,
            time_type: TimeType::default(),
        }
    }

    /// Restrict a recurring schedule to a daily window
    pub fn with_window(mut self, window_start: NaiveTime, window_end: NaiveTime) -> Self {
        self.window_start_time = Some(window_start);
        self.window_end_time = Some(window_end);
        self
    }

    pub fn with_time_type(mut self, time_type: TimeType) -> Self {
        self.time_type = time_type;
        self
    }

    /// Check these arguments fit `schedule`
    pub fn validate_for(&self, schedule: Schedule) -> Result<(), ValidationError> {
        if self.end_datetime <= self.start_datetime {
            return Err(ValidationError::custom(
                "end_datetime",
                "must be later than start_datetime",
            ));
        }

        match (self.window_start_time, self.window_end_time) {
            (Some(start), Some(end)) if start == end => {
                return Err(ValidationError::custom(
                    "window_end_time",
                    "window must not be empty",
                ));
            }
            (Some(_), None) => return Err(ValidationError::missing("window_end_time")),
            (None, Some(_)) => return Err(ValidationError::missing("window_start_time")),
            _ => {}
        }

        match schedule {
            Schedule::Immediate => Err(ValidationError::custom(
                "schedule_args",
                "an IMMEDIATE command takes no schedule arguments",
            )),
            Schedule::Window if self.window_start_time.is_none() => {
                Err(ValidationError::missing("window_start_time"))
            }
            Schedule::Recurring if self.days.is_empty() => Err(ValidationError::missing("days")),
            Schedule::Recurring if self.name.as_deref().map_or(true, |n| n.trim().is_empty()) => {
                Err(ValidationError::missing("name"))
            }
            _ => Ok(()),
        }
    }
}

/// Parse a `HH:MM` window boundary
pub fn parse_window_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, WINDOW_TIME_FORMAT)
        .map_err(|_| ValidationError::invalid_value("window_time", value, "expected HH:MM"))
}

fn serialize_datetime<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn serialize_window_time<S: Serializer>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(time) => serializer.serialize_str(&time.format(WINDOW_TIME_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

fn serialize_days<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(days.len()))?;
    for day in days {
        seq.serialize_element(day_name(*day))?;
    }
    seq.end()
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
