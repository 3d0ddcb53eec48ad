//! Accepted construction inputs

use super::DateTime;
use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use std::borrow::Cow;
use std::time::SystemTime;

/// Anything a [`DateTime`] can be built from.
///
/// `Now` and `Null` are deliberately distinct: an absent value means the
/// current instant while an explicit null produces an invalid date. `None`
/// converts to `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput<'a> {
    Now,
    Null,
    Text(Cow<'a, str>),
    /// Milliseconds since the Unix epoch
    Millis(i64),
    System(SystemTime),
    /// An instant already resolved by chrono
    Instant(chrono::DateTime<chrono::Utc>),
    /// Wall-clock date and time, read in the target calendar mode
    Wall(NaiveDateTime),
    Value(DateTime),
}

impl From<()> for DateInput<'_> {
    fn from(_: ()) -> Self {
        DateInput::Now
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        DateInput::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(value: &'a String) -> Self {
        DateInput::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for DateInput<'_> {
    fn from(value: String) -> Self {
        DateInput::Text(Cow::Owned(value))
    }
}

impl From<i64> for DateInput<'_> {
    fn from(value: i64) -> Self {
        DateInput::Millis(value)
    }
}

impl From<SystemTime> for DateInput<'_> {
    fn from(value: SystemTime) -> Self {
        DateInput::System(value)
    }
}

impl<Tz: TimeZone> From<chrono::DateTime<Tz>> for DateInput<'_> {
    fn from(value: chrono::DateTime<Tz>) -> Self {
        DateInput::Instant(value.with_timezone(&chrono::Utc))
    }
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::Wall(value)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(value: NaiveDate) -> Self {
        value.and_hms_opt(0, 0, 0).map_or(DateInput::Null, DateInput::Wall)
    }
}

impl From<DateTime> for DateInput<'_> {
    fn from(value: DateTime) -> Self {
        DateInput::Value(value)
    }
}

impl From<&DateTime> for DateInput<'_> {
    fn from(value: &DateTime) -> Self {
        DateInput::Value(*value)
    }
}

impl<'a, T: Into<DateInput<'a>>> From<Option<T>> for DateInput<'a> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => DateInput::Null,
        }
    }
}
