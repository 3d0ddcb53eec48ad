//! The `DateTime` value type
//!
//! A `DateTime` is an optional instant (millisecond precision) plus the
//! [`CalendarMode`] its calendar fields are read in. The instant is `None`
//! for values built from null or unparseable input; such values stay invalid
//! through every operation, compare as `false` and format as
//! `"Invalid Date"`.
//!
//! All operations return new values. Operations that depend on the language
//! (names, week start) come in pairs: `op` reads the active locale and
//! `op_in` takes one explicitly.

pub(crate) mod calendar;
pub mod format;
pub mod input;
pub(crate) mod parse;
pub mod unit;

pub use format::DateTimeFormat;
pub use input::DateInput;
pub use unit::{CalendarMode, Inclusion, Unit};

use crate::constants::{DEFAULT_FORMAT, INVALID_DATE, LOG_UNPARSEABLE_INPUT, MS_PER_DAY, MS_PER_WEEK};
use crate::error::{DateTimeError, Result};
use crate::locale::{self, Locale};
use calendar::{compose, days_into_week, fields, from_wall, offset_seconds, to_wall};
use chrono::{Datelike, NaiveDateTime, SubsecRound, TimeDelta, Timelike, Utc};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// An instant interpreted in a calendar mode, or an invalid date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    instant: Option<chrono::DateTime<Utc>>,
    mode: CalendarMode,
}

/// Build a local-mode value; text input is parsed flexibly
pub fn datetime<'a>(input: impl Into<DateInput<'a>>) -> DateTime {
    DateTime::new(input, None, CalendarMode::Local)
}

/// Build a local-mode value; text input follows `format`
pub fn datetime_with_format<'a>(input: impl Into<DateInput<'a>>, format: &str) -> DateTime {
    DateTime::new(input, Some(format), CalendarMode::Local)
}

/// Build a UTC-mode value; text input is parsed flexibly
pub fn datetime_utc<'a>(input: impl Into<DateInput<'a>>) -> DateTime {
    DateTime::new(input, None, CalendarMode::Utc)
}

/// Build a UTC-mode value; text input follows `format`
pub fn datetime_utc_with_format<'a>(input: impl Into<DateInput<'a>>, format: &str) -> DateTime {
    DateTime::new(input, Some(format), CalendarMode::Utc)
}

/// Parse `text` with `format`, accepting it only when formatting the result
/// with the same template gives back `text`
pub fn datetime_strict(text: &str, format: &str) -> DateTime {
    let parsed = datetime_with_format(text, format);
    if parsed.is_valid() && parsed.format(format) == text {
        parsed
    } else {
        DateTime::invalid()
    }
}

/// Move a weekend date to the closest weekday: forward to Monday when
/// `is_after`, back to Friday otherwise
pub fn avoid_weekend(date: &DateTime, is_after: bool) -> DateTime {
    date.next_weekday(is_after)
}

fn now_instant() -> chrono::DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn system_to_instant(time: SystemTime) -> Option<chrono::DateTime<Utc>> {
    let millis = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_millis()).ok()?,
        Err(before) => {
            // Round toward negative infinity so pre-epoch values truncate like post-epoch ones.
            let duration = before.duration();
            let whole = i64::try_from(duration.as_millis()).ok()?;
            let partial = i64::from(duration.subsec_nanos() % 1_000_000 != 0);
            -(whole + partial)
        }
    };
    chrono::DateTime::from_timestamp_millis(millis)
}

impl DateTime {
    /// The current instant in local mode
    pub fn now() -> Self {
        Self {
            instant: Some(now_instant()),
            mode: CalendarMode::Local,
        }
    }

    /// The current instant in UTC mode
    pub fn now_utc() -> Self {
        Self {
            instant: Some(now_instant()),
            mode: CalendarMode::Utc,
        }
    }

    /// An invalid date in local mode
    pub fn invalid() -> Self {
        Self {
            instant: None,
            mode: CalendarMode::Local,
        }
    }

    /// Build a value from any supported input
    ///
    /// `format` only applies to text input; month names in the text are
    /// matched against the active locale.
    pub fn new<'a>(input: impl Into<DateInput<'a>>, format: Option<&str>, mode: CalendarMode) -> Self {
        Self::new_in(input, format, mode, &locale::current())
    }

    /// Like [`DateTime::new`] with month names matched against `locale`
    pub fn new_in<'a>(input: impl Into<DateInput<'a>>, format: Option<&str>, mode: CalendarMode, locale: &Locale) -> Self {
        let instant = match input.into() {
            DateInput::Now => Some(now_instant()),
            DateInput::Null => None,
            DateInput::Text(text) => {
                let parsed = match format {
                    Some(format) => {
                        let now = to_wall(now_instant(), mode);
                        parse::parse_with_format(&text, format, mode, locale, now)
                    }
                    None => parse::parse_flexible(&text, mode),
                };
                if parsed.is_none() {
                    debug!("{}: {:?}", LOG_UNPARSEABLE_INPUT, text);
                }
                parsed
            }
            DateInput::Millis(millis) => chrono::DateTime::from_timestamp_millis(millis),
            DateInput::System(time) => system_to_instant(time),
            DateInput::Instant(instant) => Some(instant),
            DateInput::Wall(wall) => from_wall(wall, mode, None),
            DateInput::Value(value) => value.instant,
        };

        Self {
            instant: instant.map(|instant| instant.trunc_subsecs(3)),
            mode,
        }
    }

    fn with_instant(&self, instant: Option<chrono::DateTime<Utc>>) -> Self {
        Self {
            instant,
            mode: self.mode,
        }
    }

    fn wall(&self) -> Option<NaiveDateTime> {
        self.instant.map(|instant| to_wall(instant, self.mode))
    }

    /// Instant for edited wall-clock fields; a repeated local time keeps
    /// this value's UTC offset
    fn from_wall_clock(&self, wall: Option<NaiveDateTime>) -> Self {
        let preferred_offset = self.instant.map(|instant| offset_seconds(instant, self.mode));
        self.with_instant(wall.and_then(|wall| from_wall(wall, self.mode, preferred_offset)))
    }

    /// Rebuild from the current fields after `edit` changed some of them
    fn with_fields(&self, edit: impl FnOnce(&mut [i64; 7])) -> Self {
        let wall = self.wall().and_then(|wall| {
            let mut parts = fields(wall);
            edit(&mut parts);
            let [year, month0, day, hour, minute, second, millisecond] = parts;
            compose(year, month0, day, hour, minute, second, millisecond)
        });
        self.from_wall_clock(wall)
    }

    /// Move to another year and month, clamping the day to the target month
    fn with_year_month(&self, year: Option<i64>, month0: Option<i64>) -> Self {
        let wall = self.wall().and_then(|wall| {
            let [y, m, day, hour, minute, second, millisecond] = fields(wall);
            let first = compose(year.unwrap_or(y), month0.unwrap_or(m), 1, 0, 0, 0, 0)?;
            let last_day = first.date().num_days_in_month();
            compose(
                i64::from(first.year()),
                i64::from(first.month0()),
                day.min(i64::from(last_day)),
                hour,
                minute,
                second,
                millisecond,
            )
        });
        self.from_wall_clock(wall)
    }

    pub fn is_valid(&self) -> bool {
        self.instant.is_some()
    }

    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub fn is_utc(&self) -> bool {
        self.mode == CalendarMode::Utc
    }

    /// Same instant, read in local time
    pub fn to_local(&self) -> Self {
        Self {
            instant: self.instant,
            mode: CalendarMode::Local,
        }
    }

    /// Same instant, read in UTC
    pub fn to_utc(&self) -> Self {
        Self {
            instant: self.instant,
            mode: CalendarMode::Utc,
        }
    }

    fn in_mode(&self, mode: CalendarMode) -> Self {
        Self {
            instant: self.instant,
            mode,
        }
    }

    // Output

    /// Render with a token template using the active locale; an empty
    /// template renders the default `YYYY-MM-DDTHH:mm:ssZ`
    pub fn format(&self, template: impl AsRef<str>) -> String {
        self.format_in(template, &locale::current())
    }

    /// Render with a token template using `locale`
    pub fn format_in(&self, template: impl AsRef<str>, locale: &Locale) -> String {
        let Some(instant) = self.instant else {
            return INVALID_DATE.to_string();
        };
        let template = match template.as_ref() {
            "" => DEFAULT_FORMAT,
            other => other,
        };
        format::render(
            template,
            &format::Rendered {
                wall: to_wall(instant, self.mode),
                offset: offset_seconds(instant, self.mode),
                epoch_millis: instant.timestamp_millis(),
                locale,
            },
        )
    }

    /// Milliseconds since the Unix epoch
    pub fn value_of(&self) -> Option<i64> {
        self.instant.map(|instant| instant.timestamp_millis())
    }

    /// Whole seconds since the Unix epoch
    pub fn unix(&self) -> Option<i64> {
        self.instant.map(|instant| instant.timestamp())
    }

    pub fn to_date(&self) -> Option<SystemTime> {
        self.instant.map(SystemTime::from)
    }

    pub fn to_chrono(&self) -> Option<chrono::DateTime<Utc>> {
        self.instant
    }

    /// `YYYY-MM-DDTHH:mm:ss.SSSZ` in UTC
    pub fn to_iso_string(&self) -> Result<String> {
        self.instant
            .map(|instant| instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
            .ok_or(DateTimeError::InvalidDate("convert"))
    }

    // Arithmetic

    /// Shift by `amount` units
    ///
    /// Units up to an hour are exact durations. Days and weeks move the
    /// calendar date and keep the wall-clock time. Months and years clamp the
    /// day to the end of the target month.
    pub fn add(&self, amount: i64, unit: Unit) -> Self {
        let Some(instant) = self.instant else {
            return *self;
        };
        match unit.fixed_millis() {
            Some(step) => {
                let shifted = amount
                    .checked_mul(step)
                    .and_then(TimeDelta::try_milliseconds)
                    .and_then(|delta| instant.checked_add_signed(delta));
                self.with_instant(shifted)
            }
            None => {
                let wall = calendar::add_calendar(to_wall(instant, self.mode), amount, unit);
                self.from_wall_clock(wall)
            }
        }
    }

    pub fn subtract(&self, amount: i64, unit: Unit) -> Self {
        match amount.checked_neg() {
            Some(negated) => self.add(negated, unit),
            None => self.with_instant(None),
        }
    }

    /// Replace the field named by `unit`
    ///
    /// `Day` sets the day of the month and `Week` the locale-relative
    /// weekday.
    pub fn set(&self, unit: Unit, value: i64) -> Self {
        match unit {
            Unit::Year => self.with_year(value),
            Unit::Month => self.with_month(value),
            Unit::Week => self.with_weekday(value),
            Unit::Day => self.with_date(value),
            Unit::Hour => self.with_hour(value),
            Unit::Minute => self.with_minute(value),
            Unit::Second => self.with_second(value),
            Unit::Millisecond => self.with_millisecond(value),
        }
    }

    // Getters

    pub fn year(&self) -> Option<i32> {
        self.wall().map(|wall| wall.year())
    }

    /// Month, 0 = January
    pub fn month(&self) -> Option<u32> {
        self.wall().map(|wall| wall.month0())
    }

    /// Day of the month
    pub fn date(&self) -> Option<u32> {
        self.wall().map(|wall| wall.day())
    }

    pub fn hour(&self) -> Option<u32> {
        self.wall().map(|wall| wall.hour())
    }

    pub fn minute(&self) -> Option<u32> {
        self.wall().map(|wall| wall.minute())
    }

    pub fn second(&self) -> Option<u32> {
        self.wall().map(|wall| wall.second())
    }

    pub fn millisecond(&self) -> Option<u32> {
        self.wall().map(|wall| wall.nanosecond() / 1_000_000)
    }

    /// Day of the week, 0 = Sunday
    pub fn day(&self) -> Option<u32> {
        self.wall().map(|wall| wall.weekday().num_days_from_sunday())
    }

    /// Day of the week counted from the active locale's first day
    pub fn weekday(&self) -> Option<u32> {
        self.weekday_in(&locale::current())
    }

    pub fn weekday_in(&self, locale: &Locale) -> Option<u32> {
        self.day().map(|day| days_into_week(day, locale.week_start))
    }

    pub fn days_in_month(&self) -> Option<u32> {
        self.wall().map(|wall| u32::from(wall.date().num_days_in_month()))
    }

    // Withers

    /// Same date in `year`; Feb 29 becomes Feb 28 in common years
    pub fn with_year(&self, year: i64) -> Self {
        self.with_year_month(Some(year), None)
    }

    /// Same date in `month` (0-based, rolling over into other years); the
    /// day is clamped to the target month
    pub fn with_month(&self, month: i64) -> Self {
        self.with_year_month(None, Some(month))
    }

    /// Day of the month; out of range values roll over into other months
    pub fn with_date(&self, date: i64) -> Self {
        self.with_fields(|parts| parts[2] = date)
    }

    pub fn with_hour(&self, hour: i64) -> Self {
        self.with_fields(|parts| parts[3] = hour)
    }

    pub fn with_minute(&self, minute: i64) -> Self {
        self.with_fields(|parts| parts[4] = minute)
    }

    pub fn with_second(&self, second: i64) -> Self {
        self.with_fields(|parts| parts[5] = second)
    }

    pub fn with_millisecond(&self, millisecond: i64) -> Self {
        self.with_fields(|parts| parts[6] = millisecond)
    }

    /// Day `weekday` of the current week, counted from the active locale's
    /// first day; values outside 0..7 reach into neighbouring weeks
    pub fn with_weekday(&self, weekday: i64) -> Self {
        self.with_weekday_in(weekday, &locale::current())
    }

    pub fn with_weekday_in(&self, weekday: i64, locale: &Locale) -> Self {
        match self.weekday_in(locale) {
            Some(current) => match weekday.checked_sub(i64::from(current)) {
                Some(delta) => self.add(delta, Unit::Day),
                None => self.with_instant(None),
            },
            None => *self,
        }
    }

    // Truncation

    /// First instant of the unit containing this value
    pub fn start_of(&self, unit: Unit) -> Self {
        self.start_of_in(unit, &locale::current())
    }

    /// Like [`DateTime::start_of`]; weeks start on `locale`'s first day
    pub fn start_of_in(&self, unit: Unit, locale: &Locale) -> Self {
        let Some(wall) = self.wall() else {
            return *self;
        };
        // Clock units are cut on the instant so a repeated local hour stays put.
        if let Some(elapsed) = calendar::into_clock_unit(wall, unit) {
            return self.add(-elapsed, Unit::Millisecond);
        }
        self.from_wall_clock(calendar::start_of(wall, unit, locale.week_start))
    }

    /// Last millisecond of the unit containing this value
    pub fn end_of(&self, unit: Unit) -> Self {
        self.end_of_in(unit, &locale::current())
    }

    pub fn end_of_in(&self, unit: Unit, locale: &Locale) -> Self {
        if unit == Unit::Millisecond {
            return *self;
        }
        self.start_of_in(unit, locale)
            .add(1, unit)
            .subtract(1, Unit::Millisecond)
    }

    // Business days

    /// The following Monday to Friday
    pub fn next_business_day(&self) -> Self {
        match self.day() {
            Some(5) => self.add(3, Unit::Day),
            Some(6) => self.add(2, Unit::Day),
            _ => self.add(1, Unit::Day),
        }
    }

    /// Weekend dates move to Monday when `is_after`, else to Friday; weekdays
    /// are returned unchanged
    pub fn next_weekday(&self, is_after: bool) -> Self {
        match (self.day(), is_after) {
            (Some(6), true) => self.add(2, Unit::Day),
            (Some(6), false) => self.subtract(1, Unit::Day),
            (Some(0), true) => self.add(1, Unit::Day),
            (Some(0), false) => self.subtract(2, Unit::Day),
            _ => *self,
        }
    }

    /// Last millisecond of the month, moved off a weekend
    pub fn at_month_end(&self, is_after: bool) -> Self {
        self.end_of(Unit::Month).next_weekday(is_after)
    }

    // Comparison

    /// Both instants truncated to `unit`, the other one read in this mode
    fn truncated_pair(&self, other: &DateTime, unit: Option<Unit>) -> Option<(chrono::DateTime<Utc>, chrono::DateTime<Utc>)> {
        let other = other.in_mode(self.mode);
        match unit {
            None | Some(Unit::Millisecond) => Some((self.instant?, other.instant?)),
            Some(unit) => {
                let locale = locale::current();
                Some((
                    self.start_of_in(unit, &locale).instant?,
                    other.start_of_in(unit, &locale).instant?,
                ))
            }
        }
    }

    fn compare_at(&self, other: &DateTime, unit: Option<Unit>) -> Option<Ordering> {
        self.truncated_pair(other, unit).map(|(mine, theirs)| mine.cmp(&theirs))
    }

    /// Whether this value lies after `other`; with a unit only whole units
    /// are compared
    pub fn is_after(&self, other: &DateTime, unit: Option<Unit>) -> bool {
        self.compare_at(other, unit) == Some(Ordering::Greater)
    }

    pub fn is_before(&self, other: &DateTime, unit: Option<Unit>) -> bool {
        self.compare_at(other, unit) == Some(Ordering::Less)
    }

    pub fn is_same(&self, other: &DateTime, unit: Option<Unit>) -> bool {
        self.compare_at(other, unit) == Some(Ordering::Equal)
    }

    pub fn is_same_or_before(&self, other: &DateTime, unit: Option<Unit>) -> bool {
        matches!(self.compare_at(other, unit), Some(Ordering::Less | Ordering::Equal))
    }

    pub fn is_same_or_after(&self, other: &DateTime, unit: Option<Unit>) -> bool {
        matches!(self.compare_at(other, unit), Some(Ordering::Greater | Ordering::Equal))
    }

    /// Whether this value lies between `start` and `end`
    ///
    /// The bounds may be given in either order. `inclusion` defaults to
    /// [`Inclusion::Exclusive`]. Any invalid operand gives `false`.
    pub fn is_between(&self, start: &DateTime, end: &DateTime, unit: Option<Unit>, inclusion: Option<Inclusion>) -> bool {
        if !(self.is_valid() && start.is_valid() && end.is_valid()) {
            return false;
        }
        let inclusion = inclusion.unwrap_or_default();

        let past_start = |bound: &DateTime| {
            if inclusion.includes_start() {
                !self.is_before(bound, unit)
            } else {
                self.is_after(bound, unit)
            }
        };
        let before_start = |bound: &DateTime| {
            if inclusion.includes_start() {
                !self.is_after(bound, unit)
            } else {
                self.is_before(bound, unit)
            }
        };
        let before_end = |bound: &DateTime| {
            if inclusion.includes_end() {
                !self.is_after(bound, unit)
            } else {
                self.is_before(bound, unit)
            }
        };
        let past_end = |bound: &DateTime| {
            if inclusion.includes_end() {
                !self.is_before(bound, unit)
            } else {
                self.is_after(bound, unit)
            }
        };

        (past_start(start) && before_end(end)) || (before_start(start) && past_end(end))
    }

    /// Signed difference `self - other` in whole units, truncated toward zero
    pub fn diff(&self, other: &DateTime, unit: Option<Unit>) -> Option<i64> {
        // Whole-unit results fit comfortably in an i64.
        self.diff_precise(other, unit).map(|value| value.trunc() as i64)
    }

    /// Signed difference `self - other` in fractional units
    ///
    /// Months and years are measured from the same day of the month, days
    /// and weeks by wall-clock time, shorter units by elapsed time.
    pub fn diff_precise(&self, other: &DateTime, unit: Option<Unit>) -> Option<f64> {
        let elapsed = (self.instant? - other.instant?).num_milliseconds();
        let unit = unit.unwrap_or(Unit::Millisecond);

        let value = match unit {
            Unit::Year => month_diff(self, &other.in_mode(self.mode))? / 12.0,
            Unit::Month => month_diff(self, &other.in_mode(self.mode))?,
            Unit::Week | Unit::Day => {
                let wall_elapsed = (self.wall()? - other.wall()?).num_milliseconds();
                let step = if unit == Unit::Week { MS_PER_WEEK } else { MS_PER_DAY };
                wall_elapsed as f64 / step as f64
            }
            fixed => {
                let step = fixed.fixed_millis()?;
                elapsed as f64 / step as f64
            }
        };
        Some(value)
    }
}

/// Fractional months from `a` to `b`, measured from `a`'s day of the month
fn anchored_months(a: &DateTime, b: &DateTime) -> Option<f64> {
    let whole = i64::from(b.year()? - a.year()?) * 12 + i64::from(b.month()?) - i64::from(a.month()?);
    let anchor = a.add(whole, Unit::Month).instant?;
    let target = b.instant?;
    let behind = target < anchor;
    let other_anchor = a.add(whole + if behind { -1 } else { 1 }, Unit::Month).instant?;

    let span = if behind { anchor - other_anchor } else { other_anchor - anchor };
    let span = span.num_milliseconds();
    if span == 0 {
        return Some(whole as f64);
    }
    let progress = (target - anchor).num_milliseconds() as f64 / span as f64;
    Some(whole as f64 + progress)
}

/// Months from `other` to `this`
fn month_diff(this: &DateTime, other: &DateTime) -> Option<f64> {
    if this.date()? < other.date()? {
        return anchored_months(other, this);
    }
    anchored_months(this, other).map(|months| -months)
}

impl PartialOrd for DateTime {
    /// Orders valid values by instant; values at the same instant in
    /// different modes, and invalid values, are unordered
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match self.instant?.cmp(&other.instant?) {
            Ordering::Equal => None,
            ordering => Some(ordering),
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_FORMAT))
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.to_iso_string() {
            Ok(iso) => serializer.serialize_some(&iso),
            Err(_) => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for DateTime {
    /// Reads an ISO string into a local-mode value; `null` is an invalid date
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(DateTime::invalid()),
            Some(text) => {
                let value = datetime(text.as_str());
                if value.is_valid() {
                    Ok(value)
                } else {
                    Err(serde::de::Error::custom(format!("{}: {}", LOG_UNPARSEABLE_INPUT, text)))
                }
            }
        }
    }
}
