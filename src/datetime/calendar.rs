//! Wall-clock calendar arithmetic
//!
//! Everything here works on `NaiveDateTime` values, i.e. the calendar fields
//! as seen in a given [`CalendarMode`]. Conversion back to an instant happens
//! in [`from_wall`]. All functions return `None` instead of overflowing.

use super::unit::{CalendarMode, Unit};
use crate::constants::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
use chrono::{Datelike, Duration, Local, LocalResult, Months, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc};

/// Calendar fields of an instant in the given mode
pub(crate) fn to_wall(instant: chrono::DateTime<Utc>, mode: CalendarMode) -> NaiveDateTime {
    match mode {
        CalendarMode::Local => instant.with_timezone(&Local).naive_local(),
        CalendarMode::Utc => instant.naive_utc(),
    }
}

/// Instant for wall-clock fields in the given mode
///
/// A local time that occurs twice resolves to the occurrence with
/// `preferred_offset` (seconds east of UTC) when one matches, otherwise to
/// the earlier instant. Local times skipped by a DST transition move forward
/// by one hour.
pub(crate) fn from_wall(
    wall: NaiveDateTime,
    mode: CalendarMode,
    preferred_offset: Option<i32>,
) -> Option<chrono::DateTime<Utc>> {
    match mode {
        CalendarMode::Utc => Some(Utc.from_utc_datetime(&wall)),
        CalendarMode::Local => resolve_local(wall, preferred_offset).or_else(|| {
            let shifted = wall.checked_add_signed(Duration::try_hours(1)?)?;
            resolve_local(shifted, preferred_offset)
        }),
    }
}

fn resolve_local(wall: NaiveDateTime, preferred_offset: Option<i32>) -> Option<chrono::DateTime<Utc>> {
    match Local.from_local_datetime(&wall) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(first, second) => {
            let has_preferred =
                |dt: &chrono::DateTime<Local>| Some(dt.offset().fix().local_minus_utc()) == preferred_offset;
            let chosen = match (has_preferred(&first), has_preferred(&second)) {
                (true, _) => first,
                (false, true) => second,
                (false, false) => first.min(second),
            };
            Some(chosen.with_timezone(&Utc))
        }
        LocalResult::None => None,
    }
}

/// Offset from UTC in seconds that `mode` applies at `instant`
pub(crate) fn offset_seconds(instant: chrono::DateTime<Utc>, mode: CalendarMode) -> i32 {
    match mode {
        CalendarMode::Local => instant.with_timezone(&Local).offset().fix().local_minus_utc(),
        CalendarMode::Utc => 0,
    }
}

/// Builds wall-clock fields with rollover: a month of 12 is January of the
/// next year, day 0 is the last day of the previous month, hour 24 is
/// midnight of the next day and so on.
pub(crate) fn compose(
    year: i64,
    month0: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
) -> Option<NaiveDateTime> {
    let total_months = year.checked_mul(12)?.checked_add(month0)?;
    let y = i32::try_from(total_months.div_euclid(12)).ok()?;
    let m = u32::try_from(total_months.rem_euclid(12) + 1).ok()?;
    let base = NaiveDate::from_ymd_opt(y, m, 1)?.and_hms_opt(0, 0, 0)?;

    let offset = day
        .checked_sub(1)?
        .checked_mul(MS_PER_DAY)?
        .checked_add(hour.checked_mul(MS_PER_HOUR)?)?
        .checked_add(minute.checked_mul(MS_PER_MINUTE)?)?
        .checked_add(second.checked_mul(MS_PER_SECOND)?)?
        .checked_add(millisecond)?;
    base.checked_add_signed(Duration::try_milliseconds(offset)?)
}

/// Fields of a wall-clock value in the shape [`compose`] accepts
pub(crate) fn fields(wall: NaiveDateTime) -> [i64; 7] {
    [
        i64::from(wall.year()),
        i64::from(wall.month0()),
        i64::from(wall.day()),
        i64::from(wall.hour()),
        i64::from(wall.minute()),
        i64::from(wall.second()),
        i64::from(wall.nanosecond() / 1_000_000),
    ]
}

/// Shifts by whole months, clamping the day to the end of the target month
pub(crate) fn add_months(wall: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    let date = if months >= 0 {
        wall.date().checked_add_months(magnitude)?
    } else {
        wall.date().checked_sub_months(magnitude)?
    };
    Some(date.and_time(wall.time()))
}

/// Shifts a wall-clock value by calendar units (day and longer)
pub(crate) fn add_calendar(wall: NaiveDateTime, amount: i64, unit: Unit) -> Option<NaiveDateTime> {
    match unit {
        Unit::Year => add_months(wall, amount.checked_mul(12)?),
        Unit::Month => add_months(wall, amount),
        Unit::Week => wall.checked_add_signed(Duration::try_days(amount.checked_mul(7)?)?),
        Unit::Day => wall.checked_add_signed(Duration::try_days(amount)?),
        fixed => {
            let millis = amount.checked_mul(fixed.fixed_millis()?)?;
            wall.checked_add_signed(Duration::try_milliseconds(millis)?)
        }
    }
}

/// Days since the start of the week for a Sunday-based weekday index
pub(crate) fn days_into_week(weekday_from_sunday: u32, week_start: u8) -> u32 {
    (weekday_from_sunday + 7 - u32::from(week_start % 7)) % 7
}

/// Milliseconds between the start of a sub-day unit and `wall`, or `None`
/// for units of a day and longer
pub(crate) fn into_clock_unit(wall: NaiveDateTime, unit: Unit) -> Option<i64> {
    let millis = i64::from(wall.nanosecond() / 1_000_000);
    let seconds = i64::from(wall.second()) * MS_PER_SECOND;
    let minutes = i64::from(wall.minute()) * MS_PER_MINUTE;
    match unit {
        Unit::Hour => Some(minutes + seconds + millis),
        Unit::Minute => Some(seconds + millis),
        Unit::Second => Some(millis),
        Unit::Millisecond => Some(0),
        Unit::Day | Unit::Week | Unit::Month | Unit::Year => None,
    }
}

/// First wall-clock value of the unit containing `wall`
pub(crate) fn start_of(wall: NaiveDateTime, unit: Unit, week_start: u8) -> Option<NaiveDateTime> {
    let date = wall.date();
    match unit {
        Unit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0),
        Unit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?.and_hms_opt(0, 0, 0),
        Unit::Week => {
            let back = days_into_week(date.weekday().num_days_from_sunday(), week_start);
            date.checked_sub_signed(Duration::try_days(i64::from(back))?)?
                .and_hms_opt(0, 0, 0)
        }
        Unit::Day => date.and_hms_opt(0, 0, 0),
        Unit::Hour => date.and_hms_opt(wall.hour(), 0, 0),
        Unit::Minute => date.and_hms_opt(wall.hour(), wall.minute(), 0),
        Unit::Second => date.and_hms_opt(wall.hour(), wall.minute(), wall.second()),
        Unit::Millisecond => wall.with_nanosecond(wall.nanosecond() / 1_000_000 * 1_000_000),
    }
}
