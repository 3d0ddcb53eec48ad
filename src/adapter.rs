//! Calendar adapter for date picker widgets.
//!
//! A date picker needs a narrow set of calendar operations on its date type:
//! field getters, name tables, parsing, formatting and calendar arithmetic.
//! [`DateAdapter`] describes that contract and [`DateTimeAdapter`] implements
//! it over [`DateTime`].

use crate::datetime::{CalendarMode, DateTime, Unit};
use crate::error::{DateTimeError, Result};
use crate::locale::{self, Locale};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// Width of month and weekday names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    #[default]
    Long,
    Short,
    Narrow,
}

/// Templates used when parsing typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFormats {
    pub date_input: &'static str,
}

/// Templates used when displaying dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFormats {
    pub date_input: &'static str,
    pub month_year_label: &'static str,
    pub date_a11y_label: &'static str,
    pub month_year_a11y_label: &'static str,
}

/// Parse and display templates of a date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeFormats {
    pub parse: ParseFormats,
    pub display: DisplayFormats,
}

pub const DATE_TIME_FORMATS: DateTimeFormats = DateTimeFormats {
    parse: ParseFormats { date_input: "D.M.YYYY" },
    display: DisplayFormats {
        date_input: "DD.MM.YYYY",
        month_year_label: "MMM YYYY",
        date_a11y_label: "LL",
        month_year_a11y_label: "MMMM YYYY",
    },
};

/// Calendar operations a date picker performs on its date type.
///
/// Getters return `None` for invalid dates.
pub trait DateAdapter: Send + Sync {
    type Date: Clone;

    // Fields
    fn get_year(&self, date: &Self::Date) -> Option<i32>;
    /// Month, 0 = January
    fn get_month(&self, date: &Self::Date) -> Option<u32>;
    fn get_date(&self, date: &Self::Date) -> Option<u32>;
    /// Day of the week, 0 = Sunday
    fn get_day_of_week(&self, date: &Self::Date) -> Option<u32>;
    fn get_num_days_in_month(&self, date: &Self::Date) -> Option<u32>;

    // Names
    fn get_month_names(&self, style: NameStyle) -> Vec<String>;
    fn get_date_names(&self) -> Vec<String>;
    fn get_day_of_week_names(&self, style: NameStyle) -> Vec<String>;
    fn get_year_name(&self, date: &Self::Date) -> String;
    fn get_first_day_of_week(&self) -> u8;

    // Construction
    fn clone_date(&self, date: &Self::Date) -> Self::Date;
    /// `month` is 0-based; out of range fields are rejected
    fn create_date(&self, year: i32, month: u32, date: u32) -> Result<Self::Date>;
    fn today(&self) -> Self::Date;
    /// `None` for empty input, otherwise a possibly invalid date
    fn parse(&self, value: &str, parse_format: &str) -> Option<Self::Date>;
    fn invalid(&self) -> Self::Date;

    // Output
    fn format(&self, date: &Self::Date, display_format: &str) -> Result<String>;
    fn to_iso8601(&self, date: &Self::Date) -> Result<String>;
    fn is_valid(&self, date: &Self::Date) -> bool;

    // Arithmetic
    fn add_calendar_years(&self, date: &Self::Date, years: i64) -> Self::Date;
    fn add_calendar_months(&self, date: &Self::Date, months: i64) -> Self::Date;
    fn add_calendar_days(&self, date: &Self::Date, days: i64) -> Self::Date;

    /// Orders two dates by year, month and day, ignoring the time of day
    fn compare_date(&self, first: &Self::Date, second: &Self::Date) -> Option<Ordering> {
        let key = |date: &Self::Date| Some((self.get_year(date)?, self.get_month(date)?, self.get_date(date)?));
        Some(key(first)?.cmp(&key(second)?))
    }

    /// Whether both dates fall on the same calendar day
    fn same_date(&self, first: &Self::Date, second: &Self::Date) -> bool {
        self.compare_date(first, second) == Some(Ordering::Equal)
    }
}

/// [`DateAdapter`] over local-mode [`DateTime`] values.
///
/// Names and the first day of the week come from the adapter's own locale,
/// or from the active locale when none is set.
#[derive(Debug, Clone, Default)]
pub struct DateTimeAdapter {
    locale: Option<Arc<Locale>>,
}

impl DateTimeAdapter {
    /// Adapter following the active locale
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter pinned to `locale`
    pub fn with_locale(locale: Arc<Locale>) -> Self {
        Self { locale: Some(locale) }
    }

    pub fn locale(&self) -> Arc<Locale> {
        self.locale.clone().unwrap_or_else(locale::current)
    }
}

impl DateAdapter for DateTimeAdapter {
    type Date = DateTime;

    fn get_year(&self, date: &DateTime) -> Option<i32> {
        date.year()
    }

    fn get_month(&self, date: &DateTime) -> Option<u32> {
        date.month()
    }

    fn get_date(&self, date: &DateTime) -> Option<u32> {
        date.date()
    }

    fn get_day_of_week(&self, date: &DateTime) -> Option<u32> {
        date.day()
    }

    fn get_num_days_in_month(&self, date: &DateTime) -> Option<u32> {
        date.days_in_month()
    }

    fn get_month_names(&self, style: NameStyle) -> Vec<String> {
        let locale = self.locale();
        match style {
            NameStyle::Long => locale.long_months().to_vec(),
            NameStyle::Short | NameStyle::Narrow => locale.short_months().to_vec(),
        }
    }

    fn get_date_names(&self) -> Vec<String> {
        (1..=31).map(|day: u32| day.to_string()).collect()
    }

    fn get_day_of_week_names(&self, style: NameStyle) -> Vec<String> {
        let locale = self.locale();
        match style {
            NameStyle::Long => locale.long_days_of_week().to_vec(),
            NameStyle::Short => locale.short_days_of_week().to_vec(),
            NameStyle::Narrow => locale.narrow_days_of_week().to_vec(),
        }
    }

    fn get_year_name(&self, date: &DateTime) -> String {
        date.format_in("YYYY", &self.locale())
    }

    fn get_first_day_of_week(&self) -> u8 {
        self.locale().first_day_of_week()
    }

    fn clone_date(&self, date: &DateTime) -> DateTime {
        *date
    }

    fn create_date(&self, year: i32, month: u32, date: u32) -> Result<DateTime> {
        if month > 11 {
            return Err(DateTimeError::InvalidCalendarField {
                field: "month",
                value: i64::from(month),
            });
        }
        let day = NaiveDate::from_ymd_opt(year, month + 1, date).ok_or(DateTimeError::InvalidCalendarField {
            field: "date",
            value: i64::from(date),
        })?;
        Ok(DateTime::new(day, None, CalendarMode::Local))
    }

    fn today(&self) -> DateTime {
        DateTime::now()
    }

    fn parse(&self, value: &str, parse_format: &str) -> Option<DateTime> {
        if value.is_empty() {
            return None;
        }
        Some(DateTime::new_in(value, Some(parse_format), CalendarMode::Local, &self.locale()))
    }

    fn invalid(&self) -> DateTime {
        DateTime::invalid()
    }

    fn format(&self, date: &DateTime, display_format: &str) -> Result<String> {
        if !date.is_valid() {
            return Err(DateTimeError::InvalidDate("format"));
        }
        Ok(date.format_in(display_format, &self.locale()))
    }

    fn to_iso8601(&self, date: &DateTime) -> Result<String> {
        date.to_iso_string()
    }

    fn is_valid(&self, date: &DateTime) -> bool {
        date.is_valid()
    }

    fn add_calendar_years(&self, date: &DateTime, years: i64) -> DateTime {
        date.add(years, Unit::Year)
    }

    fn add_calendar_months(&self, date: &DateTime, months: i64) -> DateTime {
        date.add(months, Unit::Month)
    }

    fn add_calendar_days(&self, date: &DateTime, days: i64) -> DateTime {
        date.add(days, Unit::Day)
    }
}

/// Date picker filter: with `disable_weekend`, Saturdays and Sundays are
/// rejected; otherwise every date is accepted.
pub fn weekend_filter(disable_weekend: bool) -> impl Fn(&DateTime) -> bool + Send + Sync {
    move |date: &DateTime| !disable_weekend || !matches!(date.day(), Some(0 | 6))
}
