//! shared-datetime - an immutable date/time value type with locale support
//!
//! This library wraps `chrono` behind a small, stable [`DateTime`] value that
//! normalizes construction, calendar arithmetic, comparison and token-based
//! formatting. Invalid input never fails construction; it yields an invalid
//! value that propagates through every operation.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`datetime`] - The `DateTime` value type, units and parsing/formatting
//! * [`locale`] - Language packs and the process-wide active locale
//! * [`adapter`] - Calendar adapter consumed by date picker widgets
//! * [`config`] - Application configuration management
//! * [`logger`] - Logging setup

/// Calendar adapter for date picker widgets
pub mod adapter;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// The `DateTime` value type
pub mod datetime;

/// Error types
pub mod error;

/// Locale definitions and registry
pub mod locale;

/// Logging utilities for debugging and error tracking
pub mod logger;

// Re-export the core API for convenient access
pub use adapter::{weekend_filter, DateAdapter, DateTimeAdapter, DateTimeFormats, NameStyle, DATE_TIME_FORMATS};
pub use datetime::{
    avoid_weekend, datetime, datetime_strict, datetime_utc, datetime_utc_with_format, datetime_with_format,
    CalendarMode, DateInput, DateTime, DateTimeFormat, Inclusion, Unit,
};
pub use error::DateTimeError;
pub use locale::{
    date_time_locale, first_day_of_week, long_days_of_week, long_months, narrow_days_of_week, register_locale,
    short_days_of_week, short_months, Locale, LocaleOverrides,
};
