//! Constants used throughout the crate
//!
//! This module centralizes default templates, calendar sizes, file names and
//! log text to improve maintainability and consistency.

// Templates
/// Template used by `Display` and by `format("")`
pub const DEFAULT_FORMAT: &str = "YYYY-MM-DDTHH:mm:ssZ";
/// Text rendered for an invalid date
pub const INVALID_DATE: &str = "Invalid Date";
/// Default display template for dates
pub const DEFAULT_DATE_FORMAT: &str = "DD.MM.YYYY";
/// Default display template for long dates
pub const DEFAULT_LONG_FORMAT: &str = "dddd DD.MMMM YYYY";
/// Name of the locale active before any configuration is applied
pub const DEFAULT_LOCALE: &str = "en";

// Milliseconds per fixed-length unit
pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

// Calendar sizes
pub const MONTHS_PER_YEAR: usize = 12;
pub const DAYS_PER_WEEK: usize = 7;
/// Two-digit years above this pivot belong to the 1900s
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 68;

// Files
/// Configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "datetime.toml";
/// Directory name under the platform config/data directories
pub const APP_DIR_NAME: &str = "shared-datetime";
/// Log file name under the platform data directory
pub const LOG_FILE_NAME: &str = "shared-datetime.log";

// Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const LOG_LOCALE_ACTIVATED: &str = "Activated locale";
pub const LOG_LOCALE_REGISTERED: &str = "Registered locale";
pub const LOG_LOCALE_UNKNOWN: &str = "Unknown locale requested";
pub const LOG_UNPARSEABLE_INPUT: &str = "Unparseable date input";
