//! Error types for date/time operations
//!
//! Construction never fails: bad input produces an invalid [`DateTime`](crate::DateTime).
//! These errors cover the few operations that must return a concrete value.

/// Errors raised by operations that cannot carry an invalid value forward.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateTimeError {
    #[error("Cannot {0} invalid date")]
    InvalidDate(&'static str),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Unknown inclusion mode: {0}")]
    UnknownInclusion(String),

    #[error("Unknown calendar mode: {0}")]
    UnknownMode(String),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Invalid locale '{name}': {reason}")]
    InvalidLocale { name: String, reason: String },

    #[error("Invalid {field} '{value}'")]
    InvalidCalendarField { field: &'static str, value: i64 },
}

pub type Result<T> = std::result::Result<T, DateTimeError>;
