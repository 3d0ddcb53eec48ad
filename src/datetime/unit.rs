//! Calendar units, interval inclusion modes and calendar modes

use crate::error::DateTimeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar granularity used for arithmetic steps and truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    pub const ALL: [Unit; 8] = [
        Unit::Millisecond,
        Unit::Second,
        Unit::Minute,
        Unit::Hour,
        Unit::Day,
        Unit::Week,
        Unit::Month,
        Unit::Year,
    ];

    /// Canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Millisecond => "millisecond",
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Week => "week",
            Unit::Month => "month",
            Unit::Year => "year",
        }
    }

    /// Milliseconds in one unit, for units of fixed length
    pub fn fixed_millis(self) -> Option<i64> {
        use crate::constants::*;
        match self {
            Unit::Millisecond => Some(1),
            Unit::Second => Some(MS_PER_SECOND),
            Unit::Minute => Some(MS_PER_MINUTE),
            Unit::Hour => Some(MS_PER_HOUR),
            Unit::Day | Unit::Week | Unit::Month | Unit::Year => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Single-letter aliases are case sensitive: "M" is month, "m" is minute.
        match s {
            "ms" => return Ok(Unit::Millisecond),
            "s" => return Ok(Unit::Second),
            "m" => return Ok(Unit::Minute),
            "h" => return Ok(Unit::Hour),
            "d" | "D" => return Ok(Unit::Day),
            "w" => return Ok(Unit::Week),
            "M" => return Ok(Unit::Month),
            "y" => return Ok(Unit::Year),
            _ => {}
        }

        let lower = s.to_ascii_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        match singular {
            "millisecond" => Ok(Unit::Millisecond),
            "second" => Ok(Unit::Second),
            "minute" => Ok(Unit::Minute),
            "hour" => Ok(Unit::Hour),
            "day" | "date" => Ok(Unit::Day),
            "week" => Ok(Unit::Week),
            "month" => Ok(Unit::Month),
            "year" => Ok(Unit::Year),
            _ => Err(DateTimeError::UnknownUnit(s.to_string())),
        }
    }
}

/// Boundary treatment for [`DateTime::is_between`](crate::DateTime::is_between)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Inclusion {
    /// `[]` both boundaries belong to the interval
    Inclusive,
    /// `()` neither boundary belongs to the interval
    #[default]
    Exclusive,
    /// `[)`
    IncludeStartOnly,
    /// `(]`
    IncludeEndOnly,
}

impl Inclusion {
    /// Bracket notation of the mode
    pub fn as_str(self) -> &'static str {
        match self {
            Inclusion::Inclusive => "[]",
            Inclusion::Exclusive => "()",
            Inclusion::IncludeStartOnly => "[)",
            Inclusion::IncludeEndOnly => "(]",
        }
    }

    pub fn includes_start(self) -> bool {
        matches!(self, Inclusion::Inclusive | Inclusion::IncludeStartOnly)
    }

    pub fn includes_end(self) -> bool {
        matches!(self, Inclusion::Inclusive | Inclusion::IncludeEndOnly)
    }
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Inclusion {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "[]" => Ok(Inclusion::Inclusive),
            "()" => Ok(Inclusion::Exclusive),
            "[)" => Ok(Inclusion::IncludeStartOnly),
            "(]" => Ok(Inclusion::IncludeEndOnly),
            other => Err(DateTimeError::UnknownInclusion(other.to_string())),
        }
    }
}

/// How an instant is interpreted as calendar fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarMode {
    /// The host's local time zone
    #[default]
    Local,
    Utc,
}

impl FromStr for CalendarMode {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(CalendarMode::Local),
            "utc" => Ok(CalendarMode::Utc),
            _ => Err(DateTimeError::UnknownMode(s.to_string())),
        }
    }
}
