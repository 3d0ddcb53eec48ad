//! Token-based rendering of date/time values
//!
//! Templates use the familiar `YYYY-MM-DD` style tokens. Text inside square
//! brackets is copied verbatim, and characters that do not form a token are
//! passed through unchanged.

use crate::locale::Locale;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Commonly used templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeFormat {
    /// `DD.MM.YYYY`
    Short,
    /// `dddd DD.MMMM YYYY`
    Long,
    /// `YYYY-MM-DD`, the wire format for dates
    Server,
    /// `YYYY-MM-DDTHH:mm:ss.SSS`
    TimeZone,
    /// `DD MMM YYYY HH:mm:ss`
    Comparison,
}

impl DateTimeFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DateTimeFormat::Short => "DD.MM.YYYY",
            DateTimeFormat::Long => "dddd DD.MMMM YYYY",
            DateTimeFormat::Server => "YYYY-MM-DD",
            DateTimeFormat::TimeZone => "YYYY-MM-DDTHH:mm:ss.SSS",
            DateTimeFormat::Comparison => "DD MMM YYYY HH:mm:ss",
        }
    }
}

impl AsRef<str> for DateTimeFormat {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// What a template is rendered from
pub(crate) struct Rendered<'a> {
    pub wall: NaiveDateTime,
    /// Offset from UTC in seconds
    pub offset: i32,
    pub epoch_millis: i64,
    pub locale: &'a Locale,
}

/// Longest run of `c` that forms a single token
fn max_token_len(c: char) -> usize {
    match c {
        'Y' | 'M' | 'd' => 4,
        'D' | 'H' | 'h' | 'k' | 'm' | 's' | 'Z' => 2,
        'S' => 3,
        'A' | 'a' | 'Q' | 'X' | 'x' => 1,
        _ => 0,
    }
}

fn run_len(chars: &[char], start: usize, c: char, limit: usize) -> usize {
    chars[start..].iter().take(limit).take_while(|&&other| other == c).count()
}

/// Index just past the closing bracket of a `[literal]` starting at `start`
fn bracket_end(chars: &[char], start: usize) -> Option<usize> {
    chars[start + 1..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| start + offset + 2)
}

/// Replaces `LT`, `LTS`, `L` .. `LLLL` with the locale's templates
pub(crate) fn expand_localized(template: &str, locale: &Locale) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '[' {
            if let Some(end) = bracket_end(&chars, i) {
                out.extend(&chars[i..end]);
                i = end;
                continue;
            }
        }
        if chars[i] != 'L' {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        if chars.get(i + 1) == Some(&'T') {
            if chars.get(i + 2) == Some(&'S') {
                out.push_str(&locale.formats.lts);
                i += 3;
            } else {
                out.push_str(&locale.formats.lt);
                i += 2;
            }
            continue;
        }

        let n = run_len(&chars, i, 'L', 4);
        out.push_str(match n {
            1 => &locale.formats.l,
            2 => &locale.formats.ll,
            3 => &locale.formats.lll,
            _ => &locale.formats.llll,
        });
        i += n;
    }

    out
}

fn zone(offset: i32, separator: &str) -> String {
    let sign = if offset >= 0 { '+' } else { '-' };
    let abs = offset.unsigned_abs();
    format!("{}{:02}{}{:02}", sign, abs / 3600, separator, (abs % 3600) / 60)
}

/// Render one token, or `None` when `token` is not a known token
fn render_token(token: &str, value: &Rendered<'_>) -> Option<String> {
    let wall = &value.wall;
    let locale = value.locale;
    let weekday = wall.weekday().num_days_from_sunday() as usize;
    let hour12 = match wall.hour() % 12 {
        0 => 12,
        h => h,
    };

    let rendered = match token {
        "YY" => format!("{:02}", wall.year().rem_euclid(100)),
        "YYYY" => format!("{:04}", wall.year()),
        "M" => wall.month().to_string(),
        "MM" => format!("{:02}", wall.month()),
        "MMM" => locale.months_short[wall.month0() as usize].clone(),
        "MMMM" => locale.months[wall.month0() as usize].clone(),
        "D" => wall.day().to_string(),
        "DD" => format!("{:02}", wall.day()),
        "Do" => locale.ordinal.apply(wall.day()),
        "d" => weekday.to_string(),
        "dd" => locale.weekdays_min[weekday].clone(),
        "ddd" => locale.weekdays_short[weekday].clone(),
        "dddd" => locale.weekdays[weekday].clone(),
        "H" => wall.hour().to_string(),
        "HH" => format!("{:02}", wall.hour()),
        "h" => hour12.to_string(),
        "hh" => format!("{:02}", hour12),
        "k" => (if wall.hour() == 0 { 24 } else { wall.hour() }).to_string(),
        "kk" => format!("{:02}", if wall.hour() == 0 { 24 } else { wall.hour() }),
        "a" => (if wall.hour() < 12 { "am" } else { "pm" }).to_string(),
        "A" => (if wall.hour() < 12 { "AM" } else { "PM" }).to_string(),
        "m" => wall.minute().to_string(),
        "mm" => format!("{:02}", wall.minute()),
        "s" => wall.second().to_string(),
        "ss" => format!("{:02}", wall.second()),
        "SSS" => format!("{:03}", wall.nanosecond() / 1_000_000),
        "Q" => (wall.month0() / 3 + 1).to_string(),
        "Z" => zone(value.offset, ":"),
        "ZZ" => zone(value.offset, ""),
        "X" => value.epoch_millis.div_euclid(1000).to_string(),
        "x" => value.epoch_millis.to_string(),
        _ => return None,
    };
    Some(rendered)
}

/// Render `template` for the given value
pub(crate) fn render(template: &str, value: &Rendered<'_>) -> String {
    let expanded = expand_localized(template, value.locale);
    let chars: Vec<char> = expanded.chars().collect();
    let mut out = String::with_capacity(expanded.len() + 16);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '[' {
            if let Some(end) = bracket_end(&chars, i) {
                out.extend(&chars[i + 1..end - 1]);
                i = end;
                continue;
            }
        }

        let limit = max_token_len(c);
        if limit == 0 {
            out.push(c);
            i += 1;
            continue;
        }

        let n = run_len(&chars, i, c, limit);
        let mut token: String = std::iter::repeat(c).take(n).collect();
        if token == "D" && chars.get(i + 1) == Some(&'o') {
            token.push('o');
        }

        match render_token(&token, value) {
            Some(rendered) => out.push_str(&rendered),
            None => out.push_str(&token),
        }
        i += token.chars().count();
    }

    out
}
