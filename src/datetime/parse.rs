//! Parsing of text input
//!
//! Two strategies:
//!
//! * [`parse_flexible`] reads `YYYY-MM-DD HH:mm:ss.SSS` shaped text (every
//!   part after the year optional, `-` or `/` between date parts, `T` or
//!   whitespace before the time) as wall-clock time, and falls back to
//!   RFC 3339 / RFC 2822 for text carrying its own offset.
//! * [`parse_with_format`] follows an explicit token template.
//!
//! Both return `None` for unparseable text; the caller turns that into an
//! invalid date.

use super::calendar::{compose, from_wall};
use super::unit::CalendarMode;
use crate::constants::TWO_DIGIT_YEAR_PIVOT;
use crate::locale::Locale;
use chrono::{Datelike, Duration, NaiveDateTime, Utc};

/// Formats tried when text carries a numeric offset but is not RFC 3339
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Character cursor over the input
struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self { chars, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn eat_if(&mut self, accept: impl Fn(char) -> bool) -> bool {
        match self.peek() {
            Some(c) if accept(c) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Consume between `min` and `max` ASCII digits
    fn digits(&mut self, min: usize, max: usize) -> Option<String> {
        let available = self.chars[self.pos..]
            .iter()
            .take(max)
            .take_while(|c| c.is_ascii_digit())
            .count();
        if available < min {
            return None;
        }
        let taken: String = self.chars[self.pos..self.pos + available].iter().collect();
        self.pos += available;
        Some(taken)
    }

    /// Optional sign followed by at least one digit
    fn signed(&mut self) -> Option<i64> {
        let start = self.pos;
        self.eat_if(|c| c == '+' || c == '-');
        if self.digits(1, usize::MAX).is_none() {
            self.pos = start;
            return None;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse().ok()
    }

    /// Optional digits followed by at least one character that is not a
    /// digit, whitespace or one of `-_:/,()`
    fn word(&mut self) -> Option<String> {
        let start = self.pos;
        let _ = self.digits(0, usize::MAX);
        let is_word = |c: char| !c.is_ascii_digit() && !c.is_whitespace() && !"-_:/,()".contains(c);
        let letters = self.chars[self.pos..].iter().take_while(|&&c| is_word(c)).count();
        if letters == 0 {
            self.pos = start;
            return None;
        }
        self.pos += letters;
        Some(self.chars[start..self.pos].iter().collect())
    }

    /// `Z`, `+HH`, `+HHmm` or `+HH:mm`, as minutes east of UTC
    fn offset(&mut self) -> Option<i32> {
        if self.eat_if(|c| c == 'Z') {
            return Some(0);
        }
        let start = self.pos;
        let sign = match self.peek() {
            Some('+') => 1,
            Some('-') => -1,
            _ => return None,
        };
        self.pos += 1;
        let Some(hours) = self.digits(2, 2) else {
            self.pos = start;
            return None;
        };
        let before_minutes = self.pos;
        self.eat_if(|c| c == ':');
        let minutes = match self.digits(2, 2) {
            Some(minutes) => minutes,
            None => {
                self.pos = before_minutes;
                "0".to_string()
            }
        };
        let total = hours.parse::<i32>().ok()? * 60 + minutes.parse::<i32>().ok()?;
        Some(sign * total)
    }
}

fn number(text: &str) -> Option<i64> {
    text.parse().ok()
}

/// Milliseconds from a fraction of arbitrary length (only the first three
/// digits count)
fn fraction_millis(text: &str) -> Option<i64> {
    let digits: String = text.chars().take(3).collect();
    let scale = 10_i64.pow(3 - digits.len() as u32);
    Some(number(&digits)? * scale)
}

/// The wall-clock reading of `YYYY[-/]M[-/]D[T ]H:m:s.SSS` text
fn parse_wall_clock(text: &str) -> Option<NaiveDateTime> {
    let chars: Vec<char> = text.chars().collect();
    let mut cur = Cursor::new(&chars);
    let is_sep = |c: char| c == '-' || c == '/';

    let year = number(&cur.digits(4, 4)?)?;
    cur.eat_if(is_sep);
    let month = cur.digits(1, 2);
    cur.eat_if(is_sep);
    let day = cur.digits(0, 2).filter(|d| !d.is_empty());
    while cur.eat_if(|c| c == 'T' || c == 't' || c.is_whitespace()) {}
    let hour = cur.digits(1, 2);
    cur.eat_if(|c| c == ':');
    let minute = cur.digits(1, 2);
    cur.eat_if(|c| c == ':');
    let second = cur.digits(1, 2);
    cur.eat_if(|c| c == '.' || c == ':');
    let fraction = cur.digits(1, usize::MAX);

    if !cur.at_end() {
        return None;
    }

    let month0 = month.as_deref().and_then(number).map_or(0, |m| m - 1);
    let day = day.as_deref().and_then(number).unwrap_or(1);
    let field = |value: Option<String>| value.as_deref().and_then(number).unwrap_or(0);
    let millis = fraction.as_deref().and_then(fraction_millis).unwrap_or(0);

    compose(year, month0, day, field(hour), field(minute), field(second), millis)
}

/// Parse text without an explicit format
pub(crate) fn parse_flexible(text: &str, mode: CalendarMode) -> Option<chrono::DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    // A trailing `Z` pins the text to UTC, so the wall-clock reading is skipped.
    if !text.ends_with(['Z', 'z']) {
        if let Some(wall) = parse_wall_clock(text) {
            return from_wall(wall, mode, None);
        }
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = chrono::DateTime::parse_from_str(text, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    None
}

/// Tokens understood by [`parse_with_format`], longest first per letter
const PARSE_TOKENS: [&str; 27] = [
    "YYYY", "YY", "Y", "MMMM", "MMM", "MM", "M", "Do", "DD", "D", "hh", "h", "HH", "H", "mm", "m", "ss", "s", "SSS",
    "SS", "S", "ZZ", "Z", "A", "a", "X", "x",
];

enum Part {
    Token(&'static str),
    Literal(usize),
}

fn tokenize(format: &str) -> Vec<Part> {
    let chars: Vec<char> = format.chars().collect();
    let mut parts = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '[' {
            if let Some(close) = chars[i + 1..].iter().position(|&c| c == ']') {
                parts.push(Part::Literal(close));
                i += close + 2;
                continue;
            }
        }

        let rest: String = chars[i..].iter().take(4).collect();
        match PARSE_TOKENS.iter().copied().find(|token| rest.starts_with(token)) {
            Some(token) => {
                parts.push(Part::Token(token));
                i += token.len();
            }
            None => {
                parts.push(Part::Literal(1));
                i += 1;
            }
        }
    }

    parts
}

/// Fields collected while reading a template
#[derive(Debug, Default)]
struct Fields {
    year: Option<i64>,
    month: Option<i64>,
    day: Option<i64>,
    hour: Option<i64>,
    minute: Option<i64>,
    second: Option<i64>,
    millisecond: Option<i64>,
    afternoon: Option<bool>,
    offset_minutes: Option<i32>,
    epoch_millis: Option<i64>,
}

fn name_index(names: &[String], input: &str) -> Option<i64> {
    names
        .iter()
        .position(|name| name == input)
        .and_then(|index| i64::try_from(index + 1).ok())
}

fn read_token(token: &str, cur: &mut Cursor<'_>, fields: &mut Fields, locale: &Locale) -> Option<()> {
    match token {
        "YYYY" => fields.year = Some(number(&cur.digits(4, 4)?)?),
        "YY" => {
            let year = number(&cur.digits(2, 2)?)?;
            let century = if year > i64::from(TWO_DIGIT_YEAR_PIVOT) { 1900 } else { 2000 };
            fields.year = Some(year + century);
        }
        "Y" => fields.year = Some(cur.signed()?),
        "M" => fields.month = Some(number(&cur.digits(1, 2)?)?),
        "MM" => fields.month = Some(number(&cur.digits(2, 2)?)?),
        "MMM" => {
            let word = cur.word()?;
            let index = name_index(&locale.months_short, &word).or_else(|| {
                let prefixes: Vec<String> = locale.months.iter().map(|m| m.chars().take(3).collect()).collect();
                name_index(&prefixes, &word)
            })?;
            fields.month = Some(index);
        }
        "MMMM" => fields.month = Some(name_index(&locale.months, &cur.word()?)?),
        "D" => fields.day = Some(number(&cur.digits(1, 2)?)?),
        "DD" => fields.day = Some(number(&cur.digits(2, 2)?)?),
        "Do" => {
            let word = cur.word()?;
            let digits: String = word.chars().take_while(|c| c.is_ascii_digit()).collect();
            fields.day = Some(number(&digits)?);
        }
        "H" | "HH" | "h" | "hh" => fields.hour = Some(number(&cur.digits(1, 2)?)?),
        "m" | "mm" => fields.minute = Some(number(&cur.digits(1, 2)?)?),
        "s" | "ss" => fields.second = Some(number(&cur.digits(1, 2)?)?),
        "S" => fields.millisecond = Some(number(&cur.digits(1, 1)?)? * 100),
        "SS" => fields.millisecond = Some(number(&cur.digits(2, 2)?)? * 10),
        "SSS" => fields.millisecond = Some(number(&cur.digits(3, 3)?)?),
        "A" | "a" => fields.afternoon = Some(cur.word()?.eq_ignore_ascii_case("pm")),
        "Z" | "ZZ" => fields.offset_minutes = Some(cur.offset()?),
        "X" => fields.epoch_millis = Some(cur.signed()?.checked_mul(1000)?),
        "x" => fields.epoch_millis = Some(cur.signed()?),
        _ => return None,
    }
    Some(())
}

/// Parse text following `format`
///
/// `now` is the current wall-clock time in `mode`; it supplies the fields the
/// template leaves out.
pub(crate) fn parse_with_format(
    text: &str,
    format: &str,
    mode: CalendarMode,
    locale: &Locale,
    now: NaiveDateTime,
) -> Option<chrono::DateTime<Utc>> {
    let chars: Vec<char> = text.chars().collect();
    let mut cur = Cursor::new(&chars);
    let mut fields = Fields::default();

    for part in tokenize(format) {
        match part {
            Part::Literal(len) => cur.pos = (cur.pos + len).min(chars.len()),
            Part::Token(token) => read_token(token, &mut cur, &mut fields, locale)?,
        }
    }

    if let Some(millis) = fields.epoch_millis {
        return chrono::DateTime::from_timestamp_millis(millis);
    }

    let mut hour = fields.hour.unwrap_or(0);
    match fields.afternoon {
        Some(true) if hour < 12 => hour += 12,
        Some(false) if hour == 12 => hour = 0,
        _ => {}
    }

    let year = fields.year.unwrap_or_else(|| i64::from(now.year()));
    let month0 = match (fields.year, fields.month) {
        (_, Some(month)) if month > 0 => month - 1,
        (Some(_), _) => 0,
        (None, _) => i64::from(now.month0()),
    };
    let day = fields.day.unwrap_or(match (fields.year, fields.month) {
        (None, None) => i64::from(now.day()),
        _ => 1,
    });

    let wall = compose(
        year,
        month0,
        day,
        hour,
        fields.minute.unwrap_or(0),
        fields.second.unwrap_or(0),
        fields.millisecond.unwrap_or(0),
    )?;

    match fields.offset_minutes {
        Some(offset) => {
            let utc = wall.checked_sub_signed(Duration::try_minutes(i64::from(offset))?)?;
            from_wall(utc, CalendarMode::Utc, None)
        }
        None => from_wall(wall, mode, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn wall(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_milli_opt(h, min, s, ms).unwrap()
    }

    fn now() -> NaiveDateTime {
        wall(2021, 6, 15, 9, 30, 0, 0)
    }

    fn parse_utc(text: &str, format: &str) -> Option<NaiveDateTime> {
        parse_with_format(text, format, CalendarMode::Utc, &Locale::english(), now()).map(|dt| dt.naive_utc())
    }

    #[test]
    fn test_wall_clock_shapes() {
        assert_eq!(parse_wall_clock("2020-11-22"), Some(wall(2020, 11, 22, 0, 0, 0, 0)));
        assert_eq!(parse_wall_clock("2020/11/22"), Some(wall(2020, 11, 22, 0, 0, 0, 0)));
        assert_eq!(parse_wall_clock("2020-11"), Some(wall(2020, 11, 1, 0, 0, 0, 0)));
        assert_eq!(parse_wall_clock("2020"), Some(wall(2020, 1, 1, 0, 0, 0, 0)));
        assert_eq!(parse_wall_clock("20201122"), Some(wall(2020, 11, 22, 0, 0, 0, 0)));
        assert_eq!(parse_wall_clock("2020-11-22 20:00:00"), Some(wall(2020, 11, 22, 20, 0, 0, 0)));
        assert_eq!(parse_wall_clock("2020-11-22T08:05:09.5"), Some(wall(2020, 11, 22, 8, 5, 9, 500)));
        assert_eq!(parse_wall_clock("2020-11-22T08:05:09.123456"), Some(wall(2020, 11, 22, 8, 5, 9, 123)));
        assert_eq!(parse_wall_clock("not a date"), None);
        assert_eq!(parse_wall_clock("2020-11-22 garbage"), None);
    }

    #[test]
    fn test_flexible_with_offsets() {
        let expected = Utc.with_ymd_and_hms(2020, 11, 22, 7, 0, 0).unwrap();
        assert_eq!(parse_flexible("2020-11-22T07:00:00Z", CalendarMode::Local), Some(expected));
        assert_eq!(parse_flexible("2020-11-22T08:00:00+01:00", CalendarMode::Local), Some(expected));
        assert_eq!(parse_flexible("Sun, 22 Nov 2020 08:00:00 +0100", CalendarMode::Local), Some(expected));
        assert_eq!(parse_flexible("", CalendarMode::Local), None);
        assert_eq!(parse_flexible("yesterday", CalendarMode::Local), None);
    }

    #[test]
    fn test_format_tokens() {
        assert_eq!(parse_utc("22.11.2020", "D.M.YYYY"), Some(wall(2020, 11, 22, 0, 0, 0, 0)));
        assert_eq!(parse_utc("2.3.2020", "D.M.YYYY"), Some(wall(2020, 3, 2, 0, 0, 0, 0)));
        assert_eq!(
            parse_utc("2020-11-22 20:15:30", "YYYY-MM-DD HH:mm:ss"),
            Some(wall(2020, 11, 22, 20, 15, 30, 0))
        );
        assert_eq!(parse_utc("22 Nov 2020", "DD MMM YYYY"), Some(wall(2020, 11, 22, 0, 0, 0, 0)));
        assert_eq!(parse_utc("November 22nd 20", "MMMM Do YY"), Some(wall(2020, 11, 22, 0, 0, 0, 0)));
        assert_eq!(parse_utc("01/02/69", "MM/DD/YY"), Some(wall(1969, 1, 2, 0, 0, 0, 0)));
        assert_eq!(parse_utc("07:45 PM", "hh:mm A"), Some(wall(2021, 6, 15, 19, 45, 0, 0)));
        assert_eq!(parse_utc("12:10 am", "h:mm a"), Some(wall(2021, 6, 15, 0, 10, 0, 0)));
    }

    #[test]
    fn test_format_defaults_follow_now() {
        assert_eq!(parse_utc("2019", "YYYY"), Some(wall(2019, 1, 1, 0, 0, 0, 0)));
        assert_eq!(parse_utc("03", "MM"), Some(wall(2021, 3, 1, 0, 0, 0, 0)));
        assert_eq!(parse_utc("18:00", "HH:mm"), Some(wall(2021, 6, 15, 18, 0, 0, 0)));
    }

    #[test]
    fn test_format_offset_and_epoch() {
        assert_eq!(
            parse_utc("2020-11-22 08:00 +01:00", "YYYY-MM-DD HH:mm Z"),
            Some(wall(2020, 11, 22, 7, 0, 0, 0))
        );
        assert_eq!(
            parse_utc("2020-11-22 08:00 -0230", "YYYY-MM-DD HH:mm ZZ"),
            Some(wall(2020, 11, 22, 10, 30, 0, 0))
        );
        assert_eq!(parse_utc("1606032000", "X"), Some(wall(2020, 11, 22, 8, 0, 0, 0)));
    }

    #[test]
    fn test_format_rolls_over_and_rejects() {
        assert_eq!(parse_utc("30.02.2020", "DD.MM.YYYY"), Some(wall(2020, 3, 1, 0, 0, 0, 0)));
        assert_eq!(parse_utc("2020", "DD.MM.YYYY"), None);
        assert_eq!(parse_utc("22 Foo 2020", "DD MMM YYYY"), None);
        assert_eq!(parse_utc("on 22.11.2020", "[on] DD.MM.YYYY"), Some(wall(2020, 11, 22, 0, 0, 0, 0)));
    }
}
