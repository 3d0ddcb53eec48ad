use shared_datetime::*;

// 2020-11-22T08:00:00Z
const SUNDAY_MORNING_MS: i64 = 1_606_032_000_000;

#[test]
fn test_flexible_parsing_shapes() {
    assert_eq!(datetime_utc("2020-11-22").format("YYYY-MM-DD HH:mm"), "2020-11-22 00:00");
    assert_eq!(datetime_utc("2020/11/22 08:30").format("YYYY-MM-DD HH:mm"), "2020-11-22 08:30");
    assert_eq!(datetime_utc("2020-11").format("YYYY-MM-DD"), "2020-11-01");
    assert_eq!(datetime_utc("2020-11-22T08:05:09.5").format("HH:mm:ss.SSS"), "08:05:09.500");
    assert!(!datetime_utc("22/11/2020").is_valid());
}

#[test]
fn test_flexible_parsing_with_offsets() {
    assert_eq!(datetime("2020-11-22T08:00:00Z").value_of(), Some(SUNDAY_MORNING_MS));
    assert_eq!(datetime("2020-11-22T09:00:00+01:00").value_of(), Some(SUNDAY_MORNING_MS));
    assert_eq!(datetime("Sun, 22 Nov 2020 08:00:00 +0000").value_of(), Some(SUNDAY_MORNING_MS));
}

#[test]
fn test_format_parsing() {
    let parsed = datetime_utc_with_format("22.11.2020 08:00", "DD.MM.YYYY HH:mm");
    assert_eq!(parsed.value_of(), Some(SUNDAY_MORNING_MS));

    let named = datetime_utc_with_format("Nov 22nd, 2020 8:00 am", "MMM Do, YYYY h:mm a");
    assert_eq!(named.value_of(), Some(SUNDAY_MORNING_MS));

    let zoned = datetime_with_format("2020-11-22 10:00 +02:00", "YYYY-MM-DD HH:mm Z");
    assert_eq!(zoned.value_of(), Some(SUNDAY_MORNING_MS));

    let epoch = datetime_with_format("1606032000", "X");
    assert_eq!(epoch.value_of(), Some(SUNDAY_MORNING_MS));
}

#[test]
fn test_format_parsing_ignored_for_non_text() {
    let value = datetime_utc_with_format(SUNDAY_MORNING_MS, "DD.MM.YYYY");
    assert_eq!(value.value_of(), Some(SUNDAY_MORNING_MS));
}

#[test]
fn test_format_parsing_mismatch_is_invalid() {
    assert!(!datetime_with_format("2020-11-22", "DD.MM.YYYY").is_valid());
    assert!(!datetime_with_format("", "DD.MM.YYYY").is_valid());
}

#[test]
fn test_strict_parsing() {
    assert!(datetime_strict("2020-02-28", "YYYY-MM-DD").is_valid());
    assert!(!datetime_strict("2020-02-30", "YYYY-MM-DD").is_valid());
    assert!(!datetime_strict("2020-2-28", "YYYY-MM-DD").is_valid());
    assert!(datetime_with_format("2020-02-30", "YYYY-MM-DD").is_valid());
}

#[test]
fn test_token_rendering() {
    let value = datetime_utc(SUNDAY_MORNING_MS);
    assert_eq!(value.format("YYYY YY M MM MMM MMMM"), "2020 20 11 11 Nov November");
    assert_eq!(value.format("D DD Do d dd ddd dddd"), "22 22 22nd 0 Su Sun Sunday");
    assert_eq!(value.format("H HH h hh k A a"), "8 08 8 08 8 AM am");
    assert_eq!(value.format("m mm s ss SSS Q"), "0 00 0 00 000 4");
    assert_eq!(value.format("Z ZZ X x"), "+00:00 +0000 1606032000 1606032000000");
    assert_eq!(value.format("[Week day:] dddd"), "Week day: Sunday");
}

#[test]
fn test_localized_tokens() {
    let value = datetime_utc(SUNDAY_MORNING_MS);
    assert_eq!(value.format("LT"), "8:00 AM");
    assert_eq!(value.format("LTS"), "8:00:00 AM");
    assert_eq!(value.format("L"), "11/22/2020");
    assert_eq!(value.format("LL"), "November 22, 2020");
    assert_eq!(value.format("LLL"), "November 22, 2020 8:00 AM");
    assert_eq!(value.format("LLLL"), "Sunday, November 22, 2020 8:00 AM");
}

#[test]
fn test_format_presets() {
    let value = datetime_utc(SUNDAY_MORNING_MS);
    assert_eq!(value.format(DateTimeFormat::Short), "22.11.2020");
    assert_eq!(value.format(DateTimeFormat::Long), "Sunday 22.November 2020");
    assert_eq!(value.format(DateTimeFormat::Server), "2020-11-22");
    assert_eq!(value.format(DateTimeFormat::TimeZone), "2020-11-22T08:00:00.000");
    assert_eq!(value.format(DateTimeFormat::Comparison), "22 Nov 2020 08:00:00");
}

#[test]
fn test_explicit_locale_formatting() {
    let value = datetime_utc(SUNDAY_MORNING_MS);
    let german = Locale::german();
    let french = Locale::french();
    let italian = Locale::italian();

    assert_eq!(value.format_in("dddd, D. MMMM YYYY", &german), "Sonntag, 22. November 2020");
    assert_eq!(value.format_in("LLLL", &german), "Sonntag, 22. November 2020 08:00");
    assert_eq!(value.format_in("dddd D MMMM", &french), "dimanche 22 novembre");
    assert_eq!(value.format_in("L", &italian), "22/11/2020");
    assert_eq!(datetime_utc("2020-11-01").format_in("Do MMMM", &french), "1er novembre");
}

#[test]
fn test_explicit_locale_parsing() {
    let german = Locale::german();
    let value = DateTime::new_in("22. November 2020", Some("D. MMMM YYYY"), CalendarMode::Utc, &german);
    assert_eq!(value.format("YYYY-MM-DD"), "2020-11-22");
}

#[test]
fn test_explicit_locale_week_start() {
    let german = Locale::german();
    let friday = datetime("2021-10-22");

    assert_eq!(friday.start_of_in(Unit::Week, &german), datetime("2021-10-18"));
    assert_eq!(friday.end_of_in(Unit::Week, &german), datetime("2021-10-25").subtract(1, Unit::Millisecond));
    assert_eq!(friday.weekday_in(&german), Some(4));
    assert_eq!(datetime("2021-12-20").with_weekday_in(6, &german), datetime("2021-12-26"));
}

#[test]
fn test_unit_and_inclusion_parsing() {
    assert_eq!("M".parse::<Unit>(), Ok(Unit::Month));
    assert_eq!("m".parse::<Unit>(), Ok(Unit::Minute));
    assert_eq!("Days".parse::<Unit>(), Ok(Unit::Day));
    assert_eq!("ms".parse::<Unit>(), Ok(Unit::Millisecond));
    assert_eq!("fortnight".parse::<Unit>(), Err(DateTimeError::UnknownUnit("fortnight".to_string())));

    assert_eq!("[)".parse::<Inclusion>(), Ok(Inclusion::IncludeStartOnly));
    assert_eq!(Inclusion::default(), Inclusion::Exclusive);
    assert_eq!(Inclusion::IncludeEndOnly.to_string(), "(]");
    assert!("<>".parse::<Inclusion>().is_err());

    assert_eq!("UTC".parse::<CalendarMode>(), Ok(CalendarMode::Utc));
}

#[test]
fn test_serde_round_trip() {
    let value = datetime(SUNDAY_MORNING_MS);
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, "\"2020-11-22T08:00:00.000Z\"");

    let back: DateTime = serde_json::from_str(&json).unwrap();
    assert_eq!(back, value);

    assert_eq!(serde_json::to_string(&DateTime::invalid()).unwrap(), "null");
    let null: DateTime = serde_json::from_str("null").unwrap();
    assert!(!null.is_valid());
    assert!(serde_json::from_str::<DateTime>("\"garbage\"").is_err());
}

#[test]
fn test_unit_serialization() {
    assert_eq!(serde_json::to_string(&Unit::Month).unwrap(), "\"month\"");
    assert_eq!(serde_json::from_str::<Unit>("\"week\"").unwrap(), Unit::Week);
}
