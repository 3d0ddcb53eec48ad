use shared_datetime::*;
use std::sync::Arc;

fn adapter() -> DateTimeAdapter {
    DateTimeAdapter::new()
}

fn german_adapter() -> DateTimeAdapter {
    DateTimeAdapter::with_locale(Arc::new(Locale::german()))
}

#[test]
fn test_field_getters() {
    let date = datetime("2021-10-22");
    let adapter = adapter();

    assert_eq!(adapter.get_year(&date), Some(2021));
    assert_eq!(adapter.get_month(&date), Some(9));
    assert_eq!(adapter.get_date(&date), Some(22));
    assert_eq!(adapter.get_day_of_week(&date), Some(5));
    assert_eq!(adapter.get_num_days_in_month(&date), Some(31));
    assert_eq!(adapter.get_year_name(&date), "2021");
}

#[test]
fn test_getters_on_invalid_date() {
    let adapter = adapter();
    let invalid = adapter.invalid();

    assert!(!adapter.is_valid(&invalid));
    assert_eq!(adapter.get_year(&invalid), None);
    assert_eq!(adapter.get_day_of_week(&invalid), None);
}

#[test]
fn test_month_names() {
    let adapter = adapter();
    assert_eq!(adapter.get_month_names(NameStyle::Long)[0], "January");
    assert_eq!(adapter.get_month_names(NameStyle::Short)[0], "Jan");
    assert_eq!(adapter.get_month_names(NameStyle::Narrow)[0], "Jan");
    assert_eq!(adapter.get_month_names(NameStyle::Long).len(), 12);
}

#[test]
fn test_day_of_week_names() {
    let adapter = adapter();
    assert_eq!(adapter.get_day_of_week_names(NameStyle::Long)[0], "Sunday");
    assert_eq!(adapter.get_day_of_week_names(NameStyle::Short)[0], "Sun");
    assert_eq!(adapter.get_day_of_week_names(NameStyle::Narrow)[0], "Su");
}

#[test]
fn test_date_names() {
    let names = adapter().get_date_names();
    assert_eq!(names.len(), 31);
    assert_eq!(names[0], "1");
    assert_eq!(names[30], "31");
}

#[test]
fn test_first_day_of_week_follows_locale() {
    assert_eq!(adapter().get_first_day_of_week(), 0);
    assert_eq!(german_adapter().get_first_day_of_week(), 1);
    assert_eq!(german_adapter().get_month_names(NameStyle::Long)[2], "März");
}

#[test]
fn test_create_date() {
    let adapter = adapter();
    assert_eq!(adapter.create_date(2020, 10, 22), Ok(datetime("2020-11-22")));
    assert_eq!(adapter.create_date(2020, 1, 29), Ok(datetime("2020-02-29")));
}

#[test]
fn test_create_date_rejects_out_of_range_fields() {
    let adapter = adapter();
    assert_eq!(
        adapter.create_date(2020, 12, 1),
        Err(DateTimeError::InvalidCalendarField { field: "month", value: 12 })
    );
    assert_eq!(
        adapter.create_date(2021, 1, 29),
        Err(DateTimeError::InvalidCalendarField { field: "date", value: 29 })
    );
    assert!(adapter.create_date(2021, 0, 0).is_err());
}

#[test]
fn test_parse() {
    let adapter = adapter();
    let format = DATE_TIME_FORMATS.parse.date_input;

    assert_eq!(adapter.parse("", format), None);
    assert_eq!(adapter.parse("22.11.2020", format), Some(datetime("2020-11-22")));
    assert_eq!(adapter.parse("2.3.2021", format), Some(datetime("2021-03-02")));

    let garbage = adapter.parse("garbage", format).unwrap();
    assert!(!adapter.is_valid(&garbage));
}

#[test]
fn test_format() {
    let adapter = adapter();
    let date = datetime("2020-11-22");
    let display = DATE_TIME_FORMATS.display;

    assert_eq!(adapter.format(&date, display.date_input), Ok("22.11.2020".to_string()));
    assert_eq!(adapter.format(&date, display.month_year_label), Ok("Nov 2020".to_string()));
    assert_eq!(adapter.format(&date, display.date_a11y_label), Ok("November 22, 2020".to_string()));
    assert_eq!(adapter.format(&date, display.month_year_a11y_label), Ok("November 2020".to_string()));
    assert_eq!(german_adapter().format(&date, display.date_a11y_label), Ok("22. November 2020".to_string()));
}

#[test]
fn test_format_invalid_date_fails() {
    let adapter = adapter();
    assert_eq!(
        adapter.format(&adapter.invalid(), "DD.MM.YYYY"),
        Err(DateTimeError::InvalidDate("format"))
    );
    assert!(adapter.to_iso8601(&adapter.invalid()).is_err());
}

#[test]
fn test_calendar_arithmetic() {
    let adapter = adapter();
    let date = datetime("2021-01-31");

    assert_eq!(adapter.add_calendar_years(&date, 1), datetime("2022-01-31"));
    assert_eq!(adapter.add_calendar_months(&date, 1), datetime("2021-02-28"));
    assert_eq!(adapter.add_calendar_days(&date, 1), datetime("2021-02-01"));
    assert_eq!(adapter.add_calendar_days(&date, -31), datetime("2020-12-31"));
}

#[test]
fn test_clone_today_and_iso() {
    let adapter = adapter();
    let date = datetime_utc("2020-11-22T08:00:00Z");

    assert_eq!(adapter.clone_date(&date), date);
    assert!(adapter.is_valid(&adapter.today()));
    assert_eq!(adapter.to_iso8601(&date), Ok("2020-11-22T08:00:00.000Z".to_string()));
}

#[test]
fn test_compare_date_ignores_time() {
    let adapter = adapter();
    let morning = datetime("2020-11-22 08:00");
    let evening = datetime("2020-11-22 20:00");
    let next_day = datetime("2020-11-23 01:00");

    assert!(adapter.same_date(&morning, &evening));
    assert_eq!(adapter.compare_date(&evening, &next_day), Some(std::cmp::Ordering::Less));
    assert_eq!(adapter.compare_date(&morning, &adapter.invalid()), None);
}

#[test]
fn test_weekend_filter() {
    let friday = datetime("2021-10-22");
    let saturday = datetime("2021-10-23");
    let sunday = datetime("2021-10-24");

    let filter = weekend_filter(true);
    assert!(filter(&friday));
    assert!(!filter(&saturday));
    assert!(!filter(&sunday));
    assert!(filter(&DateTime::invalid()));

    let allow_all = weekend_filter(false);
    assert!(allow_all(&saturday));
    assert!(allow_all(&sunday));
}
