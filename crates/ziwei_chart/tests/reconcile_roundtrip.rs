//! Calendar reconciliation through a recorded calendar backend.

mod common;

use common::{SkewedCalendar, TableCalendar, date};
use ziwei_chart::{BirthInput, LunarCalendar, LunarDate, reconcile};

#[test]
fn solar_input_keeps_date_and_describes_lunar() {
    let cal = TableCalendar::new();
    let params = BirthInput::new("2025-01-29", "16:00", "male", "solar")
        .parse()
        .unwrap();
    let birth = reconcile(&params, &cal).unwrap();
    assert_eq!(birth.solar_date, date(2025, 1, 29));
    assert!(!birth.is_lunar_input);
    assert_eq!(birth.lunar_display(), "乙巳年正月初一");
    assert_eq!(birth.pillars_override(), None);
}

#[test]
fn lunar_input_converts_and_overrides_pillars() {
    let cal = TableCalendar::new();
    let params = BirthInput::new("2025-01-01", "16:00", "male", "lunar")
        .parse()
        .unwrap();
    let birth = reconcile(&params, &cal).unwrap();
    assert_eq!(birth.solar_date, date(2025, 1, 29));
    assert!(birth.is_lunar_input);
    assert_eq!(birth.pillars_override().as_deref(), Some("乙巳 丁丑 戊戌"));
}

#[test]
fn lunar_round_trip_returns_original_date() {
    let cal = TableCalendar::new();
    for (_, row) in &cal.rows {
        let solar = cal.lunar_to_solar(&row.lunar).unwrap();
        let back = cal.describe_solar(solar).unwrap();
        assert_eq!(back.lunar, row.lunar);
    }
}

#[test]
fn leap_and_regular_month_are_distinct() {
    let cal = TableCalendar::new();
    let regular = BirthInput::new("2023-02-01", "08:00", "female", "lunar")
        .parse()
        .unwrap();
    let leap = BirthInput::new("2023-02-01", "08:00", "female", "lunar")
        .with_leap_month(true)
        .parse()
        .unwrap();
    let a = reconcile(&regular, &cal).unwrap();
    let b = reconcile(&leap, &cal).unwrap();
    assert_eq!(a.solar_date, date(2023, 2, 20));
    assert_eq!(b.solar_date, date(2023, 3, 22));
    assert_eq!(b.lunar_display(), "癸卯年闰二月初一");
}

#[test]
fn missing_leap_month_is_calendar_error() {
    let cal = TableCalendar::new();
    let params = BirthInput::new("2025-01-01", "08:00", "female", "lunar")
        .with_leap_month(true)
        .parse()
        .unwrap();
    let err = reconcile(&params, &cal).unwrap_err();
    assert_eq!(err.kind(), "calendar_conversion", "{err}");
}

#[test]
fn broken_round_trip_is_rejected() {
    let cal = SkewedCalendar(TableCalendar::new());
    let params = BirthInput::new("2023-02-01", "08:00", "female", "lunar")
        .parse()
        .unwrap();
    let err = reconcile(&params, &cal).unwrap_err();
    assert_eq!(err.kind(), "calendar_conversion");
    assert!(err.to_string().contains("2023-02-01"), "{err}");
}

#[test]
fn reconcile_is_repeatable() {
    let cal = TableCalendar::new();
    let params = BirthInput::new("2023-02-01", "08:00", "female", "lunar")
        .parse()
        .unwrap();
    assert_eq!(reconcile(&params, &cal).unwrap(), reconcile(&params, &cal).unwrap());
    assert_eq!(
        LunarDate::new(2023, 2, 1, false).unwrap(),
        match params.date {
            ziwei_chart::BirthDate::Lunar(d) => d,
            other => panic!("expected lunar date, got {other:?}"),
        }
    );
}
