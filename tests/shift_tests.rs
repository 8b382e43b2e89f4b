use chrono::NaiveTime;
use workledger::shift::{compute_shift_hours, parse_clock_time, round2};

fn t(s: &str) -> NaiveTime {
    parse_clock_time(s).unwrap()
}

#[test]
fn test_day_shift() {
    assert_eq!(round2(compute_shift_hours(t("09:00"), t("17:00"))), 8.00);
}

#[test]
fn test_overnight_shift_wraps_to_next_day() {
    assert_eq!(round2(compute_shift_hours(t("22:00"), t("06:00"))), 8.00);
    assert_eq!(round2(compute_shift_hours(t("23:30"), t("00:15"))), 0.75);
}

#[test]
fn test_equal_times_are_zero() {
    assert_eq!(compute_shift_hours(t("08:00"), t("08:00")), 0.0);
}

#[test]
fn test_keeps_full_precision() {
    let h = compute_shift_hours(t("09:00"), t("09:20"));
    assert!((h - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(round2(h), 0.33);
}

#[test]
fn test_accepts_seconds_and_rejects_garbage() {
    assert_eq!(t("07:30:15"), NaiveTime::from_hms_opt(7, 30, 15).unwrap());
    assert_eq!(t(" 7:05 "), NaiveTime::from_hms_opt(7, 5, 0).unwrap());
    assert!(parse_clock_time("25:00").is_err());
    assert!(parse_clock_time("nine").is_err());
}
