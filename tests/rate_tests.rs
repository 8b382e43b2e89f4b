use workledger::models::{RateMode, Settings};
use workledger::rate::{derive_weekly_daily_hourly, effective_hourly_rate, fmt_amount, hours_per_month};

fn monthly(salary: Option<f64>) -> Settings {
    Settings {
        rate_mode: RateMode::Monthly,
        monthly_salary: salary,
        work_hours_per_day: Some(8.0),
        work_days_per_week: Some(5.0),
        weeks_per_month: Some(4.33),
        ..Settings::default()
    }
}

#[test]
fn test_monthly_mode_divides_salary_by_monthly_hours() {
    let s = monthly(Some(2000.0));
    assert!((hours_per_month(&s) - 173.2).abs() < 1e-9);
    assert!((effective_hourly_rate(&s) - 11.547).abs() < 1e-3);
}

#[test]
fn test_monthly_mode_uses_defaults_for_missing_fields() {
    let s = Settings {
        rate_mode: RateMode::Monthly,
        monthly_salary: Some(2000.0),
        ..Settings::default()
    };
    assert!((effective_hourly_rate(&s) - 2000.0 / 173.2).abs() < 1e-9);
}

#[test]
fn test_monthly_mode_without_salary_is_zero() {
    assert_eq!(effective_hourly_rate(&monthly(None)), 0.0);
}

#[test]
fn test_monthly_mode_falls_back_when_no_hours() {
    let s = Settings {
        hourly_rate: Some(15.0),
        work_days_per_week: Some(0.0),
        ..monthly(Some(2000.0))
    };
    assert_eq!(effective_hourly_rate(&s), 15.0);
}

#[test]
fn test_hourly_mode_defaults_to_ten() {
    let s = Settings { hourly_rate: None, ..Settings::default() };
    assert_eq!(effective_hourly_rate(&s), 10.0);
    let s = Settings { hourly_rate: Some(f64::NAN), ..Settings::default() };
    assert_eq!(effective_hourly_rate(&s), 10.0);
    let s = Settings { hourly_rate: Some(22.5), ..Settings::default() };
    assert_eq!(effective_hourly_rate(&s), 22.5);
}

#[test]
fn test_hourly_mode_ignores_monthly_salary() {
    let s = Settings {
        rate_mode: RateMode::Hourly,
        ..monthly(Some(9000.0))
    };
    assert_eq!(effective_hourly_rate(&s), 10.0);
}

#[test]
fn test_breakdown_chains_divisions() {
    let b = derive_weekly_daily_hourly(2000.0, 8.0, 5.0, 4.0);
    assert_eq!(b.weekly, 500.0);
    assert_eq!(b.daily, 100.0);
    assert_eq!(b.hourly, 12.5);
    assert_eq!(b.display(), ["500.00".to_string(), "100.00".into(), "12.50".into()]);
}

#[test]
fn test_breakdown_guards_non_finite() {
    let b = derive_weekly_daily_hourly(2000.0, 8.0, 0.0, 4.0);
    assert_eq!(b.weekly, 500.0);
    assert_eq!(b.daily, 0.0);
    assert_eq!(b.hourly, 0.0);
    assert_eq!(fmt_amount(f64::INFINITY), "0.00");
    assert_eq!(fmt_amount(f64::NAN), "0.00");
}

#[test]
fn test_breakdown_reports_hours_for_given_parameters() {
    let b = derive_weekly_daily_hourly(2000.0, 6.0, 4.0, 4.0);
    assert_eq!(b.hours_per_month, 96.0);
    assert!((b.hourly * b.hours_per_month - 2000.0).abs() < 1e-9);
    assert_eq!(derive_weekly_daily_hourly(2000.0, 8.0, 5.0, 4.33).hours_per_month, 8.0 * 5.0 * 4.33);
}
