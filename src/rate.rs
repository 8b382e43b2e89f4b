use serde::Serialize;

use crate::models::{RateMode, Settings, DEFAULT_HOURLY_RATE};

pub const DEFAULT_WEEKS_PER_MONTH: f64 = 4.33;
pub const DEFAULT_WORK_DAYS_PER_WEEK: f64 = 5.0;
pub const DEFAULT_WORK_HOURS_PER_DAY: f64 = 8.0;

/// Returns `value` if it is a finite number, `0.0` otherwise.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn or_default(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

/// Hours worked in a month under the configured schedule.
pub fn hours_per_month(settings: &Settings) -> f64 {
    or_default(settings.weeks_per_month, DEFAULT_WEEKS_PER_MONTH)
        * or_default(settings.work_days_per_week, DEFAULT_WORK_DAYS_PER_WEEK)
        * or_default(settings.work_hours_per_day, DEFAULT_WORK_HOURS_PER_DAY)
}

/// The hourly rate new work entries are paid at.
///
/// In monthly mode the rate is the monthly salary spread over the monthly
/// hours; a non-positive hour count falls back to the stored hourly rate.
pub fn effective_hourly_rate(settings: &Settings) -> f64 {
    let stored = or_default(settings.hourly_rate, DEFAULT_HOURLY_RATE);
    let rate = match settings.rate_mode {
        RateMode::Monthly => {
            let hours = hours_per_month(settings);
            if hours > 0.0 {
                or_default(settings.monthly_salary, 0.0) / hours
            } else {
                stored
            }
        }
        RateMode::Hourly => stored,
    };
    finite_or_zero(rate)
}

/// A monthly salary broken down per week, day and hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryBreakdown {
    pub weekly: f64,
    pub daily: f64,
    pub hourly: f64,
    /// Hours in a month under the same parameters.
    pub hours_per_month: f64,
}

impl SalaryBreakdown {
    /// Two-decimal display strings, in weekly/daily/hourly order.
    pub fn display(&self) -> [String; 3] {
        [fmt_amount(self.weekly), fmt_amount(self.daily), fmt_amount(self.hourly)]
    }
}

pub fn derive_weekly_daily_hourly(
    monthly: f64,
    hours_per_day: f64,
    days_per_week: f64,
    weeks_per_month: f64,
) -> SalaryBreakdown {
    let weekly = monthly / weeks_per_month;
    let daily = weekly / days_per_week;
    let hourly = daily / hours_per_day;
    SalaryBreakdown {
        weekly: finite_or_zero(weekly),
        daily: finite_or_zero(daily),
        hourly: finite_or_zero(hourly),
        hours_per_month: finite_or_zero(hours_per_day * days_per_week * weeks_per_month),
    }
}

/// Formats an amount with two decimals; anything non-finite shows as `0.00`.
pub fn fmt_amount(value: f64) -> String {
    format!("{:.2}", finite_or_zero(value))
}
