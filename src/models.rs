use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::LedgerError;

/// Maximum number of entries kept in the recent-activity log.
pub const ACTIVITY_LIMIT: usize = 10;

pub const DEFAULT_HOURLY_RATE: f64 = 10.0;
pub const DEFAULT_CURRENCY: &str = "EUR";
pub const DEFAULT_PRIMARY_COLOR: &str = "#3b82f6";
pub const DEFAULT_ACCENT_COLOR: &str = "#10b981";

/// Wall-clock times stored as `HH:MM` (seconds only when non-zero).
mod clock {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        if t.second() == 0 {
            s.collect_str(&t.format("%H:%M"))
        } else {
            s.collect_str(&t.format("%H:%M:%S"))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        crate::shift::parse_clock_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// Numbers that may arrive as JSON numbers, numeric strings, or junk.
/// Anything that is not a finite number reads as `None`.
fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v = Value::deserialize(d)?;
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(n.filter(|x| x.is_finite()))
}

/// Optional dates where an empty string means "not set".
fn optional_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A logged work shift.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub id: u64,
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    /// Shift length at full precision.
    pub total_hours: f64,
    pub hourly_rate: f64,
    /// Nominally `total_hours * hourly_rate`, but may be overridden by the user.
    pub total_salary: f64,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Bills,
    Utilities,
    Entertainment,
    Shopping,
    Health,
    Education,
    /// Cash taken out of earned salary. Not an expense for aggregation purposes.
    Withdrawal,
    #[serde(other)]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 10] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Bills,
        ExpenseCategory::Utilities,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Shopping,
        ExpenseCategory::Health,
        ExpenseCategory::Education,
        ExpenseCategory::Withdrawal,
        ExpenseCategory::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Bills => "bills",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Health => "health",
            ExpenseCategory::Education => "education",
            ExpenseCategory::Withdrawal => "withdrawal",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn is_withdrawal(self) -> bool {
        self == ExpenseCategory::Withdrawal
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: u64,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DebtType {
    Loan,
    Credit,
    Personal,
    #[serde(other)]
    Other,
}

impl DebtType {
    pub const ALL: [DebtType; 4] = [DebtType::Loan, DebtType::Credit, DebtType::Personal, DebtType::Other];

    pub fn code(self) -> &'static str {
        match self {
            DebtType::Loan => "loan",
            DebtType::Credit => "credit",
            DebtType::Personal => "personal",
            DebtType::Other => "other",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    #[default]
    Pending,
    Completed,
}

impl DebtStatus {
    pub fn code(self) -> &'static str {
        match self {
            DebtStatus::Pending => "pending",
            DebtStatus::Completed => "completed",
        }
    }

    pub fn toggled(self) -> DebtStatus {
        match self {
            DebtStatus::Pending => DebtStatus::Completed,
            DebtStatus::Completed => DebtStatus::Pending,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: u64,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(rename = "type")]
    pub debt_type: DebtType,
    #[serde(default)]
    pub description: String,
    pub status: DebtStatus,
    #[serde(default, deserialize_with = "optional_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RateMode {
    #[default]
    Hourly,
    Monthly,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

/// Local login credentials. Compared in plaintext; there is no security boundary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Account {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Account {
    pub fn verify(&self, username: &str, password: &str) -> bool {
        !self.username.is_empty() && self.username == username && self.password == password
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub rate_mode: RateMode,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub monthly_salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub work_hours_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub work_days_per_week: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub weeks_per_month: Option<f64>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub account: Account,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_primary_color() -> String {
    DEFAULT_PRIMARY_COLOR.to_string()
}

fn default_accent_color() -> String {
    DEFAULT_ACCENT_COLOR.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            hourly_rate: Some(DEFAULT_HOURLY_RATE),
            currency: default_currency(),
            rate_mode: RateMode::Hourly,
            monthly_salary: None,
            work_hours_per_day: None,
            work_days_per_week: None,
            weeks_per_month: None,
            theme: Theme::Light,
            primary_color: default_primary_color(),
            accent_color: default_accent_color(),
            font_size: FontSize::Medium,
            company_name: None,
            language: Language::En,
            account: Account::default(),
        }
    }
}

/// Usual shift hours, used when a work entry is logged without times.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkSchedule {
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub work_days: Vec<Weekday>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Holiday {
    pub date: NaiveDate,
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Work,
    Expense,
    Debt,
}

/// Snapshot of the record that was created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ActivityItem {
    Work(WorkEntry),
    Expense(Expense),
    Debt(Debt),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub item: ActivityItem,
    pub timestamp: DateTime<Utc>,
}

/// Everything the application persists, stored as one JSON document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LedgerData {
    #[serde(default)]
    pub work_entries: Vec<WorkEntry>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_schedule: Option<WorkSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holidays: Option<Vec<Holiday>>,
}

macro_rules! code_enum {
    ($ty:ty, $what:literal, [$($code:literal => $variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($code => Ok($variant),)+
                    other => Err(LedgerError::Invalid(format!(
                        "Unknown {} '{}'. Expected one of: {}",
                        $what,
                        other,
                        [$($code),+].join(", ")
                    ))),
                }
            }
        }
    };
}

code_enum!(ExpenseCategory, "category", [
    "food" => ExpenseCategory::Food,
    "transport" => ExpenseCategory::Transport,
    "bills" => ExpenseCategory::Bills,
    "utilities" => ExpenseCategory::Utilities,
    "entertainment" => ExpenseCategory::Entertainment,
    "shopping" => ExpenseCategory::Shopping,
    "health" => ExpenseCategory::Health,
    "education" => ExpenseCategory::Education,
    "withdrawal" => ExpenseCategory::Withdrawal,
    "other" => ExpenseCategory::Other,
]);
code_enum!(DebtType, "debt type", [
    "loan" => DebtType::Loan,
    "credit" => DebtType::Credit,
    "personal" => DebtType::Personal,
    "other" => DebtType::Other,
]);
code_enum!(DebtStatus, "status", [
    "pending" => DebtStatus::Pending,
    "completed" => DebtStatus::Completed,
]);
code_enum!(RateMode, "rate mode", [
    "hourly" => RateMode::Hourly,
    "monthly" => RateMode::Monthly,
]);
code_enum!(Theme, "theme", [
    "light" => Theme::Light,
    "dark" => Theme::Dark,
    "auto" => Theme::Auto,
]);
code_enum!(FontSize, "font size", [
    "small" => FontSize::Small,
    "medium" => FontSize::Medium,
    "large" => FontSize::Large,
]);
code_enum!(Language, "language", [
    "en" => Language::En,
    "ar" => Language::Ar,
]);

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for DebtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
