//! Application state and the record operations the CLI and TUI drive.
//!
//! `AppState` owns one [`LedgerData`] document. Every operation validates its
//! input before touching the document, so a failed call leaves the state as it
//! was. Persisting the document is the caller's job (see `storage`).

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult, RecordKind};
use crate::models::{
    Account, Activity, ActivityItem, ActivityKind, Debt, DebtStatus, DebtType, Expense,
    ExpenseCategory, FontSize, Holiday, Language, LedgerData, RateMode, Settings, Theme,
    WorkEntry, WorkSchedule, ACTIVITY_LIMIT,
};
use crate::rate::effective_hourly_rate;
use crate::shift::compute_shift_hours;
use crate::stats::{compute_stats, StatsSnapshot};

/// Input for a new work entry.
///
/// Missing times are taken from the work schedule. Hours and salary are
/// computed unless given explicitly.
#[derive(Debug, Clone)]
pub struct NewWorkEntry {
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub total_hours: Option<f64>,
    pub total_salary: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewDebt {
    pub date: NaiveDate,
    pub amount: f64,
    pub debt_type: DebtType,
    pub description: String,
    pub status: DebtStatus,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkEntryPatch {
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub total_hours: Option<f64>,
    pub total_salary: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub category: Option<ExpenseCategory>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DebtPatch {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub debt_type: Option<DebtType>,
    pub description: Option<String>,
    pub status: Option<DebtStatus>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Default)]
pub struct SalarySettings {
    pub hourly_rate: Option<f64>,
    pub currency: Option<String>,
    pub rate_mode: Option<RateMode>,
    pub monthly_salary: Option<f64>,
    pub work_hours_per_day: Option<f64>,
    pub work_days_per_week: Option<f64>,
    pub weeks_per_month: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct AppearanceSettings {
    pub theme: Option<Theme>,
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_size: Option<FontSize>,
    pub company_name: Option<String>,
}

fn non_negative(value: f64, what: &str) -> LedgerResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LedgerError::Invalid(format!(
            "Invalid {} '{}': must be a non-negative number.",
            what, value
        )))
    }
}

fn check_optional(value: Option<f64>, what: &str) -> LedgerResult<Option<f64>> {
    value.map(|v| non_negative(v, what)).transpose()
}

fn check_color(value: &str) -> LedgerResult<()> {
    let hex = value.strip_prefix('#').unwrap_or("");
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(LedgerError::Invalid(format!("Invalid color '{}'. Use #rrggbb.", value)))
    }
}

fn not_found(kind: RecordKind, id: u64) -> LedgerError {
    LedgerError::NotFound { kind, id }
}

/// The whole application state, passed explicitly to whoever needs it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    data: LedgerData,
}

impl AppState {
    pub fn new(data: LedgerData) -> Self {
        AppState { data }
    }

    pub fn data(&self) -> &LedgerData {
        &self.data
    }

    pub fn into_data(self) -> LedgerData {
        self.data
    }

    pub fn settings(&self) -> &Settings {
        &self.data.settings
    }

    pub fn stats(&self, today: NaiveDate) -> StatsSnapshot {
        compute_stats(&self.data.work_entries, &self.data.expenses, &self.data.debts, today)
    }

    /// Rate new and re-timed work entries are paid at.
    pub fn hourly_rate(&self) -> f64 {
        effective_hourly_rate(&self.data.settings)
    }

    pub fn work_entry(&self, id: u64) -> Option<&WorkEntry> {
        self.data.work_entries.iter().find(|w| w.id == id)
    }

    pub fn expense(&self, id: u64) -> Option<&Expense> {
        self.data.expenses.iter().find(|e| e.id == id)
    }

    pub fn debt(&self, id: u64) -> Option<&Debt> {
        self.data.debts.iter().find(|d| d.id == id)
    }

    fn record_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.data
            .work_entries
            .iter()
            .map(|w| w.id)
            .chain(self.data.expenses.iter().map(|e| e.id))
            .chain(self.data.debts.iter().map(|d| d.id))
    }

    /// Creation-time milliseconds, bumped past every existing id on collision.
    ///
    /// If an imported id sits at `u64::MAX` the lowest unused id is taken instead.
    fn next_id(&self, now: DateTime<Utc>) -> u64 {
        let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        match self.record_ids().max() {
            Some(m) if m >= stamp => m.checked_add(1).unwrap_or_else(|| self.lowest_free_id()),
            _ => stamp,
        }
    }

    fn lowest_free_id(&self) -> u64 {
        let used: HashSet<u64> = self.record_ids().collect();
        (0..=u64::MAX).find(|id| !used.contains(id)).unwrap_or(0)
    }

    fn record_activity(&mut self, kind: ActivityKind, id: u64, item: ActivityItem, now: DateTime<Utc>) {
        self.data.activities.insert(0, Activity { id, kind, item, timestamp: now });
        self.data.activities.truncate(ACTIVITY_LIMIT);
    }

    pub fn add_work_entry(&mut self, req: NewWorkEntry, now: DateTime<Utc>) -> LedgerResult<&WorkEntry> {
        let schedule = self.data.work_schedule.as_ref();
        let start_time = req
            .start_time
            .or_else(|| schedule.map(|s| s.start_time))
            .ok_or_else(|| LedgerError::Invalid("A start time is required (no work schedule set).".into()))?;
        let end_time = req
            .end_time
            .or_else(|| schedule.map(|s| s.end_time))
            .ok_or_else(|| LedgerError::Invalid("An end time is required (no work schedule set).".into()))?;

        let total_hours = match check_optional(req.total_hours, "hours")? {
            Some(h) => h,
            None => compute_shift_hours(start_time, end_time),
        };
        let hourly_rate = self.hourly_rate();
        let total_salary = match check_optional(req.total_salary, "salary")? {
            Some(s) => s,
            None => total_hours * hourly_rate,
        };

        let id = self.next_id(now);
        let entry = WorkEntry {
            id,
            date: req.date,
            start_time,
            end_time,
            total_hours,
            hourly_rate,
            total_salary,
            notes: req.notes.filter(|n| !n.trim().is_empty()),
            created_at: now,
        };
        debug!(id, hours = total_hours, salary = total_salary, "adding work entry");
        self.data.work_entries.insert(0, entry.clone());
        self.record_activity(ActivityKind::Work, id, ActivityItem::Work(entry), now);
        Ok(&self.data.work_entries[0])
    }

    pub fn add_expense(&mut self, req: NewExpense, now: DateTime<Utc>) -> LedgerResult<&Expense> {
        let amount = non_negative(req.amount, "amount")?;
        let id = self.next_id(now);
        let expense = Expense {
            id,
            date: req.date,
            amount,
            category: req.category,
            description: req.description,
            created_at: now,
        };
        debug!(id, amount, category = %expense.category, "adding expense");
        self.data.expenses.insert(0, expense.clone());
        self.record_activity(ActivityKind::Expense, id, ActivityItem::Expense(expense), now);
        Ok(&self.data.expenses[0])
    }

    pub fn add_debt(&mut self, req: NewDebt, now: DateTime<Utc>) -> LedgerResult<&Debt> {
        let amount = non_negative(req.amount, "amount")?;
        let id = self.next_id(now);
        let debt = Debt {
            id,
            date: req.date,
            amount,
            debt_type: req.debt_type,
            description: req.description,
            status: req.status,
            due_date: req.due_date,
            created_at: now,
        };
        debug!(id, amount, status = %debt.status, "adding debt");
        self.data.debts.insert(0, debt.clone());
        self.record_activity(ActivityKind::Debt, id, ActivityItem::Debt(debt), now);
        Ok(&self.data.debts[0])
    }

    /// Applies `patch` to a work entry.
    ///
    /// Changing the times recomputes the hours; whenever the hours change the
    /// entry is re-rated at the current hourly rate and its salary recomputed,
    /// unless the patch carries an explicit salary.
    pub fn edit_work_entry(&mut self, id: u64, patch: WorkEntryPatch) -> LedgerResult<&WorkEntry> {
        let explicit_hours = check_optional(patch.total_hours, "hours")?;
        let explicit_salary = check_optional(patch.total_salary, "salary")?;
        let rate = self.hourly_rate();

        let idx = self
            .data
            .work_entries
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| not_found(RecordKind::WorkEntry, id))?;
        let entry = &mut self.data.work_entries[idx];

        if let Some(d) = patch.date {
            entry.date = d;
        }
        let retimed = patch.start_time.is_some() || patch.end_time.is_some();
        if let Some(t) = patch.start_time {
            entry.start_time = t;
        }
        if let Some(t) = patch.end_time {
            entry.end_time = t;
        }
        let hours_changed = retimed || explicit_hours.is_some();
        if hours_changed {
            entry.total_hours = explicit_hours.unwrap_or_else(|| compute_shift_hours(entry.start_time, entry.end_time));
            entry.hourly_rate = rate;
            entry.total_salary = entry.total_hours * rate;
        }
        if let Some(s) = explicit_salary {
            entry.total_salary = s;
        }
        if let Some(n) = patch.notes {
            entry.notes = Some(n).filter(|n| !n.trim().is_empty());
        }
        debug!(id, "work entry updated");
        Ok(&self.data.work_entries[idx])
    }

    pub fn edit_expense(&mut self, id: u64, patch: ExpensePatch) -> LedgerResult<&Expense> {
        let amount = check_optional(patch.amount, "amount")?;
        let expense = self
            .data
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found(RecordKind::Expense, id))?;
        if let Some(d) = patch.date {
            expense.date = d;
        }
        if let Some(a) = amount {
            expense.amount = a;
        }
        if let Some(c) = patch.category {
            expense.category = c;
        }
        if let Some(desc) = patch.description {
            expense.description = desc;
        }
        debug!(id, "expense updated");
        Ok(&*expense)
    }

    pub fn edit_debt(&mut self, id: u64, patch: DebtPatch) -> LedgerResult<&Debt> {
        let amount = check_optional(patch.amount, "amount")?;
        let debt = self
            .data
            .debts
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| not_found(RecordKind::Debt, id))?;
        if let Some(d) = patch.date {
            debt.date = d;
        }
        if let Some(a) = amount {
            debt.amount = a;
        }
        if let Some(t) = patch.debt_type {
            debt.debt_type = t;
        }
        if let Some(desc) = patch.description {
            debt.description = desc;
        }
        if let Some(s) = patch.status {
            debt.status = s;
        }
        if let Some(due) = patch.due_date {
            debt.due_date = due;
        }
        debug!(id, "debt updated");
        Ok(&*debt)
    }

    pub fn delete_work_entry(&mut self, id: u64) -> LedgerResult<WorkEntry> {
        let idx = self
            .data
            .work_entries
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| not_found(RecordKind::WorkEntry, id))?;
        Ok(self.data.work_entries.remove(idx))
    }

    pub fn delete_expense(&mut self, id: u64) -> LedgerResult<Expense> {
        let idx = self
            .data
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| not_found(RecordKind::Expense, id))?;
        Ok(self.data.expenses.remove(idx))
    }

    pub fn delete_debt(&mut self, id: u64) -> LedgerResult<Debt> {
        let idx = self
            .data
            .debts
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| not_found(RecordKind::Debt, id))?;
        Ok(self.data.debts.remove(idx))
    }

    /// Flips a debt between pending and completed, returning the new status.
    pub fn toggle_debt_status(&mut self, id: u64) -> LedgerResult<DebtStatus> {
        let debt = self
            .data
            .debts
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| not_found(RecordKind::Debt, id))?;
        debt.status = debt.status.toggled();
        Ok(debt.status)
    }

    pub fn update_salary_settings(&mut self, update: SalarySettings) -> LedgerResult<()> {
        let hourly_rate = check_optional(update.hourly_rate, "hourly rate")?;
        let monthly_salary = check_optional(update.monthly_salary, "monthly salary")?;
        let hours_per_day = check_optional(update.work_hours_per_day, "hours per day")?;
        let days_per_week = check_optional(update.work_days_per_week, "days per week")?;
        let weeks_per_month = check_optional(update.weeks_per_month, "weeks per month")?;
        if let Some(c) = &update.currency {
            if c.trim().is_empty() {
                return Err(LedgerError::Invalid("Currency cannot be empty.".into()));
            }
        }

        let s = &mut self.data.settings;
        if hourly_rate.is_some() {
            s.hourly_rate = hourly_rate;
        }
        if let Some(c) = update.currency {
            s.currency = c.trim().to_uppercase();
        }
        if let Some(m) = update.rate_mode {
            s.rate_mode = m;
        }
        if monthly_salary.is_some() {
            s.monthly_salary = monthly_salary;
        }
        if hours_per_day.is_some() {
            s.work_hours_per_day = hours_per_day;
        }
        if days_per_week.is_some() {
            s.work_days_per_week = days_per_week;
        }
        if weeks_per_month.is_some() {
            s.weeks_per_month = weeks_per_month;
        }
        Ok(())
    }

    pub fn update_appearance_settings(&mut self, update: AppearanceSettings) -> LedgerResult<()> {
        if let Some(c) = &update.primary_color {
            check_color(c)?;
        }
        if let Some(c) = &update.accent_color {
            check_color(c)?;
        }
        let s = &mut self.data.settings;
        if let Some(t) = update.theme {
            s.theme = t;
        }
        if let Some(c) = update.primary_color {
            s.primary_color = c.to_lowercase();
        }
        if let Some(c) = update.accent_color {
            s.accent_color = c.to_lowercase();
        }
        if let Some(f) = update.font_size {
            s.font_size = f;
        }
        if let Some(name) = update.company_name {
            s.company_name = Some(name).filter(|n| !n.trim().is_empty());
        }
        Ok(())
    }

    /// Restores the salary and appearance defaults. Records, the account,
    /// the language and the monthly-rate parameters are kept.
    pub fn reset_settings(&mut self) {
        let defaults = Settings::default();
        let s = &mut self.data.settings;
        s.hourly_rate = defaults.hourly_rate;
        s.currency = defaults.currency;
        s.theme = defaults.theme;
        s.primary_color = defaults.primary_color;
        s.accent_color = defaults.accent_color;
        s.font_size = defaults.font_size;
    }

    /// Drops every record and restores default settings.
    pub fn clear_all(&mut self) {
        self.data = LedgerData::default();
    }

    pub fn toggle_language(&mut self) -> Language {
        let lang = match self.data.settings.language {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        };
        self.data.settings.language = lang;
        lang
    }

    pub fn set_account(&mut self, username: &str, password: &str) -> LedgerResult<()> {
        if username.trim().is_empty() {
            return Err(LedgerError::Invalid("Username cannot be empty.".into()));
        }
        self.data.settings.account = Account {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        Ok(())
    }

    pub fn verify_account(&self, username: &str, password: &str) -> bool {
        self.data.settings.account.verify(username, password)
    }

    pub fn set_schedule(&mut self, schedule: Option<WorkSchedule>) {
        self.data.work_schedule = schedule;
    }

    /// Adds a holiday, replacing any holiday already on that date.
    pub fn add_holiday(&mut self, holiday: Holiday) {
        let list = self.data.holidays.get_or_insert_with(Vec::new);
        list.retain(|h| h.date != holiday.date);
        list.push(holiday);
        list.sort_by_key(|h| h.date);
    }

    pub fn remove_holiday(&mut self, date: NaiveDate) -> LedgerResult<Holiday> {
        let list = self.data.holidays.as_mut().ok_or(LedgerError::HolidayNotFound(date))?;
        let idx = list
            .iter()
            .position(|h| h.date == date)
            .ok_or(LedgerError::HolidayNotFound(date))?;
        Ok(list.remove(idx))
    }

    pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
        self.data.holidays.as_ref()?.iter().find(|h| h.date == date)
    }

    /// The persisted document, pretty-printed.
    pub fn export_json(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    /// Shallow-merges an exported document over the current state.
    ///
    /// Top-level keys present in `text` replace the current ones; missing keys
    /// keep their values. Nothing changes unless the merged document is valid.
    pub fn import_json(&mut self, text: &str) -> LedgerResult<()> {
        let incoming: Map<String, Value> = serde_json::from_str(text)?;
        let mut merged = serde_json::to_value(&self.data)?;
        if let Value::Object(current) = &mut merged {
            for (key, value) in incoming {
                current.insert(key, value);
            }
        }
        self.data = serde_json::from_value(merged)?;
        debug!(
            work = self.data.work_entries.len(),
            expenses = self.data.expenses.len(),
            debts = self.data.debts.len(),
            "import merged"
        );
        Ok(())
    }
}
