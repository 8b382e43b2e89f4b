use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Debt, DebtStatus, Expense, WorkEntry};

/// Aggregates shown on the dashboard.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub work_days: usize,
    pub work_hours: f64,
    pub total_salary: f64,
    pub withdrawn_amount: f64,
    pub total_expenses: f64,
    pub monthly_expenses: f64,
    pub total_debts: f64,
    pub pending_debts: f64,
    pub completed_debts: f64,
    /// Salary minus withdrawals, expenses and *pending* debts only.
    pub remaining_balance: f64,
}

/// Aggregates the records into a snapshot.
///
/// `today` only decides which expenses count towards the current month.
pub fn compute_stats(
    work_entries: &[WorkEntry],
    expenses: &[Expense],
    debts: &[Debt],
    today: NaiveDate,
) -> StatsSnapshot {
    let work_days = work_entries.len();
    let work_hours: f64 = work_entries.iter().map(|w| w.total_hours).sum();
    let total_salary: f64 = work_entries.iter().map(|w| w.total_salary).sum();

    let withdrawn_amount: f64 = expenses
        .iter()
        .filter(|e| e.category.is_withdrawal())
        .map(|e| e.amount)
        .sum();
    let total_expenses: f64 = expenses
        .iter()
        .filter(|e| !e.category.is_withdrawal())
        .map(|e| e.amount)
        .sum();
    let monthly_expenses: f64 = expenses
        .iter()
        .filter(|e| {
            !e.category.is_withdrawal()
                && e.date.year() == today.year()
                && e.date.month() == today.month()
        })
        .map(|e| e.amount)
        .sum();

    let total_debts: f64 = debts.iter().map(|d| d.amount).sum();
    let pending_debts = sum_debts(debts, DebtStatus::Pending);
    let completed_debts = sum_debts(debts, DebtStatus::Completed);

    let remaining_balance = total_salary - withdrawn_amount - total_expenses - pending_debts;

    StatsSnapshot {
        work_days,
        work_hours,
        total_salary,
        withdrawn_amount,
        total_expenses,
        monthly_expenses,
        total_debts,
        pending_debts,
        completed_debts,
        remaining_balance,
    }
}

fn sum_debts(debts: &[Debt], status: DebtStatus) -> f64 {
    debts.iter().filter(|d| d.status == status).map(|d| d.amount).sum()
}
