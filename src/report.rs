use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::labels::{activity_title, get_text};
use crate::models::{Activity, ActivityItem, Language, LedgerData};
use crate::rate::fmt_amount;
use crate::shift::round2;
use crate::stats::StatsSnapshot;

/// Label/value pairs for the dashboard cards, in display order.
pub fn summary_rows(stats: &StatsSnapshot, currency: &str, lang: Language) -> Vec<(String, String)> {
    let money = |v: f64| format!("{} {}", fmt_amount(v), currency);
    vec![
        (get_text(lang, "Work Days", "أيام العمل").into(), stats.work_days.to_string()),
        (get_text(lang, "Work Hours", "ساعات العمل").into(), fmt_amount(stats.work_hours)),
        (get_text(lang, "Total Salary", "إجمالي الراتب").into(), money(stats.total_salary)),
        (get_text(lang, "Withdrawn", "المسحوب").into(), money(stats.withdrawn_amount)),
        (get_text(lang, "Total Expenses", "إجمالي المصاريف").into(), money(stats.total_expenses)),
        (get_text(lang, "This Month's Expenses", "مصاريف هذا الشهر").into(), money(stats.monthly_expenses)),
        (get_text(lang, "Total Debts", "إجمالي الديون").into(), money(stats.total_debts)),
        (get_text(lang, "Pending Debts", "ديون غير مسددة").into(), money(stats.pending_debts)),
        (get_text(lang, "Paid Debts", "ديون مسددة").into(), money(stats.completed_debts)),
        (get_text(lang, "Remaining Balance", "الرصيد المتبقي").into(), money(stats.remaining_balance)),
    ]
}

/// One-line title and description of an activity-log entry.
pub fn describe_activity(activity: &Activity, currency: &str, lang: Language) -> (String, String) {
    let title = activity_title(activity.kind, lang).to_string();
    let description = match &activity.item {
        ActivityItem::Work(w) => format!(
            "{} {:.2} {} - {} {}",
            get_text(lang, "Worked", "عمل"),
            round2(w.total_hours),
            get_text(lang, "hours", "ساعات"),
            fmt_amount(w.total_salary),
            currency
        ),
        ActivityItem::Expense(e) => format!("{} - {} {}", e.description, fmt_amount(e.amount), currency),
        ActivityItem::Debt(d) => format!("{} - {} {}", d.description, fmt_amount(d.amount), currency),
    };
    (title, description)
}

/// Writes `work.csv`, `expenses.csv` and `debts.csv` into `dir`.
pub fn write_csv(data: &LedgerData, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let work_path = dir.join("work.csv");
    let mut wtr = csv::Writer::from_path(&work_path)?;
    wtr.write_record(["id", "date", "start", "end", "hours", "rate", "salary", "notes"])?;
    for w in &data.work_entries {
        wtr.write_record([
            w.id.to_string(),
            w.date.to_string(),
            w.start_time.format("%H:%M").to_string(),
            w.end_time.format("%H:%M").to_string(),
            fmt_amount(w.total_hours),
            fmt_amount(w.hourly_rate),
            fmt_amount(w.total_salary),
            w.notes.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;

    let expenses_path = dir.join("expenses.csv");
    let mut wtr = csv::Writer::from_path(&expenses_path)?;
    wtr.write_record(["id", "date", "category", "description", "amount"])?;
    for e in &data.expenses {
        wtr.write_record([
            e.id.to_string(),
            e.date.to_string(),
            e.category.code().to_string(),
            e.description.clone(),
            fmt_amount(e.amount),
        ])?;
    }
    wtr.flush()?;

    let debts_path = dir.join("debts.csv");
    let mut wtr = csv::Writer::from_path(&debts_path)?;
    wtr.write_record(["id", "date", "type", "description", "amount", "status", "due"])?;
    for d in &data.debts {
        wtr.write_record([
            d.id.to_string(),
            d.date.to_string(),
            d.debt_type.code().to_string(),
            d.description.clone(),
            fmt_amount(d.amount),
            d.status.code().to_string(),
            d.due_date.map(|due| due.to_string()).unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;

    Ok(vec![work_path, expenses_path, debts_path])
}
