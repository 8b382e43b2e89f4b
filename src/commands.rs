use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveTime, Utc, Weekday};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use tracing::info;

use crate::labels::{category_label, debt_type_label, get_text, status_label};
use crate::ledger::{
    AppState, AppearanceSettings, DebtPatch, ExpensePatch, NewDebt, NewExpense, NewWorkEntry,
    SalarySettings, WorkEntryPatch,
};
use crate::models::{DebtStatus, DebtType, ExpenseCategory, Holiday, Language, WorkSchedule};
use crate::rate::{
    derive_weekly_daily_hourly, fmt_amount, DEFAULT_WEEKS_PER_MONTH,
    DEFAULT_WORK_DAYS_PER_WEEK, DEFAULT_WORK_HOURS_PER_DAY,
};
use crate::report::{describe_activity, summary_rows, write_csv};
use crate::shift::{parse_clock_time, round2};
use crate::storage::{default_export_name, export_to, import_from, load_state, save_state};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

fn parse_date_or_today(s: Option<String>) -> Result<NaiveDate> {
    s.map(|d| parse_date(&d)).unwrap_or_else(|| Ok(today()))
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    Ok(parse_clock_time(s)?)
}

fn parse_optional_time(s: Option<String>) -> Result<Option<NaiveTime>> {
    s.map(|t| parse_time(&t)).transpose()
}

fn parse_weekdays(s: &str) -> Result<Vec<Weekday>> {
    s.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            d.parse::<Weekday>()
                .map_err(|_| anyhow::anyhow!("Invalid weekday '{}', expected e.g. mon,tue,wed", d))
        })
        .collect()
}

/// Asks a yes/no question on stdin. Anything but `y` means no.
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Persists the state and reports the outcome with the refreshed balance.
fn finish(state: &AppState, message: String, silent: bool) -> Result<()> {
    save_state(state)?;
    info!("{}", message);
    if !silent {
        let stats = state.stats(today());
        let s = state.settings();
        println!(
            "{} {}: {} {}",
            message,
            get_text(s.language, "Remaining balance", "الرصيد المتبقي"),
            fmt_amount(stats.remaining_balance),
            s.currency
        );
    }
    Ok(())
}

fn header(table: &mut Table, cols: &[&str]) {
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(cols.iter().map(|c| Cell::new(c).add_attribute(Attribute::Bold)));
}

// ----- work entries -----

/// Logs a work shift. Missing times come from the work schedule.
#[allow(clippy::too_many_arguments)]
pub fn cmd_work_add(
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    hours: Option<f64>,
    salary: Option<f64>,
    notes: Option<String>,
    silent: bool,
) -> Result<()> {
    let date = parse_date_or_today(date)?;
    let req = NewWorkEntry {
        date,
        start_time: parse_optional_time(start)?,
        end_time: parse_optional_time(end)?,
        total_hours: hours,
        total_salary: salary,
        notes,
    };
    let mut state = load_state()?;
    let (id, h, pay) = {
        let entry = state.add_work_entry(req, Utc::now())?;
        (entry.id, entry.total_hours, entry.total_salary)
    };
    if let Some(holiday) = state.holiday_on(date) {
        if !silent {
            println!("Note: {} is a holiday ({}).", date, holiday.name);
        }
    }
    let currency = state.settings().currency.clone();
    finish(
        &state,
        format!("Work entry added (id = {}, {:.2}h, {} {}).", id, round2(h), fmt_amount(pay), currency),
        silent,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_work_edit(
    id: u64,
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    hours: Option<f64>,
    salary: Option<f64>,
    notes: Option<String>,
    silent: bool,
) -> Result<()> {
    let patch = WorkEntryPatch {
        date: date.map(|d| parse_date(&d)).transpose()?,
        start_time: parse_optional_time(start)?,
        end_time: parse_optional_time(end)?,
        total_hours: hours,
        total_salary: salary,
        notes,
    };
    let mut state = load_state()?;
    state.edit_work_entry(id, patch)?;
    finish(&state, format!("Work entry {} updated.", id), silent)
}

pub fn cmd_work_remove(id: u64, force: bool, silent: bool) -> Result<()> {
    let mut state = load_state()?;
    if state.work_entry(id).is_none() {
        anyhow::bail!("Work entry {} not found.", id);
    }
    if !force && !confirm(&format!("Delete work entry {}?", id))? {
        println!("Aborted.");
        return Ok(());
    }
    state.delete_work_entry(id)?;
    finish(&state, format!("Work entry {} removed.", id), silent)
}

pub fn cmd_work_list() -> Result<()> {
    let state = load_state()?;
    let s = state.settings();
    let lang = s.language;
    let entries = &state.data().work_entries;
    if entries.is_empty() {
        println!("{}", get_text(lang, "No work entries found.", "لا توجد إدخالات عمل."));
        return Ok(());
    }
    let mut table = Table::new();
    header(&mut table, &[
        "ID",
        get_text(lang, "Date", "التاريخ"),
        get_text(lang, "Start", "البداية"),
        get_text(lang, "End", "النهاية"),
        get_text(lang, "Hours", "الساعات"),
        get_text(lang, "Rate", "السعر"),
        get_text(lang, "Salary", "الراتب"),
        get_text(lang, "Notes", "ملاحظات"),
    ]);
    for w in entries {
        table.add_row(vec![
            Cell::new(w.id),
            Cell::new(w.date),
            Cell::new(w.start_time.format("%H:%M")),
            Cell::new(w.end_time.format("%H:%M")),
            Cell::new(format!("{:.2}", round2(w.total_hours))),
            Cell::new(fmt_amount(w.hourly_rate)),
            Cell::new(fmt_amount(w.total_salary)).fg(Color::Green),
            Cell::new(w.notes.clone().unwrap_or_default()),
        ]);
    }
    println!("{table}");
    Ok(())
}

// ----- expenses -----

pub fn cmd_expense_add(
    date: Option<String>,
    amount: f64,
    category: ExpenseCategory,
    description: String,
    silent: bool,
) -> Result<()> {
    let req = NewExpense {
        date: parse_date_or_today(date)?,
        amount,
        category,
        description,
    };
    let mut state = load_state()?;
    let id = state.add_expense(req, Utc::now())?.id;
    finish(&state, format!("Expense added (id = {}).", id), silent)
}

pub fn cmd_expense_edit(
    id: u64,
    date: Option<String>,
    amount: Option<f64>,
    category: Option<ExpenseCategory>,
    description: Option<String>,
    silent: bool,
) -> Result<()> {
    let patch = ExpensePatch {
        date: date.map(|d| parse_date(&d)).transpose()?,
        amount,
        category,
        description,
    };
    let mut state = load_state()?;
    state.edit_expense(id, patch)?;
    finish(&state, format!("Expense {} updated.", id), silent)
}

pub fn cmd_expense_remove(id: u64, force: bool, silent: bool) -> Result<()> {
    let mut state = load_state()?;
    if state.expense(id).is_none() {
        anyhow::bail!("Expense {} not found.", id);
    }
    if !force && !confirm(&format!("Delete expense {}?", id))? {
        println!("Aborted.");
        return Ok(());
    }
    state.delete_expense(id)?;
    finish(&state, format!("Expense {} removed.", id), silent)
}

pub fn cmd_expense_list() -> Result<()> {
    let state = load_state()?;
    let lang = state.settings().language;
    let expenses = &state.data().expenses;
    if expenses.is_empty() {
        println!("{}", get_text(lang, "No expenses found.", "لا توجد مصاريف."));
        return Ok(());
    }
    let mut table = Table::new();
    header(&mut table, &[
        "ID",
        get_text(lang, "Date", "التاريخ"),
        get_text(lang, "Category", "الفئة"),
        get_text(lang, "Description", "الوصف"),
        get_text(lang, "Amount", "المبلغ"),
    ]);
    for e in expenses {
        let color = if e.category.is_withdrawal() { Color::Yellow } else { Color::Reset };
        table.add_row(vec![
            Cell::new(e.id),
            Cell::new(e.date),
            Cell::new(category_label(e.category, lang)).fg(color),
            Cell::new(&e.description),
            Cell::new(fmt_amount(e.amount)),
        ]);
    }
    println!("{table}");
    Ok(())
}

// ----- debts -----

pub fn cmd_debt_add(
    date: Option<String>,
    amount: f64,
    debt_type: DebtType,
    description: String,
    status: DebtStatus,
    due: Option<String>,
    silent: bool,
) -> Result<()> {
    let req = NewDebt {
        date: parse_date_or_today(date)?,
        amount,
        debt_type,
        description,
        status,
        due_date: due.map(|d| parse_date(&d)).transpose()?,
    };
    let mut state = load_state()?;
    let id = state.add_debt(req, Utc::now())?.id;
    finish(&state, format!("Debt added (id = {}).", id), silent)
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_debt_edit(
    id: u64,
    date: Option<String>,
    amount: Option<f64>,
    debt_type: Option<DebtType>,
    description: Option<String>,
    status: Option<DebtStatus>,
    due: Option<String>,
    clear_due: bool,
    silent: bool,
) -> Result<()> {
    let due_date = if clear_due {
        Some(None)
    } else {
        due.map(|d| parse_date(&d)).transpose()?.map(Some)
    };
    let patch = DebtPatch {
        date: date.map(|d| parse_date(&d)).transpose()?,
        amount,
        debt_type,
        description,
        status,
        due_date,
    };
    let mut state = load_state()?;
    state.edit_debt(id, patch)?;
    finish(&state, format!("Debt {} updated.", id), silent)
}

pub fn cmd_debt_toggle(id: u64, silent: bool) -> Result<()> {
    let mut state = load_state()?;
    let status = state.toggle_debt_status(id)?;
    let msg = match status {
        DebtStatus::Completed => format!("Debt {} marked as completed.", id),
        DebtStatus::Pending => format!("Debt {} marked as pending.", id),
    };
    finish(&state, msg, silent)
}

pub fn cmd_debt_remove(id: u64, force: bool, silent: bool) -> Result<()> {
    let mut state = load_state()?;
    if state.debt(id).is_none() {
        anyhow::bail!("Debt {} not found.", id);
    }
    if !force && !confirm(&format!("Delete debt {}?", id))? {
        println!("Aborted.");
        return Ok(());
    }
    state.delete_debt(id)?;
    finish(&state, format!("Debt {} removed.", id), silent)
}

pub fn cmd_debt_list() -> Result<()> {
    let state = load_state()?;
    let lang = state.settings().language;
    let debts = &state.data().debts;
    if debts.is_empty() {
        println!("{}", get_text(lang, "No debts found.", "لا توجد ديون."));
        return Ok(());
    }
    let mut table = Table::new();
    header(&mut table, &[
        "ID",
        get_text(lang, "Date", "التاريخ"),
        get_text(lang, "Type", "النوع"),
        get_text(lang, "Description", "الوصف"),
        get_text(lang, "Amount", "المبلغ"),
        get_text(lang, "Status", "الحالة"),
        get_text(lang, "Due", "الاستحقاق"),
    ]);
    for d in debts {
        let status_color = match d.status {
            DebtStatus::Pending => Color::Yellow,
            DebtStatus::Completed => Color::Green,
        };
        let overdue = d.status == DebtStatus::Pending && d.due_date.is_some_and(|due| due < today());
        table.add_row(vec![
            Cell::new(d.id),
            Cell::new(d.date),
            Cell::new(debt_type_label(d.debt_type, lang)),
            Cell::new(&d.description),
            Cell::new(fmt_amount(d.amount)),
            Cell::new(status_label(d.status, lang)).fg(status_color),
            Cell::new(d.due_date.map(|due| due.to_string()).unwrap_or_else(|| "-".into()))
                .fg(if overdue { Color::Red } else { Color::Reset }),
        ]);
    }
    println!("{table}");
    Ok(())
}

// ----- dashboard -----

/// Prints the dashboard figures and the recent activity log.
pub fn cmd_stats(json: bool) -> Result<()> {
    let state = load_state()?;
    let stats = state.stats(today());
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    let s = state.settings();
    let lang = s.language;
    let mut table = Table::new();
    header(&mut table, &[get_text(lang, "Summary", "الملخص"), ""]);
    for (label, value) in summary_rows(&stats, &s.currency, lang) {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("{table}");

    println!("{}", get_text(lang, "Recent activity:", "النشاطات الأخيرة:"));
    if state.data().activities.is_empty() {
        println!("  {}", get_text(lang, "No recent activity", "لا توجد نشاطات حديثة"));
    }
    for a in &state.data().activities {
        let (title, desc) = describe_activity(a, &s.currency, lang);
        println!("  {} | {} | {}", a.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"), title, desc);
    }
    Ok(())
}

// ----- settings -----

pub fn cmd_settings_show() -> Result<()> {
    let state = load_state()?;
    let s = state.settings();
    let mut table = Table::new();
    header(&mut table, &["Setting", "Value"]);
    let opt = |v: Option<f64>| v.map(fmt_amount).unwrap_or_else(|| "-".into());
    let rows: Vec<(&str, String)> = vec![
        ("Rate mode", format!("{:?}", s.rate_mode).to_lowercase()),
        ("Hourly rate", opt(s.hourly_rate)),
        ("Monthly salary", opt(s.monthly_salary)),
        ("Hours per day", opt(s.work_hours_per_day)),
        ("Days per week", opt(s.work_days_per_week)),
        ("Weeks per month", opt(s.weeks_per_month)),
        ("Effective hourly rate", fmt_amount(state.hourly_rate())),
        ("Currency", s.currency.clone()),
        ("Theme", format!("{:?}", s.theme).to_lowercase()),
        ("Primary color", s.primary_color.clone()),
        ("Accent color", s.accent_color.clone()),
        ("Font size", format!("{:?}", s.font_size).to_lowercase()),
        ("Company", s.company_name.clone().unwrap_or_else(|| "-".into())),
        ("Language", format!("{:?}", s.language).to_lowercase()),
        ("Account", if s.account.username.is_empty() { "-".into() } else { s.account.username.clone() }),
    ];
    for (k, v) in rows {
        table.add_row(vec![Cell::new(k), Cell::new(v)]);
    }
    println!("{table}");
    Ok(())
}

pub fn cmd_settings_salary(update: SalarySettings, silent: bool) -> Result<()> {
    let mut state = load_state()?;
    state.update_salary_settings(update)?;
    let rate = state.hourly_rate();
    finish(&state, format!("Salary settings saved (effective rate {}).", fmt_amount(rate)), silent)
}

/// Shows how a monthly salary splits per week, day and hour.
///
/// Arguments left out come from the salary settings or their defaults.
pub fn cmd_settings_breakdown(
    monthly: Option<f64>,
    hours_per_day: Option<f64>,
    days_per_week: Option<f64>,
    weeks_per_month: Option<f64>,
) -> Result<()> {
    let state = load_state()?;
    let s = state.settings();
    let monthly = monthly.or(s.monthly_salary).unwrap_or(0.0);
    let hpd = hours_per_day.or(s.work_hours_per_day).unwrap_or(DEFAULT_WORK_HOURS_PER_DAY);
    let dpw = days_per_week.or(s.work_days_per_week).unwrap_or(DEFAULT_WORK_DAYS_PER_WEEK);
    let wpm = weeks_per_month.or(s.weeks_per_month).unwrap_or(DEFAULT_WEEKS_PER_MONTH);
    let breakdown = derive_weekly_daily_hourly(monthly, hpd, dpw, wpm);
    let [weekly, daily, hourly] = breakdown.display();
    let mut table = Table::new();
    header(&mut table, &["Monthly", "Weekly", "Daily", "Hourly", "Hours/month"]);
    table.add_row(vec![
        fmt_amount(monthly),
        weekly,
        daily,
        hourly,
        fmt_amount(breakdown.hours_per_month),
    ]);
    println!("{table}");
    Ok(())
}

pub fn cmd_settings_appearance(update: AppearanceSettings, silent: bool) -> Result<()> {
    let mut state = load_state()?;
    state.update_appearance_settings(update)?;
    finish(&state, "Appearance settings applied.".to_string(), silent)
}

pub fn cmd_settings_reset(force: bool, silent: bool) -> Result<()> {
    if !force && !confirm("Reset all settings to their defaults? Records are kept.")? {
        println!("Aborted.");
        return Ok(());
    }
    let mut state = load_state()?;
    state.reset_settings();
    finish(&state, "Settings reset to default.".to_string(), silent)
}

/// Sets the display language, or flips it when `lang` is `None`.
pub fn cmd_settings_language(lang: Option<Language>, silent: bool) -> Result<()> {
    let mut state = load_state()?;
    let current = state.settings().language;
    match lang {
        Some(l) if l == current => {}
        _ => {
            state.toggle_language();
        }
    }
    let name = match state.settings().language {
        Language::En => "English",
        Language::Ar => "العربية",
    };
    finish(&state, format!("Language set to {}.", name), silent)
}

pub fn cmd_account_set(username: String, password: String, silent: bool) -> Result<()> {
    let mut state = load_state()?;
    state.set_account(&username, &password)?;
    finish(&state, format!("Account '{}' saved.", username.trim()), silent)
}

/// Checks credentials against the stored account.
pub fn cmd_login(username: String, password: String) -> Result<bool> {
    let state = load_state()?;
    let ok = state.verify_account(&username, &password);
    if ok {
        println!("Welcome, {}.", username);
    } else {
        eprintln!("Invalid username or password.");
    }
    Ok(ok)
}

// ----- schedule & holidays -----

pub fn cmd_schedule_set(start: String, end: String, days: Option<String>, silent: bool) -> Result<()> {
    let schedule = WorkSchedule {
        start_time: parse_time(&start)?,
        end_time: parse_time(&end)?,
        work_days: days.map(|d| parse_weekdays(&d)).transpose()?.unwrap_or_default(),
    };
    let mut state = load_state()?;
    state.set_schedule(Some(schedule));
    finish(&state, "Work schedule saved.".to_string(), silent)
}

pub fn cmd_schedule_clear(silent: bool) -> Result<()> {
    let mut state = load_state()?;
    state.set_schedule(None);
    finish(&state, "Work schedule cleared.".to_string(), silent)
}

pub fn cmd_schedule_show() -> Result<()> {
    let state = load_state()?;
    match &state.data().work_schedule {
        Some(s) => {
            let days: Vec<String> = s.work_days.iter().map(|d| d.to_string()).collect();
            println!(
                "{} - {} ({})",
                s.start_time.format("%H:%M"),
                s.end_time.format("%H:%M"),
                if days.is_empty() { "-".to_string() } else { days.join(", ") }
            );
        }
        None => println!("No work schedule set."),
    }
    Ok(())
}

pub fn cmd_holiday_add(date: String, name: String, silent: bool) -> Result<()> {
    let date = parse_date(&date)?;
    let mut state = load_state()?;
    state.add_holiday(Holiday { date, name });
    finish(&state, format!("Holiday on {} saved.", date), silent)
}

pub fn cmd_holiday_remove(date: String, silent: bool) -> Result<()> {
    let date = parse_date(&date)?;
    let mut state = load_state()?;
    state.remove_holiday(date)?;
    finish(&state, format!("Holiday on {} removed.", date), silent)
}

pub fn cmd_holiday_list() -> Result<()> {
    let state = load_state()?;
    let holidays = state.data().holidays.as_deref().unwrap_or_default();
    if holidays.is_empty() {
        println!("No holidays found.");
        return Ok(());
    }
    let mut table = Table::new();
    header(&mut table, &["Date", "Name"]);
    for h in holidays {
        table.add_row(vec![Cell::new(h.date), Cell::new(&h.name)]);
    }
    println!("{table}");
    Ok(())
}

// ----- data management -----

/// Writes the whole ledger to `out`, or to a dated file in the current directory.
pub fn cmd_export(out: Option<PathBuf>, silent: bool) -> Result<PathBuf> {
    let state = load_state()?;
    let path = out.unwrap_or_else(|| PathBuf::from(default_export_name(today())));
    export_to(&state, &path)?;
    if !silent {
        println!("Data exported to {}", path.display());
    }
    Ok(path)
}

pub fn cmd_import(path: &Path, silent: bool) -> Result<()> {
    let mut state = load_state()?;
    import_from(&mut state, path)?;
    finish(&state, format!("Data imported from {}.", path.display()), silent)
}

pub fn cmd_report_csv(dir: &Path, silent: bool) -> Result<()> {
    let state = load_state()?;
    let written = write_csv(state.data(), dir)?;
    if !silent {
        for p in written {
            println!("Wrote {}", p.display());
        }
    }
    Ok(())
}

/// Deletes every record and restores default settings.
pub fn cmd_clear(force: bool, silent: bool) -> Result<()> {
    if !force && !confirm("Are you sure you want to clear all data? This cannot be undone.")? {
        println!("Aborted.");
        return Ok(());
    }
    let mut state = load_state()?;
    state.clear_all();
    finish(&state, "All data cleared.".to_string(), silent)
}
