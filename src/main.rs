//! # Workledger
//!
//! A terminal work-shift, expense and debt tracker. Log shifts and spending
//! from the command line, or open the interactive dashboard to see where the
//! money went.
//!
//! ## Features
//!
//! *   **Dashboard**: Work days, hours, salary, withdrawals, expenses, debts and the
//!     remaining balance, plus a log of the last ten things you added.
//! *   **Dual Interface**:
//!     *   **CLI**: Scriptable and quick for single commands.
//!     *   **TUI**: Interactive dashboard with tabs for work, expenses and debts.
//! *   **Hourly or monthly pay**: Either set an hourly rate, or a monthly salary
//!     and your usual hours and let the rate be derived.
//! *   **Overnight shifts**: An end time before the start time rolls over to the next day.
//! *   **Import / Export**: The whole ledger is one JSON document you can back up and restore.
//! *   **English / Arabic** labels.
//!
//! ## Usage
//!
//! ```bash
//! # Open the dashboard
//! workledger
//!
//! # Log a shift (date defaults to today)
//! workledger work add --start 22:00 --end 06:00 --notes "night shift"
//!
//! # Spend and withdraw
//! workledger expense add 12.50 --category food --description lunch
//! workledger expense add 100 --category withdrawal --description ATM
//!
//! # Track a debt and mark it paid
//! workledger debt add 300 --type loan --description "bank loan" --due 2025-12-01
//! workledger debt toggle <ID>
//!
//! # Switch to a monthly salary
//! workledger settings salary --mode monthly --monthly 2000 --hours-per-day 8 --days-per-week 5
//!
//! # Dashboard figures
//! workledger stats
//! ```
//!
//! ## Data Storage
//!
//! The ledger is saved in your local data directory:
//! *   Linux: `~/.local/share/workledger/ledger.json`
//! *   macOS: `~/Library/Application Support/workledger/ledger.json`
//! *   Windows: `%LOCALAPPDATA%\workledger\ledger.json`
//!
//! You can override this by setting the `WORKLEDGER_DB` environment variable.
//! Diagnostics go to stderr; set `WORKLEDGER_LOG=debug` to see them.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

use workledger::commands::*;
use workledger::ledger::{AppearanceSettings, SalarySettings};
use workledger::models::{DebtStatus, DebtType, ExpenseCategory, FontSize, Language, RateMode, Theme};
use workledger::tui::run_tui;

#[derive(Parser)]
#[command(name = "workledger")]
#[command(about = "Work shift, expense and debt tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log and manage work shifts
    Work {
        #[command(subcommand)]
        command: WorkCommands,
    },
    /// Log and manage expenses (including withdrawals)
    Expense {
        #[command(subcommand)]
        command: ExpenseCommands,
    },
    /// Track debts
    Debt {
        #[command(subcommand)]
        command: DebtCommands,
    },
    /// Show dashboard figures and recent activity
    Stats {
        /// Print the figures as JSON
        #[arg(long)]
        json: bool,
    },
    /// Salary, appearance, language and account settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Check credentials against the stored account
    Login {
        username: String,
        password: String,
    },
    /// Usual shift hours, used when a shift is logged without times
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
    /// Manage holidays
    Holiday {
        #[command(subcommand)]
        command: HolidayCommands,
    },
    /// Export the whole ledger as JSON
    Export {
        /// Destination file (default: workledger-data-YYYY-MM-DD.json)
        out: Option<PathBuf>,
    },
    /// Import a previously exported JSON file, merging it over the current data
    Import {
        path: PathBuf,
    },
    /// Write work.csv, expenses.csv and debts.csv into a directory
    Report {
        dir: PathBuf,
    },
    /// Delete all records and restore default settings
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Subcommand)]
enum WorkCommands {
    /// Log a shift
    Add {
        /// Date in YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Start time HH:MM (default: work schedule)
        #[arg(short, long)]
        start: Option<String>,
        /// End time HH:MM; earlier than start means the next day
        #[arg(short, long)]
        end: Option<String>,
        /// Override the computed hours
        #[arg(short = 'H', long)]
        hours: Option<f64>,
        /// Override the computed salary
        #[arg(long)]
        salary: Option<f64>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List shifts, newest first
    List,
    /// Edit a shift
    Edit {
        id: u64,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short = 'H', long)]
        hours: Option<f64>,
        #[arg(long)]
        salary: Option<f64>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Remove a shift
    Remove {
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ExpenseCommands {
    /// Add an expense
    Add {
        amount: f64,
        /// food, transport, bills, utilities, entertainment, shopping, health, education, withdrawal, other
        #[arg(short, long, default_value = "other")]
        category: ExpenseCategory,
        #[arg(short = 'D', long, default_value = "")]
        description: String,
        /// Date in YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List expenses, newest first
    List,
    /// Edit an expense
    Edit {
        id: u64,
        #[arg(short, long)]
        amount: Option<f64>,
        #[arg(short, long)]
        category: Option<ExpenseCategory>,
        #[arg(short = 'D', long)]
        description: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Remove an expense
    Remove {
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum DebtCommands {
    /// Add a debt
    Add {
        amount: f64,
        /// loan, credit, personal, other
        #[arg(short = 't', long = "type", default_value = "other")]
        debt_type: DebtType,
        #[arg(short = 'D', long, default_value = "")]
        description: String,
        /// pending or completed
        #[arg(short, long, default_value = "pending")]
        status: DebtStatus,
        /// Due date in YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
        /// Date in YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List debts, newest first
    List,
    /// Edit a debt
    Edit {
        id: u64,
        #[arg(short, long)]
        amount: Option<f64>,
        #[arg(short = 't', long = "type")]
        debt_type: Option<DebtType>,
        #[arg(short = 'D', long)]
        description: Option<String>,
        #[arg(short, long)]
        status: Option<DebtStatus>,
        #[arg(long)]
        due: Option<String>,
        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Flip a debt between pending and completed
    Toggle {
        id: u64,
    },
    /// Remove a debt
    Remove {
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show all settings
    Show,
    /// Update salary settings
    Salary {
        /// hourly or monthly
        #[arg(short, long)]
        mode: Option<RateMode>,
        #[arg(short, long)]
        rate: Option<f64>,
        #[arg(long)]
        monthly: Option<f64>,
        #[arg(long)]
        hours_per_day: Option<f64>,
        #[arg(long)]
        days_per_week: Option<f64>,
        #[arg(long)]
        weeks_per_month: Option<f64>,
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Split a monthly salary into weekly, daily and hourly amounts
    Breakdown {
        #[arg(long)]
        monthly: Option<f64>,
        #[arg(long)]
        hours_per_day: Option<f64>,
        #[arg(long)]
        days_per_week: Option<f64>,
        #[arg(long)]
        weeks_per_month: Option<f64>,
    },
    /// Update appearance settings
    Appearance {
        /// light, dark or auto
        #[arg(short, long)]
        theme: Option<Theme>,
        /// #rrggbb
        #[arg(long)]
        primary: Option<String>,
        /// #rrggbb
        #[arg(long)]
        accent: Option<String>,
        /// small, medium or large
        #[arg(short, long)]
        font_size: Option<FontSize>,
        #[arg(long)]
        company: Option<String>,
    },
    /// Set the display language (en, ar); toggles when omitted
    Language {
        lang: Option<Language>,
    },
    /// Set the local account credentials
    Account {
        username: String,
        password: String,
    },
    /// Restore default salary and appearance settings
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ScheduleCommands {
    /// Set usual shift hours
    Set {
        start: String,
        end: String,
        /// Comma separated weekdays, e.g. mon,tue,wed,thu,fri
        #[arg(short, long)]
        days: Option<String>,
    },
    /// Show the schedule
    Show,
    /// Remove the schedule
    Clear,
}

#[derive(Subcommand)]
enum HolidayCommands {
    /// Add a holiday
    Add {
        /// Date in YYYY-MM-DD
        date: String,
        #[arg(default_value = "")]
        name: String,
    },
    /// List holidays
    List,
    /// Remove the holiday on a date
    Remove {
        date: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("WORKLEDGER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::Work { command }) => match command {
            WorkCommands::Add { date, start, end, hours, salary, notes } => {
                cmd_work_add(date, start, end, hours, salary, notes, false)?
            }
            WorkCommands::List => cmd_work_list()?,
            WorkCommands::Edit { id, date, start, end, hours, salary, notes } => {
                cmd_work_edit(id, date, start, end, hours, salary, notes, false)?
            }
            WorkCommands::Remove { id, force } => cmd_work_remove(id, force, false)?,
        },
        Some(Commands::Expense { command }) => match command {
            ExpenseCommands::Add { amount, category, description, date } => {
                cmd_expense_add(date, amount, category, description, false)?
            }
            ExpenseCommands::List => cmd_expense_list()?,
            ExpenseCommands::Edit { id, amount, category, description, date } => {
                cmd_expense_edit(id, date, amount, category, description, false)?
            }
            ExpenseCommands::Remove { id, force } => cmd_expense_remove(id, force, false)?,
        },
        Some(Commands::Debt { command }) => match command {
            DebtCommands::Add { amount, debt_type, description, status, due, date } => {
                cmd_debt_add(date, amount, debt_type, description, status, due, false)?
            }
            DebtCommands::List => cmd_debt_list()?,
            DebtCommands::Edit { id, amount, debt_type, description, status, due, clear_due, date } => {
                cmd_debt_edit(id, date, amount, debt_type, description, status, due, clear_due, false)?
            }
            DebtCommands::Toggle { id } => cmd_debt_toggle(id, false)?,
            DebtCommands::Remove { id, force } => cmd_debt_remove(id, force, false)?,
        },
        Some(Commands::Stats { json }) => cmd_stats(json)?,
        Some(Commands::Settings { command }) => match command {
            SettingsCommands::Show => cmd_settings_show()?,
            SettingsCommands::Salary { mode, rate, monthly, hours_per_day, days_per_week, weeks_per_month, currency } => {
                let update = SalarySettings {
                    hourly_rate: rate,
                    currency,
                    rate_mode: mode,
                    monthly_salary: monthly,
                    work_hours_per_day: hours_per_day,
                    work_days_per_week: days_per_week,
                    weeks_per_month,
                };
                cmd_settings_salary(update, false)?
            }
            SettingsCommands::Breakdown { monthly, hours_per_day, days_per_week, weeks_per_month } => {
                cmd_settings_breakdown(monthly, hours_per_day, days_per_week, weeks_per_month)?
            }
            SettingsCommands::Appearance { theme, primary, accent, font_size, company } => {
                let update = AppearanceSettings {
                    theme,
                    primary_color: primary,
                    accent_color: accent,
                    font_size,
                    company_name: company,
                };
                cmd_settings_appearance(update, false)?
            }
            SettingsCommands::Language { lang } => cmd_settings_language(lang, false)?,
            SettingsCommands::Account { username, password } => cmd_account_set(username, password, false)?,
            SettingsCommands::Reset { force } => cmd_settings_reset(force, false)?,
        },
        Some(Commands::Login { username, password }) => {
            if !cmd_login(username, password)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Schedule { command }) => match command {
            ScheduleCommands::Set { start, end, days } => cmd_schedule_set(start, end, days, false)?,
            ScheduleCommands::Show => cmd_schedule_show()?,
            ScheduleCommands::Clear => cmd_schedule_clear(false)?,
        },
        Some(Commands::Holiday { command }) => match command {
            HolidayCommands::Add { date, name } => cmd_holiday_add(date, name, false)?,
            HolidayCommands::List => cmd_holiday_list()?,
            HolidayCommands::Remove { date } => cmd_holiday_remove(date, false)?,
        },
        Some(Commands::Export { out }) => {
            cmd_export(out, false)?;
        }
        Some(Commands::Import { path }) => cmd_import(&path, false)?,
        Some(Commands::Report { dir }) => cmd_report_csv(&dir, false)?,
        Some(Commands::Clear { force }) => cmd_clear(force, false)?,
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => anyhow::bail!("Unsupported shell: {}", shell),
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "workledger", &mut io::stdout());
        }
        Some(Commands::Ui) | None => run_tui()?,
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
