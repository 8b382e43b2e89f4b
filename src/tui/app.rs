use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime, Utc};
use ratatui::widgets::TableState;

use crate::labels::get_text;
use crate::ledger::{AppState, NewDebt, NewExpense, NewWorkEntry};
use crate::models::{DebtStatus, DebtType, ExpenseCategory, Language};
use crate::shift::parse_clock_time;
use crate::stats::StatsSnapshot;
use crate::storage::{load_state, save_state};

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Adding,
    ConfirmDelete,
}

#[derive(Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    Work,
    Expenses,
    Debts,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::Work, View::Expenses, View::Debts];

    pub fn index(self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Work => 1,
            View::Expenses => 2,
            View::Debts => 3,
        }
    }

    pub fn title(self, lang: Language) -> &'static str {
        match self {
            View::Dashboard => get_text(lang, "Dashboard", "لوحة التحكم"),
            View::Work => get_text(lang, "Work", "العمل"),
            View::Expenses => get_text(lang, "Expenses", "المصاريف"),
            View::Debts => get_text(lang, "Debts", "الديون"),
        }
    }
}

/// Answers collected by the multi-step "Add" wizard, one per step.
#[derive(Default)]
pub struct AddState {
    pub step: usize,
    pub answers: Vec<String>,
}

pub struct App {
    pub ledger: AppState,
    pub view: View,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub add_state: AddState,
    pub work_state: TableState,
    pub expense_state: TableState,
    pub debt_state: TableState,
    pub status: Option<String>,
}

fn parse_date_or_today(s: &str) -> Result<NaiveDate> {
    if s.trim().is_empty() {
        return Ok(Local::now().date_naive());
    }
    Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
}

fn parse_optional_time(s: &str) -> Result<Option<NaiveTime>> {
    if s.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(parse_clock_time(s)?))
}

fn parse_amount(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| anyhow::anyhow!("'{}' is not a number", s.trim()))
}

fn select_clamped(state: &mut TableState, len: usize) {
    if len == 0 {
        state.select(None);
    } else if let Some(i) = state.selected() {
        if i >= len {
            state.select(Some(len - 1));
        }
    } else {
        state.select(Some(0));
    }
}

impl App {
    /// Creates a new App from the stored ledger.
    pub fn new() -> Result<App> {
        Ok(App::with_state(load_state()?))
    }

    pub fn with_state(ledger: AppState) -> App {
        let mut app = App {
            ledger,
            view: View::Dashboard,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            add_state: AddState::default(),
            work_state: TableState::default(),
            expense_state: TableState::default(),
            debt_state: TableState::default(),
            status: None,
        };
        app.refresh_selection();
        app
    }

    pub fn lang(&self) -> Language {
        self.ledger.settings().language
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.ledger.stats(Local::now().date_naive())
    }

    fn refresh_selection(&mut self) {
        let data = self.ledger.data();
        let (w, e, d) = (data.work_entries.len(), data.expenses.len(), data.debts.len());
        select_clamped(&mut self.work_state, w);
        select_clamped(&mut self.expense_state, e);
        select_clamped(&mut self.debt_state, d);
    }

    fn current_list(&mut self) -> Option<(&mut TableState, usize)> {
        let data = self.ledger.data();
        let (w, e, d) = (data.work_entries.len(), data.expenses.len(), data.debts.len());
        match self.view {
            View::Dashboard => None,
            View::Work => Some((&mut self.work_state, w)),
            View::Expenses => Some((&mut self.expense_state, e)),
            View::Debts => Some((&mut self.debt_state, d)),
        }
    }

    /// Id of the highlighted record in the current view.
    pub fn selected_id(&self) -> Option<u64> {
        let data = self.ledger.data();
        match self.view {
            View::Dashboard => None,
            View::Work => self.work_state.selected().and_then(|i| data.work_entries.get(i)).map(|w| w.id),
            View::Expenses => self.expense_state.selected().and_then(|i| data.expenses.get(i)).map(|e| e.id),
            View::Debts => self.debt_state.selected().and_then(|i| data.debts.get(i)).map(|d| d.id),
        }
    }

    /// Selects the next item in the current list.
    pub fn next(&mut self) {
        if let Some((state, len)) = self.current_list() {
            if len == 0 {
                return;
            }
            let i = match state.selected() {
                Some(i) if i + 1 < len => i + 1,
                _ => 0,
            };
            state.select(Some(i));
        }
    }

    /// Selects the previous item in the current list.
    pub fn previous(&mut self) {
        if let Some((state, len)) = self.current_list() {
            if len == 0 {
                return;
            }
            let i = match state.selected() {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            };
            state.select(Some(i));
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn next_view(&mut self) {
        self.view = View::ALL[(self.view.index() + 1) % View::ALL.len()];
    }

    /// Saves the ledger and reports `ok` or the failure on the status line.
    fn persist(&mut self, ok: String) {
        self.refresh_selection();
        self.status = Some(match save_state(&self.ledger) {
            Ok(()) => ok,
            Err(e) => format!("Save failed: {:#}", e),
        });
    }

    pub fn toggle_language(&mut self) {
        let lang = self.ledger.toggle_language();
        self.persist(get_text(lang, "Language: English", "اللغة: العربية").to_string());
    }

    /// Flips the highlighted debt between pending and completed.
    pub fn toggle_selected_debt(&mut self) {
        if self.view != View::Debts {
            return;
        }
        if let Some(id) = self.selected_id() {
            match self.ledger.toggle_debt_status(id) {
                Ok(DebtStatus::Completed) => self.persist(format!("Debt {} marked as completed.", id)),
                Ok(DebtStatus::Pending) => self.persist(format!("Debt {} marked as pending.", id)),
                Err(e) => self.status = Some(e.to_string()),
            }
        }
    }

    /// Asks for confirmation before deleting the highlighted record.
    pub fn start_delete(&mut self) {
        if self.selected_id().is_some() {
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        let Some(id) = self.selected_id() else {
            return;
        };
        let res = match self.view {
            View::Dashboard => return,
            View::Work => self.ledger.delete_work_entry(id).map(|_| ()),
            View::Expenses => self.ledger.delete_expense(id).map(|_| ()),
            View::Debts => self.ledger.delete_debt(id).map(|_| ()),
        };
        match res {
            Ok(()) => self.persist(format!("Record {} deleted.", id)),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Initiates the "Add" wizard for the current view.
    pub fn start_add(&mut self) {
        if self.view == View::Dashboard {
            return;
        }
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
        self.status = None;
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    /// Prompt for the current wizard step, or `None` when the wizard is done.
    pub fn add_prompt(&self) -> Option<&'static str> {
        let lang = self.lang();
        let prompts: Vec<&'static str> = match self.view {
            View::Dashboard => vec![],
            View::Work => vec![
                get_text(lang, "Date (YYYY-MM-DD, empty = today)", "التاريخ (فارغ = اليوم)"),
                get_text(lang, "Start time (HH:MM, empty = schedule)", "وقت البداية (HH:MM)"),
                get_text(lang, "End time (HH:MM, empty = schedule)", "وقت النهاية (HH:MM)"),
                get_text(lang, "Notes (optional)", "ملاحظات (اختياري)"),
            ],
            View::Expenses => vec![
                get_text(lang, "Amount", "المبلغ"),
                get_text(
                    lang,
                    "Category (food, transport, bills, utilities, entertainment, shopping, health, education, withdrawal, other)",
                    "الفئة (food, transport, bills, utilities, entertainment, shopping, health, education, withdrawal, other)",
                ),
                get_text(lang, "Description", "الوصف"),
                get_text(lang, "Date (YYYY-MM-DD, empty = today)", "التاريخ (فارغ = اليوم)"),
            ],
            View::Debts => vec![
                get_text(lang, "Amount", "المبلغ"),
                get_text(lang, "Type (loan, credit, personal, other)", "النوع (loan, credit, personal, other)"),
                get_text(lang, "Description", "الوصف"),
                get_text(lang, "Due date (YYYY-MM-DD, optional)", "تاريخ الاستحقاق (اختياري)"),
            ],
        };
        prompts.get(self.add_state.step).copied()
    }

    /// Takes the typed answer and moves to the next step, saving after the last one.
    pub fn handle_input(&mut self) {
        if self.input_mode != InputMode::Adding {
            return;
        }
        let answer = std::mem::take(&mut self.input_buffer);
        self.add_state.answers.push(answer);
        self.add_state.step += 1;
        if self.add_prompt().is_some() {
            return;
        }
        self.input_mode = InputMode::Normal;
        let answers = std::mem::take(&mut self.add_state.answers);
        match self.submit(&answers) {
            Ok(msg) => self.persist(msg),
            Err(e) => self.status = Some(format!("Not saved: {:#}", e)),
        }
    }

    fn submit(&mut self, answers: &[String]) -> Result<String> {
        let field = |i: usize| answers.get(i).map(String::as_str).unwrap_or("");
        let now = Utc::now();
        match self.view {
            View::Dashboard => Ok(String::new()),
            View::Work => {
                let notes = field(3).trim();
                let req = NewWorkEntry {
                    date: parse_date_or_today(field(0))?,
                    start_time: parse_optional_time(field(1))?,
                    end_time: parse_optional_time(field(2))?,
                    total_hours: None,
                    total_salary: None,
                    notes: (!notes.is_empty()).then(|| notes.to_string()),
                };
                let entry = self.ledger.add_work_entry(req, now)?;
                Ok(format!("Work entry added ({:.2}h).", entry.total_hours))
            }
            View::Expenses => {
                let category = if field(1).trim().is_empty() {
                    ExpenseCategory::Other
                } else {
                    field(1).parse()?
                };
                let req = NewExpense {
                    date: parse_date_or_today(field(3))?,
                    amount: parse_amount(field(0))?,
                    category,
                    description: field(2).trim().to_string(),
                };
                let id = self.ledger.add_expense(req, now)?.id;
                Ok(format!("Expense added (id = {}).", id))
            }
            View::Debts => {
                let debt_type = if field(1).trim().is_empty() {
                    DebtType::Other
                } else {
                    field(1).parse()?
                };
                let due = field(3).trim();
                let req = NewDebt {
                    date: Local::now().date_naive(),
                    amount: parse_amount(field(0))?,
                    debt_type,
                    description: field(2).trim().to_string(),
                    status: DebtStatus::Pending,
                    due_date: if due.is_empty() {
                        None
                    } else {
                        Some(NaiveDate::parse_from_str(due, "%Y-%m-%d")?)
                    },
                };
                let id = self.ledger.add_debt(req, now)?.id;
                Ok(format!("Debt added (id = {}).", id))
            }
        }
    }
}
