use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Tabs},
    Frame,
};

use super::app::{App, InputMode, View};
use crate::labels::{category_label, debt_type_label, get_text, status_label};
use crate::models::DebtStatus;
use crate::rate::fmt_amount;
use crate::report::{describe_activity, summary_rows};
use crate::shift::round2;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Help / status
        ])
        .split(f.area());

    let settings = app.ledger.settings();
    let lang = settings.language;
    let primary = settings.primary_color.parse::<Color>().unwrap_or(Color::Cyan);
    let accent = settings.accent_color.parse::<Color>().unwrap_or(Color::Green);
    let title = match &settings.company_name {
        Some(name) if !name.trim().is_empty() => format!("Workledger - {}", name.trim()),
        _ => "Workledger".to_string(),
    };

    let tabs = Tabs::new(View::ALL.iter().map(|v| v.title(lang)))
        .block(Block::default().borders(Borders::ALL).title(title))
        .select(app.view.index())
        .highlight_style(Style::default().fg(primary).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    let header_style = Style::default().fg(primary).add_modifier(Modifier::BOLD);
    let highlight = Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray);

    match app.view {
        View::Dashboard => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(chunks[1]);

            let stats = app.stats();
            let currency = app.ledger.settings().currency.clone();
            let rows: Vec<Row> = summary_rows(&stats, &currency, lang)
                .into_iter()
                .enumerate()
                .map(|(i, (label, value))| {
                    // last row is the remaining balance
                    let style = if i == 9 && stats.remaining_balance < 0.0 {
                        Style::default().fg(Color::Red)
                    } else if i == 9 {
                        Style::default().fg(accent).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Row::new(vec![Cell::from(label), Cell::from(value)]).style(style)
                })
                .collect();
            let table = Table::new(rows, [Constraint::Percentage(55), Constraint::Percentage(45)])
                .block(Block::default().borders(Borders::ALL).title(get_text(lang, "Summary", "الملخص")));
            f.render_widget(table, body[0]);

            let activities = &app.ledger.data().activities;
            let items: Vec<ListItem> = if activities.is_empty() {
                vec![ListItem::new(get_text(lang, "No recent activity", "لا توجد نشاطات حديثة"))]
            } else {
                activities
                    .iter()
                    .map(|a| {
                        let (title, desc) = describe_activity(a, &currency, lang);
                        let when = a.timestamp.with_timezone(&Local).format("%m-%d %H:%M");
                        ListItem::new(vec![
                            Line::styled(format!("{} {}", when, title), Style::default().fg(primary)),
                            Line::from(format!("  {}", desc)),
                        ])
                    })
                    .collect()
            };
            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(get_text(lang, "Recent Activity", "النشاطات الأخيرة")),
            );
            f.render_widget(list, body[1]);
        }
        View::Work => {
            let rows: Vec<Row> = app
                .ledger
                .data()
                .work_entries
                .iter()
                .map(|w| {
                    Row::new(vec![
                        Cell::from(w.id.to_string()),
                        Cell::from(w.date.to_string()),
                        Cell::from(w.start_time.format("%H:%M").to_string()),
                        Cell::from(w.end_time.format("%H:%M").to_string()),
                        Cell::from(format!("{:.2}", round2(w.total_hours))),
                        Cell::from(fmt_amount(w.total_salary)),
                        Cell::from(w.notes.clone().unwrap_or_default()),
                    ])
                })
                .collect();
            let widths = [
                Constraint::Length(14),
                Constraint::Length(11),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Length(10),
                Constraint::Min(10),
            ];
            let table = Table::new(rows, widths)
                .header(
                    Row::new(vec![
                        "ID",
                        get_text(lang, "Date", "التاريخ"),
                        get_text(lang, "Start", "البداية"),
                        get_text(lang, "End", "النهاية"),
                        get_text(lang, "Hours", "الساعات"),
                        get_text(lang, "Salary", "الراتب"),
                        get_text(lang, "Notes", "ملاحظات"),
                    ])
                    .style(header_style)
                    .bottom_margin(1),
                )
                .block(Block::default().borders(Borders::ALL).title(View::Work.title(lang)))
                .row_highlight_style(highlight)
                .highlight_symbol(">> ");
            f.render_stateful_widget(table, chunks[1], &mut app.work_state);
        }
        View::Expenses => {
            let rows: Vec<Row> = app
                .ledger
                .data()
                .expenses
                .iter()
                .map(|e| {
                    let style = if e.category.is_withdrawal() {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    Row::new(vec![
                        Cell::from(e.id.to_string()),
                        Cell::from(e.date.to_string()),
                        Cell::from(category_label(e.category, lang)),
                        Cell::from(e.description.clone()),
                        Cell::from(fmt_amount(e.amount)),
                    ])
                    .style(style)
                })
                .collect();
            let widths = [
                Constraint::Length(14),
                Constraint::Length(11),
                Constraint::Length(14),
                Constraint::Min(20),
                Constraint::Length(10),
            ];
            let table = Table::new(rows, widths)
                .header(
                    Row::new(vec![
                        "ID",
                        get_text(lang, "Date", "التاريخ"),
                        get_text(lang, "Category", "الفئة"),
                        get_text(lang, "Description", "الوصف"),
                        get_text(lang, "Amount", "المبلغ"),
                    ])
                    .style(header_style)
                    .bottom_margin(1),
                )
                .block(Block::default().borders(Borders::ALL).title(View::Expenses.title(lang)))
                .row_highlight_style(highlight)
                .highlight_symbol(">> ");
            f.render_stateful_widget(table, chunks[1], &mut app.expense_state);
        }
        View::Debts => {
            let today = Local::now().date_naive();
            let rows: Vec<Row> = app
                .ledger
                .data()
                .debts
                .iter()
                .map(|d| {
                    let overdue = d.status == DebtStatus::Pending && d.due_date.is_some_and(|due| due < today);
                    let style = match d.status {
                        DebtStatus::Completed => Style::default().fg(Color::Green),
                        DebtStatus::Pending if overdue => Style::default().fg(Color::Red),
                        DebtStatus::Pending => Style::default().fg(Color::Yellow),
                    };
                    Row::new(vec![
                        Cell::from(d.id.to_string()),
                        Cell::from(d.date.to_string()),
                        Cell::from(debt_type_label(d.debt_type, lang)),
                        Cell::from(d.description.clone()),
                        Cell::from(fmt_amount(d.amount)),
                        Cell::from(status_label(d.status, lang)),
                        Cell::from(d.due_date.map(|due| due.to_string()).unwrap_or_else(|| "-".into())),
                    ])
                    .style(style)
                })
                .collect();
            let widths = [
                Constraint::Length(14),
                Constraint::Length(11),
                Constraint::Length(10),
                Constraint::Min(16),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(11),
            ];
            let table = Table::new(rows, widths)
                .header(
                    Row::new(vec![
                        "ID",
                        get_text(lang, "Date", "التاريخ"),
                        get_text(lang, "Type", "النوع"),
                        get_text(lang, "Description", "الوصف"),
                        get_text(lang, "Amount", "المبلغ"),
                        get_text(lang, "Status", "الحالة"),
                        get_text(lang, "Due", "الاستحقاق"),
                    ])
                    .style(header_style)
                    .bottom_margin(1),
                )
                .block(Block::default().borders(Borders::ALL).title(View::Debts.title(lang)))
                .row_highlight_style(highlight)
                .highlight_symbol(">> ");
            f.render_stateful_widget(table, chunks[1], &mut app.debt_state);
        }
    }

    let help_text = match app.input_mode {
        InputMode::Normal => match app.view {
            View::Dashboard => "q: Quit | Tab/1-4: Switch view | L: Language",
            View::Debts => "q: Quit | Tab/1-4: View | a: Add | d: Del | Space: Paid/Pending | L: Language",
            _ => "q: Quit | Tab/1-4: View | a: Add | d: Del | L: Language",
        },
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
        InputMode::ConfirmDelete => "y: Delete | any other key: Cancel",
    };
    let footer = match (&app.status, &app.input_mode) {
        (Some(status), InputMode::Normal) => format!("{}  |  {}", status, help_text),
        _ => help_text.to_string(),
    };
    let help = Paragraph::new(footer)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);

    match app.input_mode {
        InputMode::Adding => {
            let area = centered_rect(70, 3, f.area());
            f.render_widget(Clear, area);
            let title = app.add_prompt().unwrap_or_default();
            let input = Paragraph::new(app.input_buffer.as_str())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(input, area);
        }
        InputMode::ConfirmDelete => {
            let area = centered_rect(50, 3, f.area());
            f.render_widget(Clear, area);
            let id = app.selected_id().map(|id| id.to_string()).unwrap_or_default();
            let question = Paragraph::new(format!(
                "{} {}? (y/N)",
                get_text(lang, "Delete record", "حذف السجل"),
                id
            ))
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(question, area);
        }
        InputMode::Normal => {}
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let pad = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(pad),
            Constraint::Length(height),
            Constraint::Length(pad),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
