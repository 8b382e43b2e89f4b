use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use workledger::error::LedgerError;
use workledger::ledger::*;
use workledger::models::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn shift(start: &str, end: &str) -> NewWorkEntry {
    NewWorkEntry {
        date: date("2025-03-01"),
        start_time: Some(time(start)),
        end_time: Some(time(end)),
        total_hours: None,
        total_salary: None,
        notes: None,
    }
}

fn spend(amount: f64, category: ExpenseCategory) -> NewExpense {
    NewExpense {
        date: date("2025-03-01"),
        amount,
        category,
        description: "test".into(),
    }
}

fn owe(amount: f64) -> NewDebt {
    NewDebt {
        date: date("2025-03-01"),
        amount,
        debt_type: DebtType::Loan,
        description: "bank".into(),
        status: DebtStatus::Pending,
        due_date: Some(date("2025-06-01")),
    }
}

#[test]
fn test_add_work_entry_computes_hours_and_salary() {
    let mut state = AppState::default();
    let entry = state.add_work_entry(shift("09:00", "17:00"), now()).unwrap().clone();
    assert_eq!(entry.total_hours, 8.0);
    assert_eq!(entry.hourly_rate, 10.0);
    assert_eq!(entry.total_salary, 80.0);
    assert_eq!(entry.created_at, now());

    let data = state.data();
    assert_eq!(data.work_entries.len(), 1);
    assert_eq!(data.activities.len(), 1);
    assert_eq!(data.activities[0].kind, ActivityKind::Work);
    assert_eq!(data.activities[0].item, ActivityItem::Work(entry));
}

#[test]
fn test_overnight_entry_in_monthly_mode() {
    let mut state = AppState::default();
    state
        .update_salary_settings(SalarySettings {
            rate_mode: Some(RateMode::Monthly),
            monthly_salary: Some(1732.0),
            work_hours_per_day: Some(8.0),
            work_days_per_week: Some(5.0),
            weeks_per_month: Some(4.33),
            ..Default::default()
        })
        .unwrap();
    let entry = state.add_work_entry(shift("22:00", "06:00"), now()).unwrap();
    assert_eq!(entry.total_hours, 8.0);
    assert!((entry.hourly_rate - 10.0).abs() < 1e-9);
    assert!((entry.total_salary - 80.0).abs() < 1e-9);
}

#[test]
fn test_explicit_salary_overrides_computed() {
    let mut state = AppState::default();
    let req = NewWorkEntry { total_salary: Some(55.0), ..shift("09:00", "17:00") };
    let entry = state.add_work_entry(req, now()).unwrap();
    assert_eq!(entry.total_hours, 8.0);
    assert_eq!(entry.total_salary, 55.0);
}

#[test]
fn test_missing_times_need_a_schedule() {
    let mut state = AppState::default();
    let req = NewWorkEntry { start_time: None, end_time: None, ..shift("09:00", "17:00") };
    let err = state.add_work_entry(req.clone(), now()).unwrap_err();
    assert!(matches!(err, LedgerError::Invalid(_)));
    assert!(state.data().work_entries.is_empty());
    assert!(state.data().activities.is_empty());

    state.set_schedule(Some(WorkSchedule {
        start_time: time("08:00"),
        end_time: time("12:30"),
        work_days: vec![],
    }));
    let entry = state.add_work_entry(req, now()).unwrap();
    assert_eq!(entry.start_time, time("08:00"));
    assert_eq!(entry.total_hours, 4.5);
}

#[test]
fn test_negative_amount_is_rejected() {
    let mut state = AppState::default();
    assert!(state.add_expense(spend(-5.0, ExpenseCategory::Food), now()).is_err());
    assert!(state.add_debt(owe(f64::NAN), now()).is_err());
    assert_eq!(state.data(), &LedgerData::default());
}

#[test]
fn test_ids_are_unique_across_records() {
    let mut state = AppState::default();
    let a = state.add_work_entry(shift("09:00", "10:00"), now()).unwrap().id;
    let b = state.add_expense(spend(1.0, ExpenseCategory::Food), now()).unwrap().id;
    let c = state.add_debt(owe(1.0), now()).unwrap().id;
    assert_eq!(a, now().timestamp_millis() as u64);
    assert_eq!(b, a + 1);
    assert_eq!(c, a + 2);
}

#[test]
fn test_newest_records_come_first() {
    let mut state = AppState::default();
    let first = state.add_expense(spend(1.0, ExpenseCategory::Food), now()).unwrap().id;
    let second = state
        .add_expense(spend(2.0, ExpenseCategory::Food), now() + Duration::seconds(5))
        .unwrap()
        .id;
    let ids: Vec<u64> = state.data().expenses.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![second, first]);
}

#[test]
fn test_activity_log_keeps_last_ten() {
    let mut state = AppState::default();
    let mut ids = Vec::new();
    for i in 0..12 {
        let at = now() + Duration::seconds(i);
        ids.push(state.add_expense(spend(i as f64, ExpenseCategory::Food), at).unwrap().id);
    }
    let activities = &state.data().activities;
    assert_eq!(activities.len(), 10);
    assert_eq!(activities[0].id, ids[11]);
    assert_eq!(activities[9].id, ids[2]);
    assert_eq!(state.data().expenses.len(), 12);
}

#[test]
fn test_edit_keeps_salary_unless_hours_change() {
    let mut state = AppState::default();
    let id = state.add_work_entry(shift("09:00", "17:00"), now()).unwrap().id;
    state
        .update_salary_settings(SalarySettings { hourly_rate: Some(20.0), ..Default::default() })
        .unwrap();

    let entry = state
        .edit_work_entry(id, WorkEntryPatch { notes: Some("late bus".into()), ..Default::default() })
        .unwrap();
    assert_eq!(entry.hourly_rate, 10.0);
    assert_eq!(entry.total_salary, 80.0);
    assert_eq!(entry.notes.as_deref(), Some("late bus"));

    let entry = state
        .edit_work_entry(id, WorkEntryPatch { end_time: Some(time("13:00")), ..Default::default() })
        .unwrap();
    assert_eq!(entry.total_hours, 4.0);
    assert_eq!(entry.hourly_rate, 20.0);
    assert_eq!(entry.total_salary, 80.0);
}

#[test]
fn test_edit_missing_record_changes_nothing() {
    let mut state = AppState::default();
    state.add_expense(spend(10.0, ExpenseCategory::Food), now()).unwrap();
    let before = state.data().clone();

    let err = state
        .edit_expense(42, ExpensePatch { amount: Some(1.0), ..Default::default() })
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { id: 42, .. }));
    assert!(state.delete_debt(42).is_err());
    assert!(state.toggle_debt_status(42).is_err());
    assert!(state.edit_work_entry(42, WorkEntryPatch::default()).is_err());
    assert_eq!(state.data(), &before);
}

#[test]
fn test_edit_debt_can_clear_due_date() {
    let mut state = AppState::default();
    let id = state.add_debt(owe(100.0), now()).unwrap().id;
    let debt = state
        .edit_debt(id, DebtPatch { due_date: Some(None), amount: Some(80.0), ..Default::default() })
        .unwrap();
    assert_eq!(debt.due_date, None);
    assert_eq!(debt.amount, 80.0);
}

#[test]
fn test_delete_returns_record_and_keeps_activity() {
    let mut state = AppState::default();
    let id = state.add_expense(spend(10.0, ExpenseCategory::Food), now()).unwrap().id;
    let removed = state.delete_expense(id).unwrap();
    assert_eq!(removed.amount, 10.0);
    assert!(state.data().expenses.is_empty());
    assert_eq!(state.data().activities.len(), 1);
    assert!(state.delete_expense(id).is_err());
}

#[test]
fn test_toggle_debt_status_moves_amount_between_buckets() {
    let mut state = AppState::default();
    let id = state.add_debt(owe(200.0), now()).unwrap().id;
    let today = date("2025-03-15");
    assert_eq!(state.stats(today).pending_debts, 200.0);
    assert_eq!(state.stats(today).remaining_balance, -200.0);

    assert_eq!(state.toggle_debt_status(id).unwrap(), DebtStatus::Completed);
    let s = state.stats(today);
    assert_eq!(s.pending_debts, 0.0);
    assert_eq!(s.completed_debts, 200.0);
    assert_eq!(s.remaining_balance, 0.0);

    assert_eq!(state.toggle_debt_status(id).unwrap(), DebtStatus::Pending);
}

#[test]
fn test_invalid_settings_are_rejected_whole() {
    let mut state = AppState::default();
    let err = state.update_salary_settings(SalarySettings {
        hourly_rate: Some(25.0),
        monthly_salary: Some(-1.0),
        ..Default::default()
    });
    assert!(err.is_err());
    assert_eq!(state.settings().hourly_rate, Some(10.0));

    assert!(state
        .update_appearance_settings(AppearanceSettings {
            primary_color: Some("blue".into()),
            ..Default::default()
        })
        .is_err());
    state
        .update_appearance_settings(AppearanceSettings {
            theme: Some(Theme::Dark),
            accent_color: Some("#ABCDEF".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(state.settings().theme, Theme::Dark);
    assert_eq!(state.settings().accent_color, "#abcdef");
}

#[test]
fn test_reset_settings_keeps_account_and_language() {
    let mut state = AppState::default();
    state.set_account("sam", "pw").unwrap();
    state.toggle_language();
    state
        .update_salary_settings(SalarySettings {
            hourly_rate: Some(30.0),
            currency: Some("usd".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(state.settings().currency, "USD");

    state.reset_settings();
    assert_eq!(state.settings().hourly_rate, Some(10.0));
    assert_eq!(state.settings().currency, "EUR");
    assert_eq!(state.settings().language, Language::Ar);
    assert!(state.verify_account("sam", "pw"));
}

#[test]
fn test_clear_all_restores_defaults() {
    let mut state = AppState::default();
    state.add_debt(owe(10.0), now()).unwrap();
    state.toggle_language();
    state.clear_all();
    assert_eq!(state.data(), &LedgerData::default());
}

#[test]
fn test_holidays_replace_by_date() {
    let mut state = AppState::default();
    state.add_holiday(Holiday { date: date("2025-12-25"), name: "Xmas".into() });
    state.add_holiday(Holiday { date: date("2025-01-01"), name: "New Year".into() });
    state.add_holiday(Holiday { date: date("2025-12-25"), name: "Christmas".into() });

    let holidays = state.data().holidays.clone().unwrap();
    assert_eq!(holidays.len(), 2);
    assert_eq!(holidays[0].date, date("2025-01-01"));
    assert_eq!(state.holiday_on(date("2025-12-25")).unwrap().name, "Christmas");

    state.remove_holiday(date("2025-01-01")).unwrap();
    assert!(matches!(
        state.remove_holiday(date("2025-01-01")),
        Err(LedgerError::HolidayNotFound(_))
    ));
}

#[test]
fn test_export_then_import_is_identity() {
    let mut state = AppState::default();
    state.add_work_entry(shift("09:00", "17:00"), now()).unwrap();
    state.add_expense(spend(12.5, ExpenseCategory::Withdrawal), now()).unwrap();
    state.add_debt(owe(99.0), now()).unwrap();
    let json = state.export_json().unwrap();

    let mut fresh = AppState::default();
    fresh.import_json(&json).unwrap();
    assert_eq!(fresh.data(), state.data());
    assert_eq!(fresh.export_json().unwrap(), json);
}

#[test]
fn test_import_merges_top_level_keys() {
    let mut state = AppState::default();
    state.add_work_entry(shift("09:00", "17:00"), now()).unwrap();
    state.set_account("sam", "pw").unwrap();

    let incoming = r#"{"expenses":[{"id":5,"date":"2025-02-01","amount":7,"category":"food",
        "description":"lunch","createdAt":"2025-02-01T12:00:00Z"}]}"#;
    state.import_json(incoming).unwrap();

    assert_eq!(state.data().work_entries.len(), 1);
    assert_eq!(state.data().expenses.len(), 1);
    assert_eq!(state.data().expenses[0].description, "lunch");
    assert!(state.verify_account("sam", "pw"));
}

#[test]
fn test_bad_import_leaves_state_untouched() {
    let mut state = AppState::default();
    state.add_expense(spend(3.0, ExpenseCategory::Food), now()).unwrap();
    let before = state.data().clone();

    for bad in ["not json", "[1, 2, 3]", r#"{"expenses": 5}"#, r#"{"debts":[{"id":1}]}"#] {
        let err = state.import_json(bad).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidImport(_)), "{}", bad);
        assert_eq!(state.data(), &before);
    }
}

#[test]
fn test_import_keeps_every_expense_category() {
    let mut state = AppState::default();
    let incoming = r#"{"expenses":[
        {"id":1,"date":"2025-02-01","amount":40,"category":"health","createdAt":"2025-02-01T12:00:00Z"},
        {"id":2,"date":"2025-02-02","amount":60,"category":"utilities","createdAt":"2025-02-02T12:00:00Z"},
        {"id":3,"date":"2025-02-03","amount":90,"category":"education","createdAt":"2025-02-03T12:00:00Z"}]}"#;
    state.import_json(incoming).unwrap();

    let categories: Vec<ExpenseCategory> = state.data().expenses.iter().map(|e| e.category).collect();
    assert_eq!(
        categories,
        vec![ExpenseCategory::Health, ExpenseCategory::Utilities, ExpenseCategory::Education]
    );
    let exported: serde_json::Value = serde_json::from_str(&state.export_json().unwrap()).unwrap();
    let codes: Vec<&str> = exported["expenses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["category"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["health", "utilities", "education"]);
    assert_eq!(state.stats(date("2025-02-15")).total_expenses, 190.0);
}

#[test]
fn test_delete_leaves_other_records_untouched() {
    let mut state = AppState::default();
    for i in 0..3 {
        let at = now() + Duration::seconds(i);
        state.add_work_entry(shift("09:00", &format!("1{}:00", i + 2)), at).unwrap();
        state.add_expense(spend(10.0 + i as f64, ExpenseCategory::Food), at).unwrap();
        state.add_debt(owe(100.0 + i as f64), at).unwrap();
    }

    let work = state.data().work_entries.clone();
    state.delete_work_entry(work[1].id).unwrap();
    assert_eq!(state.data().work_entries, vec![work[0].clone(), work[2].clone()]);

    let expenses = state.data().expenses.clone();
    state.delete_expense(expenses[1].id).unwrap();
    assert_eq!(state.data().expenses, vec![expenses[0].clone(), expenses[2].clone()]);

    let debts = state.data().debts.clone();
    assert_eq!(state.delete_debt(debts[1].id).unwrap(), debts[1]);
    assert_eq!(state.data().debts, vec![debts[0].clone(), debts[2].clone()]);

    assert_eq!(state.data().work_entries, vec![work[0].clone(), work[2].clone()]);
    assert_eq!(state.data().expenses, vec![expenses[0].clone(), expenses[2].clone()]);
}

#[test]
fn test_next_id_after_maximal_imported_id() {
    let mut state = AppState::default();
    let incoming = format!(
        r#"{{"debts":[{{"id":{},"date":"2025-02-01","amount":5,"type":"loan","status":"pending",
            "createdAt":"2025-02-01T12:00:00Z"}}]}}"#,
        u64::MAX
    );
    state.import_json(&incoming).unwrap();

    let a = state.add_expense(spend(1.0, ExpenseCategory::Food), now()).unwrap().id;
    let b = state.add_debt(owe(2.0), now()).unwrap().id;
    assert_ne!(a, u64::MAX);
    assert_ne!(b, u64::MAX);
    assert_ne!(a, b);
    assert_eq!(state.data().debts.len(), 2);
}
