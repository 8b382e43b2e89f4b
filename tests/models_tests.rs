use workledger::models::*;

#[test]
fn test_settings_coerce_non_numeric_fields() {
    let s: Settings = serde_json::from_str(
        r#"{"hourlyRate":"abc","monthlySalary":"2500","weeksPerMonth":null,"rateMode":"monthly"}"#,
    )
    .unwrap();
    assert_eq!(s.hourly_rate, None);
    assert_eq!(s.monthly_salary, Some(2500.0));
    assert_eq!(s.weeks_per_month, None);
    assert_eq!(s.rate_mode, RateMode::Monthly);
    assert_eq!(s.currency, "EUR");
    assert_eq!(s.language, Language::En);
}

#[test]
fn test_empty_document_reads_as_defaults() {
    let d: LedgerData = serde_json::from_str("{}").unwrap();
    assert_eq!(d, LedgerData::default());
    assert_eq!(d.settings.hourly_rate, Some(DEFAULT_HOURLY_RATE));
    assert_eq!(d.settings.primary_color, DEFAULT_PRIMARY_COLOR);
}

#[test]
fn test_document_uses_camel_case_keys() {
    let json = serde_json::to_value(LedgerData::default()).unwrap();
    let obj = json.as_object().unwrap();
    for key in ["workEntries", "expenses", "debts", "activities", "settings"] {
        assert!(obj.contains_key(key), "missing {}", key);
    }
    assert!(!obj.contains_key("workSchedule"));
    assert_eq!(json["settings"]["rateMode"], "hourly");
}

#[test]
fn test_work_entry_times_round_trip_as_hh_mm() {
    let w: WorkEntry = serde_json::from_str(
        r#"{"id":3,"date":"2025-03-01","startTime":"22:00","endTime":"06:00","totalHours":8,
            "hourlyRate":10,"totalSalary":80,"createdAt":"2025-03-01T10:00:00Z"}"#,
    )
    .unwrap();
    assert_eq!(w.notes, None);
    let back = serde_json::to_value(&w).unwrap();
    assert_eq!(back["startTime"], "22:00");
    assert_eq!(back["endTime"], "06:00");
}

#[test]
fn test_debt_accepts_empty_due_date() {
    let d: Debt = serde_json::from_str(
        r#"{"id":1,"date":"2025-03-01","amount":50,"type":"loan","description":"bank",
            "status":"pending","dueDate":"","createdAt":"2025-03-01T10:00:00Z"}"#,
    )
    .unwrap();
    assert_eq!(d.due_date, None);
    assert_eq!(d.debt_type, DebtType::Loan);
}

#[test]
fn test_unknown_category_reads_as_other() {
    let e: Expense = serde_json::from_str(
        r#"{"id":1,"date":"2025-03-01","amount":5.5,"category":"gifts","createdAt":"2025-03-01T10:00:00Z"}"#,
    )
    .unwrap();
    assert_eq!(e.category, ExpenseCategory::Other);
    assert_eq!(e.description, "");
}

#[test]
fn test_activity_item_picks_matching_record() {
    let a: Activity = serde_json::from_str(
        r#"{"id":7,"type":"debt","timestamp":"2025-03-01T10:00:00Z","item":
            {"id":1,"date":"2025-03-01","amount":50,"type":"credit","description":"card",
             "status":"completed","createdAt":"2025-03-01T10:00:00Z"}}"#,
    )
    .unwrap();
    assert_eq!(a.kind, ActivityKind::Debt);
    assert!(matches!(a.item, ActivityItem::Debt(ref d) if d.status == DebtStatus::Completed));
}

#[test]
fn test_enum_codes_parse_case_insensitively() {
    assert_eq!("Withdrawal".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Withdrawal);
    assert!("salary".parse::<ExpenseCategory>().is_err());
    assert_eq!(" AR ".parse::<Language>().unwrap(), Language::Ar);
    for c in ExpenseCategory::ALL {
        assert_eq!(c.code().parse::<ExpenseCategory>().unwrap(), c);
    }
}

#[test]
fn test_account_never_verifies_empty_username() {
    let a = Account::default();
    assert!(!a.verify("", ""));
    let a = Account { username: "sam".into(), password: "pw".into() };
    assert!(a.verify("sam", "pw"));
    assert!(!a.verify("sam", "nope"));
}

#[test]
fn test_every_category_has_labels() {
    use workledger::labels::category_label;
    assert_eq!(ExpenseCategory::ALL.len(), 10);
    assert_eq!(category_label(ExpenseCategory::Utilities, Language::Ar), "مرافق");
    assert_eq!(category_label(ExpenseCategory::Health, Language::En), "Health");
    assert_eq!(category_label(ExpenseCategory::Education, Language::Ar), "تعليم");
    let e: Expense = serde_json::from_str(
        r#"{"id":1,"date":"2025-03-01","amount":5,"category":"education","createdAt":"2025-03-01T10:00:00Z"}"#,
    )
    .unwrap();
    assert_eq!(e.category, ExpenseCategory::Education);
}
