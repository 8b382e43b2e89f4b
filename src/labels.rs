//! Bilingual display labels. The core never sees these strings; only the CLI
//! and TUI render them.

use crate::models::{ActivityKind, DebtStatus, DebtType, ExpenseCategory, Language};

/// Picks the string for the current language.
pub fn get_text<'a>(lang: Language, en: &'a str, ar: &'a str) -> &'a str {
    match lang {
        Language::En => en,
        Language::Ar => ar,
    }
}

pub fn category_label(category: ExpenseCategory, lang: Language) -> &'static str {
    match category {
        ExpenseCategory::Food => get_text(lang, "Food", "طعام"),
        ExpenseCategory::Transport => get_text(lang, "Transport", "مواصلات"),
        ExpenseCategory::Bills => get_text(lang, "Bills", "فواتير"),
        ExpenseCategory::Utilities => get_text(lang, "Utilities", "مرافق"),
        ExpenseCategory::Entertainment => get_text(lang, "Entertainment", "ترفيه"),
        ExpenseCategory::Shopping => get_text(lang, "Shopping", "تسوق"),
        ExpenseCategory::Health => get_text(lang, "Health", "صحة"),
        ExpenseCategory::Education => get_text(lang, "Education", "تعليم"),
        ExpenseCategory::Withdrawal => get_text(lang, "Withdrawal", "سحب"),
        ExpenseCategory::Other => get_text(lang, "Other", "أخرى"),
    }
}

pub fn debt_type_label(debt_type: DebtType, lang: Language) -> &'static str {
    match debt_type {
        DebtType::Loan => get_text(lang, "Loan", "قرض"),
        DebtType::Credit => get_text(lang, "Credit Card", "بطاقة ائتمان"),
        DebtType::Personal => get_text(lang, "Personal Debt", "دين شخصي"),
        DebtType::Other => get_text(lang, "Other", "أخرى"),
    }
}

pub fn status_label(status: DebtStatus, lang: Language) -> &'static str {
    match status {
        DebtStatus::Pending => get_text(lang, "Not Done", "لم يتم"),
        DebtStatus::Completed => get_text(lang, "Done", "تم"),
    }
}

pub fn activity_title(kind: ActivityKind, lang: Language) -> &'static str {
    match kind {
        ActivityKind::Work => get_text(lang, "Work Entry Added", "تم إضافة إدخال عمل"),
        ActivityKind::Expense => get_text(lang, "Expense Added", "تم إضافة مصروف"),
        ActivityKind::Debt => get_text(lang, "Debt Added", "تم إضافة دين"),
    }
}
