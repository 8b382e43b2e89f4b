use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// The kind of record an operation was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    WorkEntry,
    Expense,
    Debt,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::WorkEntry => "Work entry",
            RecordKind::Expense => "Expense",
            RecordKind::Debt => "Debt",
        };
        f.write_str(s)
    }
}

/// Errors raised by ledger operations. None of them leave the state half-mutated.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: u64 },
    #[error("no holiday on {0}")]
    HolidayNotFound(NaiveDate),
    #[error("{0}")]
    Invalid(String),
    #[error("invalid file format: {0}")]
    InvalidImport(#[from] serde_json::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
