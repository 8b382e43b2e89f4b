pub mod commands;
pub mod error;
pub mod labels;
pub mod ledger;
pub mod models;
pub mod rate;
pub mod report;
pub mod shift;
pub mod stats;
pub mod storage;
pub mod tui;
