pub mod ledger_manager;
pub mod services;

pub use ledger_manager::{LoadReport, TransactionLedger, DEFAULT_STORAGE_KEY};
