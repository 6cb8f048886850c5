#![doc(test(attr(deny(warnings))))]

//! Resort Ledger keeps a small resort's income and expense journal: category
//! rules, stay pricing, reconciliation tracking, summaries, and CSV export.

pub mod cli;
pub mod config;
pub mod core;
pub mod documents;
pub mod domain;
pub mod errors;
pub mod export;
pub mod extraction;
pub mod pricing;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Resort ledger tracing initialized.");
    });
}
