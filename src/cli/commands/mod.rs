pub mod front_desk;
pub mod ledger;
pub mod system;
pub mod transaction;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::cli::registry::CommandEntry;
use crate::errors::CliError;

pub type CommandResult = Result<(), CliError>;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut entries = ledger::definitions();
    entries.extend(transaction::definitions());
    entries.extend(front_desk::definitions());
    entries.extend(system::definitions());
    entries
}

pub(crate) fn required<'a>(args: &[&'a str], index: usize, name: &str) -> Result<&'a str, CliError> {
    args.get(index)
        .copied()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| CliError::Input(format!("missing argument <{name}>")))
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("`{value}` is not a date (expected YYYY-MM-DD)")))
}

pub(crate) fn parse_amount(value: &str) -> Result<Decimal, CliError> {
    value
        .trim()
        .replace(',', "")
        .parse::<Decimal>()
        .map_err(|_| CliError::Input(format!("`{value}` is not an amount")))
}

pub(crate) fn parse_id(value: &str) -> Result<Uuid, CliError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| CliError::Input(format!("`{value}` is not a transaction id")))
}

/// Joins the remaining arguments into one free-text value.
pub(crate) fn rest_text(args: &[&str], from: usize) -> String {
    args.iter().skip(from).copied().collect::<Vec<_>>().join(" ")
}
