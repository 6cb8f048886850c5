use std::path::PathBuf;

use chrono::Local;

use crate::cli::commands::{required, CommandResult};
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::{AggregationEngine, ReconciliationTracker};
use crate::domain::category::Direction;
use crate::errors::CliError;
use crate::export::ExportFormatter;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("summary", "Show income, expense, and net totals", "summary", cmd_summary),
        CommandEntry::new("monthly", "Show totals per calendar month", "monthly", cmd_monthly),
        CommandEntry::new(
            "categories",
            "Show totals per category for one direction",
            "categories <income|expense>",
            cmd_categories,
        ),
        CommandEntry::new(
            "pending",
            "List unreconciled transactions, newest first",
            "pending [limit]",
            cmd_pending,
        ),
        CommandEntry::new("export", "Write the ledger as CSV", "export [path]", cmd_export),
    ]
}

fn cmd_summary(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let totals = AggregationEngine::totals(context.ledger.snapshot());
    let currency = context.currency().to_string();
    output::section("Summary");
    output::line(format!("Income  : {}", output::money(totals.income_sum, &currency)));
    output::line(format!("Expense : {}", output::money(totals.expense_sum, &currency)));
    output::line(format!("Net     : {}", output::money(totals.net, &currency)));
    output::line(format!("Entries : {}", context.ledger.len()));
    Ok(())
}

fn cmd_monthly(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let buckets = AggregationEngine::monthly_buckets(context.ledger.snapshot());
    output::section("Monthly totals");
    let rows: Vec<Vec<String>> = buckets
        .iter()
        .map(|bucket| {
            vec![
                bucket.period_key.clone(),
                format!("{:.2}", bucket.income_sum),
                format!("{:.2}", bucket.expense_sum),
            ]
        })
        .collect();
    output::render_table(&["Month", "Income", "Expense"], &rows);
    Ok(())
}

fn cmd_categories(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let raw = required(args, 0, "income|expense")?;
    let direction = Direction::parse(raw)
        .ok_or_else(|| CliError::Input(format!("`{raw}` is neither income nor expense")))?;
    let buckets = AggregationEngine::category_buckets(context.ledger.snapshot(), direction);
    output::section(format!("{} by category", direction.code()));
    if buckets.is_empty() {
        output::info("No transactions recorded.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = buckets
        .iter()
        .map(|bucket| {
            vec![
                bucket.category.code().to_string(),
                bucket.category.label().to_string(),
                format!("{:.2}", bucket.sum),
            ]
        })
        .collect();
    output::render_table(&["Code", "Category", "Amount"], &rows);
    Ok(())
}

fn cmd_pending(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| CliError::Input(format!("`{raw}` is not a count")))?,
        None => context.config.pending_limit,
    };
    let snapshot = context.ledger.snapshot();
    let summary = ReconciliationTracker::pending_summary(snapshot);
    let pending = ReconciliationTracker::pending(snapshot, limit);
    output::section(format!(
        "Pending reconciliation ({} total, {})",
        summary.count,
        output::money(summary.total_amount, &context.config.currency)
    ));
    let rows: Vec<Vec<String>> = pending
        .iter()
        .map(|txn| {
            vec![
                txn.date.to_string(),
                txn.direction.code().to_string(),
                format!("{:.2}", txn.amount),
                txn.description.clone(),
                txn.id.to_string(),
            ]
        })
        .collect();
    output::render_table(&["Date", "Type", "Amount", "Description", "Id"], &rows);
    Ok(())
}

fn cmd_export(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(path) => PathBuf::from(path),
        None => context
            .base_dir()
            .join("exports")
            .join(ExportFormatter::file_name(Local::now().date_naive())),
    };
    ExportFormatter::write_to(&path, context.ledger.snapshot())?;
    output::success(format!(
        "Exported {} transactions to {}",
        context.ledger.len(),
        path.display()
    ));
    Ok(())
}
