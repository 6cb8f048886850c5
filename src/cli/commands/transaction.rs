use crate::cli::commands::{parse_amount, parse_date, parse_id, required, rest_text, CommandResult};
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::IntakeService;
use crate::domain::category::{Category, Direction};
use crate::domain::common::Displayable;
use crate::domain::transaction::TransactionDraft;
use crate::errors::CliError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a manual transaction",
            "add <income|expense> <YYYY-MM-DD> <category> <amount> <description...>",
            cmd_add,
        ),
        CommandEntry::new(
            "reconcile",
            "Mark a transaction as checked against the bank",
            "reconcile <id>",
            cmd_reconcile,
        ),
        CommandEntry::new(
            "toggle",
            "Flip the reconciled flag of a transaction",
            "toggle <id>",
            cmd_toggle,
        ),
        CommandEntry::new("remove", "Delete a transaction", "remove <id>", cmd_remove),
    ]
}

fn cmd_add(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let raw_direction = required(args, 0, "income|expense")?;
    let direction = Direction::parse(raw_direction)
        .ok_or_else(|| CliError::Input(format!("`{raw_direction}` is neither income nor expense")))?;
    let date = parse_date(required(args, 1, "date")?)?;
    let raw_category = required(args, 2, "category")?;
    let category = Category::parse(raw_category)
        .ok_or_else(|| CliError::Input(format!("unknown category `{raw_category}`")))?;
    let amount = parse_amount(required(args, 3, "amount")?)?;
    let description = rest_text(args, 4);

    let draft = TransactionDraft::new(date, direction, category, amount, description);
    let txn = IntakeService::record_manual(&mut context.ledger, draft)?;
    output::success(format!(
        "Recorded {} {} ({}) as {}",
        txn.direction,
        output::money(txn.amount, &context.config.currency),
        txn.category,
        txn.id
    ));
    Ok(())
}

fn cmd_reconcile(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let id = parse_id(required(args, 0, "id")?)?;
    let txn = context.ledger.set_reconciled(id, true)?;
    output::success(format!("Reconciled {}", txn.display_label()));
    Ok(())
}

fn cmd_toggle(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let id = parse_id(required(args, 0, "id")?)?;
    let txn = context.ledger.toggle_reconciled(id)?;
    output::success(format!("Updated {}", txn.display_label()));
    Ok(())
}

fn cmd_remove(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let id = parse_id(required(args, 0, "id")?)?;
    let removed = context.ledger.remove(id)?;
    output::success(format!("Removed {} {}", removed.display_label(), removed.description));
    Ok(())
}
