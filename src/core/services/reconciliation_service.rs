use std::cmp::Reverse;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::transaction::Transaction;

/// Count and value of every unreconciled transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PendingSummary {
    pub count: usize,
    pub total_amount: Decimal,
}

pub struct ReconciliationTracker;

impl ReconciliationTracker {
    /// The `limit` most recent unreconciled transactions, newest date first.
    pub fn pending(snapshot: &[Transaction], limit: usize) -> Vec<&Transaction> {
        let mut pending: Vec<&Transaction> = snapshot.iter().filter(|txn| !txn.reconciled).collect();
        pending.sort_by_key(|txn| Reverse(txn.date));
        pending.truncate(limit);
        pending
    }

    /// Covers all unreconciled transactions regardless of any `pending` limit.
    pub fn pending_summary(snapshot: &[Transaction]) -> PendingSummary {
        snapshot
            .iter()
            .filter(|txn| !txn.reconciled)
            .fold(PendingSummary::default(), |acc, txn| PendingSummary {
                count: acc.count + 1,
                total_amount: acc.total_amount + txn.amount,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::transaction::TransactionDraft;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn expense(day: u32, amount: Decimal, reconciled: bool) -> Transaction {
        TransactionDraft::expense(
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            Category::Supplies,
            amount,
            "supplies",
        )
        .reconciled(reconciled)
        .finalize(Uuid::new_v4())
    }

    fn snapshot() -> Vec<Transaction> {
        vec![
            expense(3, dec!(10), false),
            expense(15, dec!(20), true),
            expense(9, dec!(30), false),
            expense(21, dec!(40), false),
            expense(1, dec!(50), false),
        ]
    }

    #[test]
    fn pending_orders_by_date_descending_and_truncates() {
        let snapshot = snapshot();
        let pending = ReconciliationTracker::pending(&snapshot, 2);
        let amounts: Vec<_> = pending.iter().map(|txn| txn.amount).collect();
        assert_eq!(amounts, [dec!(40), dec!(30)]);
        assert!(pending.iter().all(|txn| !txn.reconciled));
    }

    #[test]
    fn summary_ignores_the_view_limit() {
        let snapshot = snapshot();
        for limit in [0, 1, 3, 10] {
            let _ = ReconciliationTracker::pending(&snapshot, limit);
            let summary = ReconciliationTracker::pending_summary(&snapshot);
            assert_eq!(summary.count, 4);
            assert_eq!(summary.total_amount, dec!(130));
        }
    }

    #[test]
    fn same_date_keeps_snapshot_order() {
        let first = expense(5, dec!(1), false);
        let second = expense(5, dec!(2), false);
        let snapshot = vec![first.clone(), second.clone()];
        let pending = ReconciliationTracker::pending(&snapshot, 5);
        assert_eq!(pending[0].id, first.id);
        assert_eq!(pending[1].id, second.id);
    }
}
