//! Totals, monthly buckets, and category buckets derived from a ledger snapshot.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::category::{Category, Direction};
use crate::domain::transaction::Transaction;

/// Period key carried by the bucket returned for an empty ledger.
pub const NO_DATA_PERIOD: &str = "no-data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income_sum: Decimal,
    pub expense_sum: Decimal,
    pub net: Decimal,
}

impl Totals {
    pub fn sum_for(&self, direction: Direction) -> Decimal {
        match direction {
            Direction::Income => self.income_sum,
            Direction::Expense => self.expense_sum,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    /// `YYYY-MM`, or [`NO_DATA_PERIOD`] for the placeholder.
    pub period_key: String,
    pub income_sum: Decimal,
    pub expense_sum: Decimal,
}

impl MonthlyBucket {
    pub fn placeholder() -> Self {
        Self {
            period_key: NO_DATA_PERIOD.to_string(),
            income_sum: Decimal::ZERO,
            expense_sum: Decimal::ZERO,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.period_key == NO_DATA_PERIOD
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBucket {
    pub category: Category,
    pub sum: Decimal,
}

pub struct AggregationEngine;

impl AggregationEngine {
    pub fn totals(snapshot: &[Transaction]) -> Totals {
        let (income_sum, expense_sum) =
            snapshot
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(income, expense), txn| {
                    match txn.direction {
                        Direction::Income => (income + txn.amount, expense),
                        Direction::Expense => (income, expense + txn.amount),
                    }
                });
        Totals {
            income_sum,
            expense_sum,
            net: income_sum - expense_sum,
        }
    }

    /// Ascending by calendar month; an empty ledger yields one placeholder bucket.
    pub fn monthly_buckets(snapshot: &[Transaction]) -> Vec<MonthlyBucket> {
        let mut months: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
        for txn in snapshot {
            let entry = months
                .entry((txn.date.year(), txn.date.month()))
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            match txn.direction {
                Direction::Income => entry.0 += txn.amount,
                Direction::Expense => entry.1 += txn.amount,
            }
        }
        if months.is_empty() {
            return vec![MonthlyBucket::placeholder()];
        }
        months
            .into_iter()
            .map(|((year, month), (income_sum, expense_sum))| MonthlyBucket {
                period_key: format!("{year:04}-{month:02}"),
                income_sum,
                expense_sum,
            })
            .collect()
    }

    /// Descending by sum; ties keep the order categories were first seen.
    pub fn category_buckets(snapshot: &[Transaction], direction: Direction) -> Vec<CategoryBucket> {
        let mut buckets: Vec<CategoryBucket> = Vec::new();
        for txn in snapshot.iter().filter(|txn| txn.direction == direction) {
            match buckets.iter_mut().find(|bucket| bucket.category == txn.category) {
                Some(bucket) => bucket.sum += txn.amount,
                None => buckets.push(CategoryBucket {
                    category: txn.category,
                    sum: txn.amount,
                }),
            }
        }
        buckets.sort_by(|a, b| b.sum.cmp(&a.sum));
        buckets
    }
}
