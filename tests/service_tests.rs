mod common;

use common::{date, expense, income, open_ledger, temp_base};
use resort_ledger::{
    core::services::{
        AggregationEngine, BookingService, BookingSource, MockBookingSource, PaymentOutcome,
        ReconciliationTracker,
    },
    domain::{Category, Direction},
};
use rust_decimal::Decimal;

#[test]
fn same_month_entries_collapse_into_one_bucket() {
    let mut ledger = open_ledger(&temp_base());
    ledger.append(income(date(2024, 5, 2), 500, "deposit")).unwrap();
    ledger.append(income(date(2024, 5, 9), 700, "stay")).unwrap();
    ledger
        .append(expense(date(2024, 5, 15), Category::Supplies, 200, "towels"))
        .unwrap();

    let buckets = AggregationEngine::monthly_buckets(ledger.snapshot());
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].period_key, "2024-05");
    assert_eq!(buckets[0].income_sum, Decimal::from(1200));
    assert_eq!(buckets[0].expense_sum, Decimal::from(200));
}

#[test]
fn empty_ledger_yields_a_placeholder_month() {
    let ledger = open_ledger(&temp_base());
    let buckets = AggregationEngine::monthly_buckets(ledger.snapshot());
    assert_eq!(buckets.len(), 1);
    assert!(buckets[0].is_placeholder());
}

#[test]
fn totals_and_category_sums_agree() {
    let mut ledger = open_ledger(&temp_base());
    ledger.append(income(date(2024, 4, 30), 1800, "room 204")).unwrap();
    ledger.append(income(date(2024, 5, 1), 2800, "room 301")).unwrap();
    ledger
        .append(expense(date(2024, 5, 2), Category::Utilities, 650, "water"))
        .unwrap();
    ledger
        .append(expense(date(2024, 5, 3), Category::StaffSalary, 9000, "payroll"))
        .unwrap();

    let snapshot = ledger.snapshot();
    let totals = AggregationEngine::totals(snapshot);
    assert_eq!(totals.net, totals.income_sum - totals.expense_sum);

    for direction in [Direction::Income, Direction::Expense] {
        let sum: Decimal = AggregationEngine::category_buckets(snapshot, direction)
            .iter()
            .map(|bucket| bucket.sum)
            .sum();
        assert_eq!(sum, totals.sum_for(direction));
    }

    let months = AggregationEngine::monthly_buckets(snapshot);
    let keys: Vec<_> = months.iter().map(|bucket| bucket.period_key.as_str()).collect();
    assert_eq!(keys, ["2024-04", "2024-05"]);
}

#[test]
fn pending_list_tracks_reconciliation() {
    let mut ledger = open_ledger(&temp_base());
    let mut ids = Vec::new();
    for day in 1..=7 {
        ids.push(ledger.append(income(date(2024, 5, day), 100, "daily")).unwrap().id);
    }
    ledger.set_reconciled(ids[6], true).unwrap();

    let snapshot = ledger.snapshot();
    let pending = ReconciliationTracker::pending(snapshot, 5);
    assert_eq!(pending.len(), 5);
    assert_eq!(pending[0].date, date(2024, 5, 6));
    assert!(pending.windows(2).all(|pair| pair[0].date >= pair[1].date));

    let summary = ReconciliationTracker::pending_summary(snapshot);
    assert_eq!(summary.count, 6);
    assert_eq!(summary.total_amount, Decimal::from(600));
}

#[test]
fn paying_every_sample_booking_twice_records_each_once() {
    let mut ledger = open_ledger(&temp_base());
    let source = MockBookingSource::default();
    let bookings = source.bookings().unwrap();
    let paid_on = date(2024, 5, 22);

    for booking in &bookings {
        let first = BookingService::mark_paid(&mut ledger, booking, paid_on).unwrap();
        assert!(matches!(first, PaymentOutcome::Recorded(_)));
        let second = BookingService::mark_paid(&mut ledger, booking, paid_on).unwrap();
        assert!(matches!(second, PaymentOutcome::AlreadyRecorded(_)));
        assert_eq!(first.transaction().id, second.transaction().id);
    }

    assert_eq!(ledger.len(), bookings.len());
    assert!(BookingService::unpaid(ledger.snapshot(), &bookings).is_empty());
    assert!(ledger.snapshot().iter().all(|txn| txn.reconciled));
}
