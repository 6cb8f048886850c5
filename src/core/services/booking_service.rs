//! Recording booking payments exactly once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::core::ledger_manager::TransactionLedger;
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::category::{Category, Direction};
use crate::domain::transaction::{Transaction, TransactionDraft};
use crate::errors::Result;

/// External list of bookings (a property-management system or a fixture).
pub trait BookingSource {
    fn bookings(&self) -> Result<Vec<Booking>>;

    fn find(&self, booking_id: &str) -> Result<Option<Booking>> {
        Ok(self
            .bookings()?
            .into_iter()
            .find(|booking| booking.id == booking_id))
    }
}

/// Fixed sample bookings used until a real source is connected.
#[derive(Debug, Clone)]
pub struct MockBookingSource {
    bookings: Vec<Booking>,
}

impl MockBookingSource {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }
}

impl Default for MockBookingSource {
    fn default() -> Self {
        Self::new(vec![
            sample_booking("BK001", "John Doe", "101", (5, 20), (5, 22), 4800, BookingStatus::Confirmed),
            sample_booking("BK002", "Lisa Black", "205", (5, 21), (5, 23), 5200, BookingStatus::Confirmed),
            sample_booking("BK003", "สมชาย รักดี", "103", (5, 21), (5, 21), 1500, BookingStatus::Pending),
        ])
    }
}

fn sample_booking(
    id: &str,
    guest_name: &str,
    room_number: &str,
    check_in: (u32, u32),
    check_out: (u32, u32),
    total: i64,
    status: BookingStatus,
) -> Booking {
    let date = |(month, day): (u32, u32)| {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap_or(NaiveDate::MIN)
    };
    Booking {
        id: id.to_string(),
        guest_name: guest_name.to_string(),
        room_number: room_number.to_string(),
        check_in: date(check_in),
        check_out: date(check_out),
        total_amount: Decimal::from(total),
        status,
        guest_details: None,
    }
}

impl BookingSource for MockBookingSource {
    fn bookings(&self) -> Result<Vec<Booking>> {
        Ok(self.bookings.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Recorded(Transaction),
    AlreadyRecorded(Transaction),
}

impl PaymentOutcome {
    pub fn transaction(&self) -> &Transaction {
        match self {
            PaymentOutcome::Recorded(txn) | PaymentOutcome::AlreadyRecorded(txn) => txn,
        }
    }
}

pub struct BookingService;

impl BookingService {
    /// The income transaction already recorded for `booking_id`, if any.
    pub fn payment_for<'a>(snapshot: &'a [Transaction], booking_id: &str) -> Option<&'a Transaction> {
        let booking_id = booking_id.trim();
        if booking_id.is_empty() {
            return None;
        }
        snapshot.iter().find(|txn| {
            txn.direction == Direction::Income
                && (txn.booking_ref.as_deref() == Some(booking_id)
                    || contains_token(&txn.description, booking_id))
        })
    }

    pub fn is_paid(snapshot: &[Transaction], booking_id: &str) -> bool {
        Self::payment_for(snapshot, booking_id).is_some()
    }

    pub fn unpaid<'a>(snapshot: &[Transaction], bookings: &'a [Booking]) -> Vec<&'a Booking> {
        bookings
            .iter()
            .filter(|booking| !Self::is_paid(snapshot, &booking.id))
            .collect()
    }

    /// Records the booking total as reconciled room revenue, once per booking id.
    pub fn mark_paid(
        ledger: &mut TransactionLedger,
        booking: &Booking,
        paid_on: NaiveDate,
    ) -> Result<PaymentOutcome> {
        if let Some(existing) = Self::payment_for(ledger.snapshot(), &booking.id) {
            warn!(booking = %booking.id, transaction = %existing.id, "booking already paid");
            return Ok(PaymentOutcome::AlreadyRecorded(existing.clone()));
        }
        let draft = TransactionDraft::income(
            paid_on,
            Category::RoomRevenue,
            booking.total_amount,
            &format!("Payment for Booking {} - {}", booking.id, booking.guest_name),
        )
        .with_booking_ref(booking.id.clone())
        .reconciled(true);
        let draft = match &booking.guest_details {
            Some(guest) => draft.with_guest(guest.clone()),
            None => draft,
        };
        ledger.append(draft).map(PaymentOutcome::Recorded)
    }
}

/// Booking ids may contain `-` and `_`, so those never end a token.
fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// True when `token` appears in `text` with no token characters on either side.
fn contains_token(text: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    text.match_indices(token).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(is_token_char) && !after.is_some_and(is_token_char)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn paid_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 22).unwrap()
    }

    fn ledger() -> TransactionLedger {
        TransactionLedger::open_default(Box::new(MemoryStore::new())).0
    }

    #[test]
    fn token_match_is_exact() {
        assert!(contains_token("Payment for Booking BK1 - Ann", "BK1"));
        assert!(contains_token("BK1", "BK1"));
        assert!(!contains_token("Payment for Booking BK10 - Ann", "BK1"));
        assert!(!contains_token("XBK1", "BK1"));
        assert!(contains_token("deposit (BK-7)", "BK-7"));
        assert!(!contains_token("Payment for Booking BK1-2 - Ann", "BK1"));
        assert!(!contains_token("Payment for Booking BK1_2 - Ann", "BK1"));
        assert!(!contains_token("ref X-BK1", "BK1"));
        assert!(contains_token("Payment for Booking BK1 - Ann", "BK1"));
        assert!(!contains_token("anything", ""));
    }

    #[test]
    fn mark_paid_is_idempotent() {
        let source = MockBookingSource::default();
        let booking = source.find("BK002").unwrap().expect("sample booking");
        let mut ledger = ledger();

        let first = BookingService::mark_paid(&mut ledger, &booking, paid_on()).unwrap();
        assert!(matches!(first, PaymentOutcome::Recorded(_)));
        let txn = first.transaction();
        assert_eq!(txn.amount, dec!(5200));
        assert_eq!(txn.category, Category::RoomRevenue);
        assert!(txn.reconciled);
        assert_eq!(txn.description, "Payment for Booking BK002 - Lisa Black");

        let second = BookingService::mark_paid(&mut ledger, &booking, paid_on()).unwrap();
        assert_eq!(second, PaymentOutcome::AlreadyRecorded(txn.clone()));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn similar_ids_do_not_count_as_paid() {
        let mut ledger = ledger();
        let mut booking = MockBookingSource::default().bookings().unwrap()[0].clone();
        booking.id = "BK10".into();
        BookingService::mark_paid(&mut ledger, &booking, paid_on()).unwrap();

        assert!(BookingService::is_paid(ledger.snapshot(), "BK10"));
        assert!(!BookingService::is_paid(ledger.snapshot(), "BK1"));
    }

    #[test]
    fn suffixed_ids_in_descriptions_do_not_count_as_paid() {
        let mut ledger = ledger();
        for description in ["Payment for Booking BK1-2 - Ann", "Payment for Booking BK1_2 - Ann"] {
            ledger
                .append(TransactionDraft::income(
                    paid_on(),
                    Category::RoomRevenue,
                    Decimal::from(1000),
                    description,
                ))
                .unwrap();
        }
        assert!(!BookingService::is_paid(ledger.snapshot(), "BK1"));
        assert!(BookingService::is_paid(ledger.snapshot(), "BK1-2"));
    }

    #[test]
    fn expense_mentioning_a_booking_is_not_a_payment() {
        let mut ledger = ledger();
        ledger
            .append(TransactionDraft::expense(
                paid_on(),
                Category::Marketing,
                dec!(480),
                "OTA commission BK001",
            ))
            .unwrap();
        assert!(!BookingService::is_paid(ledger.snapshot(), "BK001"));

        let bookings = MockBookingSource::default().bookings().unwrap();
        let unpaid = BookingService::unpaid(ledger.snapshot(), &bookings);
        assert_eq!(unpaid.len(), 3);
    }

    #[test]
    fn manual_income_with_booking_token_blocks_duplicate() {
        let mut ledger = ledger();
        ledger
            .append(TransactionDraft::income(
                paid_on(),
                Category::RoomRevenue,
                dec!(4800),
                "Walk-in transfer for BK001",
            ))
            .unwrap();
        let booking = MockBookingSource::default().find("BK001").unwrap().unwrap();
        let outcome = BookingService::mark_paid(&mut ledger, &booking, paid_on()).unwrap();
        assert!(matches!(outcome, PaymentOutcome::AlreadyRecorded(_)));
        assert_ne!(outcome.transaction().id, Uuid::nil());
        assert_eq!(ledger.len(), 1);
    }
}
