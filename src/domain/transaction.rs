use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::{Category, CategoryPolicy, Direction};
use crate::domain::common::Displayable;
use crate::domain::guest::GuestRecord;
use crate::errors::LedgerError;

/// Largest accepted amount (1e12). Keeps every ledger-wide sum far from `Decimal` overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Amounts must be positive and no larger than [`MAX_AMOUNT`].
pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "amount must be positive, got {amount}"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::Validation(format!(
            "amount {amount} exceeds the limit of {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

/// A recorded income or expense. Only `reconciled` changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub direction: Direction,
    pub category: Category,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_image_ref: Option<String>,
    #[serde(default)]
    pub reconciled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_snapshot: Option<GuestRecord>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.direction == Direction::Income
    }

    /// Same rules as [`TransactionDraft::validate`], applied to stored rows.
    pub fn validate(&self) -> Result<(), LedgerError> {
        CategoryPolicy::validate(self.direction, self.category)?;
        validate_amount(self.amount)
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} {} {} {:.2} [{}]",
            self.date,
            self.direction,
            self.category.code(),
            self.amount,
            if self.reconciled { "reconciled" } else { "pending" }
        )
    }
}

/// A transaction candidate still missing its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub direction: Direction,
    pub category: Category,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub proof_image_ref: Option<String>,
    #[serde(default)]
    pub reconciled: bool,
    #[serde(default)]
    pub booking_ref: Option<String>,
    #[serde(default)]
    pub guest_snapshot: Option<GuestRecord>,
}

impl TransactionDraft {
    pub fn new(
        date: NaiveDate,
        direction: Direction,
        category: Category,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            direction,
            category,
            amount,
            description: description.into(),
            proof_image_ref: None,
            reconciled: false,
            booking_ref: None,
            guest_snapshot: None,
        }
    }

    pub fn income(date: NaiveDate, category: Category, amount: Decimal, description: &str) -> Self {
        Self::new(date, Direction::Income, category, amount, description)
    }

    pub fn expense(date: NaiveDate, category: Category, amount: Decimal, description: &str) -> Self {
        Self::new(date, Direction::Expense, category, amount, description)
    }

    pub fn with_proof_image(mut self, reference: impl Into<String>) -> Self {
        self.proof_image_ref = Some(reference.into());
        self
    }

    pub fn with_guest(mut self, guest: GuestRecord) -> Self {
        self.guest_snapshot = Some(guest);
        self
    }

    pub fn with_booking_ref(mut self, booking_id: impl Into<String>) -> Self {
        self.booking_ref = Some(booking_id.into());
        self
    }

    pub fn reconciled(mut self, value: bool) -> Self {
        self.reconciled = value;
        self
    }

    /// Rejects category/direction mismatches and amounts outside `(0, MAX_AMOUNT]`.
    pub fn validate(&self) -> Result<(), LedgerError> {
        CategoryPolicy::validate(self.direction, self.category)?;
        validate_amount(self.amount)
    }

    pub(crate) fn finalize(self, id: Uuid) -> Transaction {
        Transaction {
            id,
            date: self.date,
            direction: self.direction,
            category: self.category,
            amount: self.amount,
            description: self.description,
            proof_image_ref: self.proof_image_ref,
            reconciled: self.reconciled,
            booking_ref: self.booking_ref,
            guest_snapshot: self.guest_snapshot,
        }
    }
}
