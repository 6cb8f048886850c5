//! Data handed to the document renderer for guest forms, receipts, and tax invoices.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::BusinessProfile;
use crate::domain::guest::GuestRecord;
use crate::domain::transaction::Transaction;
use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    /// Hotel guest registration card.
    GuestRegistration,
    Receipt,
    TaxInvoice,
}

impl DocumentKind {
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::GuestRegistration => "บัตรทะเบียนผู้พักโรงแรม",
            DocumentKind::Receipt => "ใบรับเงินชั่วคราว / เงินมัดจำ",
            DocumentKind::TaxInvoice => "ใบเสร็จรับเงิน / ใบกำกับภาษี",
        }
    }

    pub fn is_financial(&self) -> bool {
        !matches!(self, DocumentKind::GuestRegistration)
    }
}

/// VAT-inclusive split of a gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VatBreakdown {
    pub rate: Decimal,
    pub pre_vat: Decimal,
    pub vat: Decimal,
    pub gross: Decimal,
}

impl VatBreakdown {
    pub fn inclusive(gross: Decimal, rate: Decimal) -> Self {
        let pre_vat = (gross / (Decimal::ONE + rate))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self {
            rate,
            pre_vat,
            vat: gross - pre_vat,
            gross,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentData {
    pub kind: DocumentKind,
    pub title: &'static str,
    pub business: BusinessProfile,
    pub guest: GuestRecord,
    pub formatted_national_id: String,
    pub room_number: String,
    pub description: String,
    pub amount: Decimal,
    pub vat: Option<VatBreakdown>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct StayDetails {
    pub room_number: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl DocumentData {
    pub fn build(
        kind: DocumentKind,
        business: &BusinessProfile,
        guest: &GuestRecord,
        stay: StayDetails,
        description: &str,
        amount: Decimal,
        vat_rate: Decimal,
    ) -> Self {
        Self {
            kind,
            title: kind.title(),
            business: business.clone(),
            guest: guest.clone(),
            formatted_national_id: guest.formatted_national_id(),
            room_number: stay.room_number,
            description: description.to_string(),
            amount,
            vat: kind
                .is_financial()
                .then(|| VatBreakdown::inclusive(amount, vat_rate)),
            check_in: stay.check_in,
            check_out: stay.check_out,
        }
    }

    /// Reissues a document from the guest copy stored on a transaction.
    pub fn from_transaction(
        kind: DocumentKind,
        business: &BusinessProfile,
        transaction: &Transaction,
        stay: StayDetails,
        vat_rate: Decimal,
    ) -> Result<Self> {
        let guest = transaction.guest_snapshot.as_ref().ok_or_else(|| {
            LedgerError::Validation(format!(
                "transaction {} carries no guest data",
                transaction.id
            ))
        })?;
        Ok(Self::build(
            kind,
            business,
            guest,
            stay,
            &transaction.description,
            transaction.amount,
            vat_rate,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::transaction::TransactionDraft;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn guest() -> GuestRecord {
        GuestRecord::new("1103700123451", "สมชาย", "รักดี", "Bangkok")
    }

    #[test]
    fn vat_breakdown_splits_inclusive_amount() {
        let vat = VatBreakdown::inclusive(dec!(1070), dec!(0.07));
        assert_eq!(vat.pre_vat, dec!(1000.00));
        assert_eq!(vat.vat, dec!(70.00));

        let odd = VatBreakdown::inclusive(dec!(3900), dec!(0.07));
        assert_eq!(odd.pre_vat + odd.vat, dec!(3900));
        assert_eq!(odd.pre_vat, dec!(3644.86));
    }

    #[test]
    fn registration_form_has_no_vat() {
        let doc = DocumentData::build(
            DocumentKind::GuestRegistration,
            &BusinessProfile::default(),
            &guest(),
            StayDetails {
                room_number: "204".into(),
                ..Default::default()
            },
            "Deluxe Pool View",
            dec!(3900),
            dec!(0.07),
        );
        assert!(doc.vat.is_none());
        assert_eq!(doc.formatted_national_id, "1 - 1037 - 00123 - 45 - 1");
    }

    #[test]
    fn reissue_requires_a_guest_snapshot() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 21).unwrap();
        let plain = TransactionDraft::income(date, Category::RoomRevenue, dec!(1500), "walk-in")
            .finalize(Uuid::new_v4());
        assert!(DocumentData::from_transaction(
            DocumentKind::Receipt,
            &BusinessProfile::default(),
            &plain,
            StayDetails::default(),
            dec!(0.07),
        )
        .is_err());

        let with_guest = TransactionDraft::income(date, Category::RoomRevenue, dec!(1500), "stay")
            .with_guest(guest())
            .finalize(Uuid::new_v4());
        let doc = DocumentData::from_transaction(
            DocumentKind::TaxInvoice,
            &BusinessProfile::default(),
            &with_guest,
            StayDetails::default(),
            dec!(0.07),
        )
        .unwrap();
        assert_eq!(doc.title, "ใบเสร็จรับเงิน / ใบกำกับภาษี");
        assert!(doc.vat.is_some());
    }
}
