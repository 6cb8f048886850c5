//! Entry points that funnel manual, scanned, and front-desk input into the ledger.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::core::ledger_manager::TransactionLedger;
use crate::domain::category::Category;
use crate::domain::guest::GuestRecord;
use crate::domain::transaction::{Transaction, TransactionDraft};
use crate::errors::{LedgerError, Result};
use crate::extraction::{ExtractionIntent, ExtractionPayload, OpticalExtractor};
use crate::pricing::StayCharge;

/// Extraction results below this confidence are logged for review.
pub const LOW_CONFIDENCE: f64 = 0.6;

pub struct IntakeService;

impl IntakeService {
    pub fn record_manual(ledger: &mut TransactionLedger, draft: TransactionDraft) -> Result<Transaction> {
        ledger.append(draft)
    }

    /// Runs the extractor and appends the validated result. Any failure leaves the ledger untouched.
    pub fn record_scanned(
        ledger: &mut TransactionLedger,
        extractor: &dyn OpticalExtractor,
        image: &[u8],
        intent: ExtractionIntent,
        proof_image_ref: Option<String>,
    ) -> Result<Transaction> {
        let extracted = match Self::run_extractor(extractor, image, intent)? {
            ExtractionPayload::Transaction(extracted) => extracted,
            ExtractionPayload::Guest(_) => {
                return Err(LedgerError::ExternalService(
                    "expected a receipt but the service returned an ID card".into(),
                ))
            }
        };
        if let Some(confidence) = extracted.confidence {
            if confidence < LOW_CONFIDENCE {
                warn!(confidence, "low-confidence receipt extraction, review before reconciling");
            }
        }
        let mut draft = extracted.into_draft(intent)?;
        draft.proof_image_ref = proof_image_ref;
        // Scanned entries always start unreconciled.
        draft.reconciled = false;
        ledger.append(draft)
    }

    pub fn scan_guest(extractor: &dyn OpticalExtractor, image: &[u8]) -> Result<GuestRecord> {
        match Self::run_extractor(extractor, image, ExtractionIntent::IdentityDocument)? {
            ExtractionPayload::Guest(extracted) => extracted.into_guest_record(),
            ExtractionPayload::Transaction(_) => Err(LedgerError::ExternalService(
                "expected an ID card but the service returned a receipt".into(),
            )),
        }
    }

    /// Books the stay as reconciled room revenue carrying a copy of the guest.
    pub fn check_in(
        ledger: &mut TransactionLedger,
        guest: &GuestRecord,
        charge: &StayCharge,
        date: NaiveDate,
    ) -> Result<Transaction> {
        let draft = TransactionDraft::income(
            date,
            Category::RoomRevenue,
            charge.total_amount,
            &charge.rendered_description,
        )
        .with_guest(guest.clone())
        .reconciled(true);
        let txn = ledger.append(draft)?;
        info!(room = %charge.room_number, nights = charge.nights, "guest checked in");
        Ok(txn)
    }

    fn run_extractor(
        extractor: &dyn OpticalExtractor,
        image: &[u8],
        intent: ExtractionIntent,
    ) -> Result<ExtractionPayload> {
        extractor.extract(image, intent).map_err(|err| {
            warn!(error = %err, ?intent, "optical extraction failed");
            match err {
                LedgerError::ExternalService(_) => err,
                other => LedgerError::ExternalService(other.to_string()),
            }
        })
    }
}
