//! Contract for the optical-extraction collaborator (receipts, slips, ID cards).
//!
//! The service itself lives outside this crate. Everything it returns is treated
//! as untrusted: payloads are parsed leniently, then validated structurally
//! before anything reaches the ledger. Confidence scores are informational only.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::category::{Category, Direction};
use crate::domain::guest::GuestRecord;
use crate::domain::transaction::TransactionDraft;
use crate::errors::{LedgerError, Result};

/// What the operator expects the image to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionIntent {
    Income,
    Expense,
    General,
    IdentityDocument,
}

impl ExtractionIntent {
    pub fn direction_hint(&self) -> Option<Direction> {
        match self {
            ExtractionIntent::Income => Some(Direction::Income),
            ExtractionIntent::Expense => Some(Direction::Expense),
            ExtractionIntent::General | ExtractionIntent::IdentityDocument => None,
        }
    }
}

/// Implemented by adapters around the external extraction service.
pub trait OpticalExtractor {
    fn extract(&self, image: &[u8], intent: ExtractionIntent) -> Result<ExtractionPayload>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionPayload {
    Transaction(ExtractedTransaction),
    Guest(ExtractedGuest),
}

/// Transaction-shaped guess as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedTransaction {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default, rename = "type")]
    pub direction: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl ExtractedTransaction {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| LedgerError::ExternalService(format!("unreadable receipt payload: {err}")))
    }

    /// Structural validation into a draft; the intent fills a missing direction.
    pub fn into_draft(self, intent: ExtractionIntent) -> Result<TransactionDraft> {
        let raw_date = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| LedgerError::ExternalService("receipt date missing".into()))?;
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
            LedgerError::ExternalService(format!("receipt date `{raw_date}` is not YYYY-MM-DD"))
        })?;
        let amount = self
            .amount
            .ok_or_else(|| LedgerError::ExternalService("receipt amount missing".into()))?;

        let category = match self.category.as_deref() {
            Some(raw) => Category::parse(raw)
                .ok_or_else(|| LedgerError::Validation(format!("unknown category `{raw}`")))?,
            None => return Err(LedgerError::ExternalService("receipt category missing".into())),
        };
        let direction = match self.direction.as_deref() {
            Some(raw) => Direction::parse(raw)
                .ok_or_else(|| LedgerError::Validation(format!("unknown transaction type `{raw}`")))?,
            None => intent.direction_hint().unwrap_or_else(|| category.direction()),
        };

        let draft = TransactionDraft::new(
            date,
            direction,
            category,
            amount.round_dp(2),
            self.description.unwrap_or_default().trim(),
        );
        draft.validate()?;
        Ok(draft)
    }
}

/// Identity-card fields as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedGuest {
    #[serde(default)]
    pub id_number: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "firstNameTH")]
    pub first_name_th: Option<String>,
    #[serde(default, rename = "lastNameTH")]
    pub last_name_th: Option<String>,
    #[serde(default, rename = "firstNameEN")]
    pub first_name_en: Option<String>,
    #[serde(default, rename = "lastNameEN")]
    pub last_name_en: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
}

impl ExtractedGuest {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| LedgerError::ExternalService(format!("unreadable ID card payload: {err}")))
    }

    /// National id, Thai given/family names and address are required.
    pub fn into_guest_record(self) -> Result<GuestRecord> {
        let national_id: String = required(self.id_number, "idNumber")?
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        let given_name = required(self.first_name_th, "firstNameTH")?;
        let family_name = required(self.last_name_th, "lastNameTH")?;
        let address = required(self.address, "address")?;

        let mut guest = GuestRecord::new(national_id, given_name, family_name, address);
        guest.title = optional(self.title).unwrap_or_default();
        guest.given_name_latin = optional(self.first_name_en);
        guest.family_name_latin = optional(self.last_name_en);
        guest.date_of_birth = parse_optional_date(self.dob.as_deref(), "dob");
        guest.id_issue_date = parse_optional_date(self.issue_date.as_deref(), "issueDate");
        guest.id_expiry_date = parse_optional_date(self.expiry_date.as_deref(), "expiryDate");
        guest.nationality = optional(self.nationality).unwrap_or_default();
        guest.occupation = optional(self.occupation).unwrap_or_default();
        Ok(guest)
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    optional(value)
        .ok_or_else(|| LedgerError::ExternalService(format!("ID card field `{field}` missing")))
}

fn parse_optional_date(value: Option<&str>, field: &str) -> Option<NaiveDate> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            debug!(field, value = raw, "dropping unparsable ID card date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn receipt_payload_with_thai_label_becomes_a_draft() {
        let raw = r#"{"date":"2024-05-21","amount":1250.5,"type":"EXPENSE",
            "category":"ค่าซ่อมบำรุง","description":"Air-con repair","confidence":0.92}"#;
        let draft = ExtractedTransaction::from_json(raw)
            .unwrap()
            .into_draft(ExtractionIntent::General)
            .unwrap();
        assert_eq!(draft.direction, Direction::Expense);
        assert_eq!(draft.category, Category::Maintenance);
        assert_eq!(draft.amount, dec!(1250.50));
        assert_eq!(draft.description, "Air-con repair");
        assert!(!draft.reconciled);
    }

    #[test]
    fn missing_type_falls_back_to_intent() {
        let extracted = ExtractedTransaction {
            date: Some("2024-05-22".into()),
            amount: Some(dec!(3000)),
            category: Some("ROOM_REVENUE".into()),
            ..Default::default()
        };
        let draft = extracted.into_draft(ExtractionIntent::Income).unwrap();
        assert_eq!(draft.direction, Direction::Income);
    }

    #[test]
    fn intent_mismatch_with_category_is_rejected() {
        let extracted = ExtractedTransaction {
            date: Some("2024-05-22".into()),
            amount: Some(dec!(3000)),
            category: Some("ROOM_REVENUE".into()),
            ..Default::default()
        };
        let err = extracted
            .into_draft(ExtractionIntent::Expense)
            .expect_err("room revenue cannot be an expense");
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn unusable_payloads_map_to_external_service_errors() {
        assert!(matches!(
            ExtractedTransaction::from_json("not json"),
            Err(LedgerError::ExternalService(_))
        ));
        let no_date = ExtractedTransaction {
            amount: Some(dec!(10)),
            category: Some("SUPPLIES".into()),
            ..Default::default()
        };
        assert!(matches!(
            no_date.into_draft(ExtractionIntent::Expense),
            Err(LedgerError::ExternalService(_))
        ));
        let bad_date = ExtractedTransaction {
            date: Some("21/05/2024".into()),
            amount: Some(dec!(10)),
            category: Some("SUPPLIES".into()),
            ..Default::default()
        };
        assert!(matches!(
            bad_date.into_draft(ExtractionIntent::Expense),
            Err(LedgerError::ExternalService(_))
        ));
    }

    #[test]
    fn zero_amount_is_a_validation_error_even_with_high_confidence() {
        let extracted = ExtractedTransaction {
            date: Some("2024-05-22".into()),
            amount: Some(Decimal::ZERO),
            category: Some("SUPPLIES".into()),
            confidence: Some(0.99),
            ..Default::default()
        };
        assert!(matches!(
            extracted.into_draft(ExtractionIntent::Expense),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn id_card_payload_becomes_guest_record() {
        let raw = r#"{"idNumber":"1 1037 00123 45 1","title":"นาย","firstNameTH":"สมชาย",
            "lastNameTH":"รักดี","firstNameEN":"Somchai","lastNameEN":"Rakdee",
            "address":"99 Sukhumvit Rd, Bangkok","dob":"1987-03-14","issueDate":"garbled",
            "nationality":"ไทย","occupation":"รับจ้าง"}"#;
        let guest = ExtractedGuest::from_json(raw)
            .unwrap()
            .into_guest_record()
            .unwrap();
        assert_eq!(guest.national_id, "1103700123451");
        assert_eq!(guest.full_name(), "นาย สมชาย รักดี");
        assert_eq!(guest.date_of_birth, NaiveDate::from_ymd_opt(1987, 3, 14));
        assert_eq!(guest.id_issue_date, None);
        assert_eq!(guest.given_name_latin.as_deref(), Some("Somchai"));
    }

    #[test]
    fn id_card_without_address_is_rejected() {
        let partial = ExtractedGuest {
            id_number: Some("1103700123451".into()),
            first_name_th: Some("สมชาย".into()),
            last_name_th: Some("รักดี".into()),
            ..Default::default()
        };
        let err = partial.into_guest_record().expect_err("address required");
        assert!(matches!(err, LedgerError::ExternalService(ref msg) if msg.contains("address")));
    }
}
