//! Guest identity captured at check-in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;

/// Identity data copied onto the transaction that bills the stay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    pub national_id: String,
    #[serde(default)]
    pub title: String,
    pub given_name: String,
    pub family_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name_latin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name_latin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub occupation: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_issue_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_expiry_date: Option<NaiveDate>,
}

impl GuestRecord {
    pub fn new(
        national_id: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            national_id: national_id.into(),
            title: String::new(),
            given_name: given_name.into(),
            family_name: family_name.into(),
            given_name_latin: None,
            family_name_latin: None,
            date_of_birth: None,
            nationality: String::new(),
            occupation: String::new(),
            address: address.into(),
            phone: None,
            id_issue_date: None,
            id_expiry_date: None,
        }
    }

    pub fn full_name(&self) -> String {
        [self.title.as_str(), &self.given_name, &self.family_name]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Thai national ids render as `X - XXXX - XXXXX - XX - X`; other ids pass through.
    pub fn formatted_national_id(&self) -> String {
        let id = self.national_id.trim();
        if id.len() != 13 || !id.chars().all(|c| c.is_ascii_digit()) {
            return id.to_string();
        }
        format!(
            "{} - {} - {} - {} - {}",
            &id[0..1],
            &id[1..5],
            &id[5..10],
            &id[10..12],
            &id[12..13]
        )
    }
}

impl Displayable for GuestRecord {
    fn display_label(&self) -> String {
        format!("{} ({})", self.full_name(), self.national_id)
    }
}
