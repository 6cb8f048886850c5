//! Stay billing: room catalog lookup, night count, and extra-guest fees.

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Default charge per extra guest per stay.
pub const EXTRA_GUEST_UNIT_PRICE: Decimal = Decimal::from_parts(300, 0, 0, false, 0);

/// A catalog entry matched either by exact room number or by number prefix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub key: String,
    pub name: String,
    pub nightly_rate: Decimal,
}

impl Room {
    pub fn new(key: impl Into<String>, name: impl Into<String>, nightly_rate: Decimal) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            nightly_rate,
        }
    }
}

static DEFAULT_ROOMS: Lazy<Vec<Room>> = Lazy::new(|| {
    vec![
        Room::new("1", "Standard Garden View", Decimal::from(1500)),
        Room::new("2", "Deluxe Pool View", Decimal::from(1800)),
        Room::new("3", "Family Suite", Decimal::from(2800)),
        Room::new("V", "Private Pool Villa", Decimal::from(4500)),
    ]
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_ROOMS.clone())
    }
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Exact key wins; otherwise the longest matching prefix.
    pub fn lookup(&self, room_number: &str) -> Result<&Room, LedgerError> {
        let wanted = room_number.trim();
        if wanted.is_empty() {
            return Err(LedgerError::RoomNotFound("<empty>".into()));
        }
        if let Some(room) = self.rooms.iter().find(|room| room.key == wanted) {
            return Ok(room);
        }
        self.rooms
            .iter()
            .filter(|room| wanted.starts_with(room.key.as_str()))
            .max_by_key(|room| room.key.len())
            .ok_or_else(|| LedgerError::RoomNotFound(wanted.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    CreditCard,
    Other(String),
}

impl PaymentMethod {
    pub fn label(&self) -> &str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank transfer",
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::Other(label) => label.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => PaymentMethod::Cash,
            "transfer" | "bank" | "bank-transfer" => PaymentMethod::BankTransfer,
            "card" | "credit" | "credit-card" => PaymentMethod::CreditCard,
            _ => PaymentMethod::Other(value.trim().to_string()),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived lodging charge; only persisted through the transaction it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StayCharge {
    pub room_number: String,
    pub nights: u32,
    pub base_rate: Decimal,
    pub extra_guest_fee: Decimal,
    pub total_amount: Decimal,
    pub rendered_description: String,
}

#[derive(Debug, Clone)]
pub struct PricingCalculator {
    catalog: RoomCatalog,
    extra_guest_unit_price: Decimal,
}

impl Default for PricingCalculator {
    fn default() -> Self {
        Self::new(RoomCatalog::default(), EXTRA_GUEST_UNIT_PRICE)
    }
}

impl PricingCalculator {
    pub fn new(catalog: RoomCatalog, extra_guest_unit_price: Decimal) -> Self {
        Self {
            catalog,
            extra_guest_unit_price,
        }
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    /// Same-day and inverted ranges bill one night.
    pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
        let days = (check_out - check_in).num_days();
        u32::try_from(days.max(1)).unwrap_or(u32::MAX)
    }

    pub fn quote(
        &self,
        room_number: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        extra_guests: u32,
        payment: &PaymentMethod,
    ) -> Result<StayCharge, LedgerError> {
        let room = self.catalog.lookup(room_number)?;
        let nights = Self::nights(check_in, check_out);
        let base_total = room.nightly_rate * Decimal::from(nights);
        let extra_guest_fee = self.extra_guest_unit_price * Decimal::from(extra_guests);
        let total_amount = base_total + extra_guest_fee;

        let mut description = format!(
            "{} (room {}) - {} night{}",
            room.name,
            room_number.trim(),
            nights,
            if nights == 1 { "" } else { "s" }
        );
        if extra_guests > 0 {
            description.push_str(&format!(
                " + {} extra guest{}",
                extra_guests,
                if extra_guests == 1 { "" } else { "s" }
            ));
        }
        description.push_str(&format!(" - paid by {}", payment.label()));

        Ok(StayCharge {
            room_number: room_number.trim().to_string(),
            nights,
            base_rate: room.nightly_rate,
            extra_guest_fee,
            total_amount,
            rendered_description: description,
        })
    }
}
