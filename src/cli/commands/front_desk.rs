use chrono::{Days, Local};
use tracing::debug;

use crate::cli::commands::{parse_date, parse_id, required, rest_text, CommandResult};
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::{BookingService, BookingSource, IntakeService, PaymentOutcome};
use crate::documents::{DocumentData, DocumentKind, StayDetails};
use crate::domain::common::Displayable;
use crate::domain::guest::GuestRecord;
use crate::domain::transaction::Transaction;
use crate::errors::{CliError, LedgerError};
use crate::pricing::{PaymentMethod, StayCharge};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "quote",
            "Price a stay without recording it",
            "quote <room> <check-in> <check-out> [extra-guests] [payment]",
            cmd_quote,
        ),
        CommandEntry::new(
            "checkin",
            "Register a guest and record the stay as room revenue",
            "checkin <room> <check-in> <check-out> <extra-guests> <payment> <national-id> <first-name> <last-name> <address...>",
            cmd_checkin,
        ),
        CommandEntry::new("bookings", "List bookings and payment state", "bookings", cmd_bookings),
        CommandEntry::new(
            "pay",
            "Record the payment for a booking",
            "pay <booking-id> [YYYY-MM-DD]",
            cmd_pay,
        ),
        CommandEntry::new(
            "document",
            "Print guest form, receipt, or tax invoice data as JSON",
            "document <id> <registration|receipt|invoice>",
            cmd_document,
        ),
    ]
}

fn quote_from_args(context: &CliContext, args: &[&str]) -> Result<StayCharge, CliError> {
    let room = required(args, 0, "room")?;
    let check_in = parse_date(required(args, 1, "check-in")?)?;
    let check_out = parse_date(required(args, 2, "check-out")?)?;
    let extra_guests = match args.get(3) {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| CliError::Input(format!("`{raw}` is not a guest count")))?,
        None => 0,
    };
    let payment = args
        .get(4)
        .map(|raw| PaymentMethod::parse(raw))
        .unwrap_or(PaymentMethod::Cash);
    Ok(context
        .pricing
        .quote(room, check_in, check_out, extra_guests, &payment)?)
}

fn print_charge(context: &CliContext, charge: &StayCharge) {
    let currency = context.currency();
    output::line(&charge.rendered_description);
    output::line(format!(
        "Nights  : {} x {}",
        charge.nights,
        output::money(charge.base_rate, currency)
    ));
    output::line(format!(
        "Extras  : {}",
        output::money(charge.extra_guest_fee, currency)
    ));
    output::line(format!(
        "Total   : {}",
        output::money(charge.total_amount, currency)
    ));
}

fn cmd_quote(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let charge = quote_from_args(context, args)?;
    output::section("Quote");
    print_charge(context, &charge);
    Ok(())
}

fn cmd_checkin(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let charge = quote_from_args(context, args)?;
    let check_in = parse_date(required(args, 1, "check-in")?)?;
    let national_id = required(args, 5, "national-id")?;
    let given_name = required(args, 6, "first-name")?;
    let family_name = required(args, 7, "last-name")?;
    let address = rest_text(args, 8);
    if address.trim().is_empty() {
        return Err(CliError::Input("missing argument <address>".into()));
    }

    let guest = GuestRecord::new(national_id, given_name, family_name, address);
    let txn = IntakeService::check_in(&mut context.ledger, &guest, &charge, check_in)?;
    output::section("Checked in");
    print_charge(context, &charge);
    output::success(format!("{} recorded as {}", guest.display_label(), txn.id));
    Ok(())
}

fn cmd_bookings(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let bookings = context.bookings.bookings()?;
    let snapshot = context.ledger.snapshot();
    output::section("Bookings");
    let rows: Vec<Vec<String>> = bookings
        .iter()
        .map(|booking| {
            let paid = if BookingService::is_paid(snapshot, &booking.id) {
                "paid"
            } else {
                "unpaid"
            };
            vec![
                booking.id.clone(),
                booking.guest_name.clone(),
                booking.room_number.clone(),
                format!("{} - {}", booking.check_in, booking.check_out),
                format!("{:.2}", booking.total_amount),
                paid.to_string(),
            ]
        })
        .collect();
    output::render_table(&["Id", "Guest", "Room", "Stay", "Amount", "Payment"], &rows);
    Ok(())
}

fn cmd_pay(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let booking_id = required(args, 0, "booking-id")?;
    let paid_on = match args.get(1) {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let booking = context
        .bookings
        .find(booking_id)?
        .ok_or_else(|| CliError::Input(format!("no booking with id `{booking_id}`")))?;

    match BookingService::mark_paid(&mut context.ledger, &booking, paid_on)? {
        PaymentOutcome::Recorded(txn) => output::success(format!(
            "Payment for {} recorded as {}",
            booking.id, txn.id
        )),
        PaymentOutcome::AlreadyRecorded(txn) => output::warning(format!(
            "Booking {} was already paid ({})",
            booking.id, txn.id
        )),
    }
    Ok(())
}

fn parse_kind(value: &str) -> Result<DocumentKind, CliError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "registration" | "guest" => Ok(DocumentKind::GuestRegistration),
        "receipt" => Ok(DocumentKind::Receipt),
        "invoice" | "tax-invoice" => Ok(DocumentKind::TaxInvoice),
        other => Err(CliError::Input(format!("unknown document kind `{other}`"))),
    }
}

fn room_from_description(description: &str) -> String {
    description
        .split_once("(room ")
        .and_then(|(_, rest)| rest.split_once(')'))
        .map(|(room, _)| room.to_string())
        .unwrap_or_default()
}

/// Reads `N night(s)` from a rendered stay description.
fn nights_from_description(description: &str) -> Option<u32> {
    let (before, _) = description.split_once(" night")?;
    before.rsplit(' ').next()?.parse().ok()
}

/// Booking payments take the booking's room and dates; check-ins read the
/// rendered stay description.
fn resolve_stay(txn: &Transaction, bookings: &dyn BookingSource) -> Result<StayDetails, CliError> {
    if let Some(booking_ref) = txn.booking_ref.as_deref() {
        if let Some(booking) = bookings.find(booking_ref)? {
            return Ok(StayDetails {
                room_number: booking.room_number,
                check_in: Some(booking.check_in),
                check_out: Some(booking.check_out),
            });
        }
        debug!(booking = booking_ref, "booking no longer listed, using the description");
    }
    let check_out = nights_from_description(&txn.description)
        .and_then(|nights| txn.date.checked_add_days(Days::new(u64::from(nights))));
    Ok(StayDetails {
        room_number: room_from_description(&txn.description),
        check_in: Some(txn.date),
        check_out,
    })
}

fn cmd_document(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let id = parse_id(required(args, 0, "id")?)?;
    let kind = parse_kind(required(args, 1, "kind")?)?;
    let txn = context
        .ledger
        .get(id)
        .ok_or(LedgerError::TransactionNotFound(id))?;
    let stay = resolve_stay(txn, context.bookings.as_ref())?;
    let data = DocumentData::from_transaction(
        kind,
        &context.config.business,
        txn,
        stay,
        context.config.vat_rate,
    )?;
    let json = serde_json::to_string_pretty(&data).map_err(LedgerError::from)?;
    output::line(json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::MockBookingSource;
    use crate::domain::category::Category;
    use crate::domain::transaction::TransactionDraft;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn room_is_read_from_rendered_description() {
        assert_eq!(
            room_from_description("Deluxe Pool View (room 204) - 2 nights - paid by Cash"),
            "204"
        );
        assert_eq!(room_from_description("walk-in"), "");
    }

    #[test]
    fn booking_payments_take_room_and_dates_from_the_booking() {
        let source = MockBookingSource::default();
        let booking = source.find("BK002").unwrap().unwrap();
        let txn = TransactionDraft::income(
            NaiveDate::from_ymd_opt(2024, 5, 23).unwrap(),
            Category::RoomRevenue,
            booking.total_amount,
            "Payment for Booking BK002 - Lisa Black",
        )
        .with_booking_ref("BK002")
        .finalize(Uuid::new_v4());

        let stay = resolve_stay(&txn, &source).unwrap();
        assert_eq!(stay.room_number, "205");
        assert_eq!(stay.check_in, Some(booking.check_in));
        assert_eq!(stay.check_out, Some(booking.check_out));
    }

    #[test]
    fn check_in_entries_derive_check_out_from_nights() {
        let check_in = NaiveDate::from_ymd_opt(2024, 5, 21).unwrap();
        let txn = TransactionDraft::income(
            check_in,
            Category::RoomRevenue,
            Decimal::from(3900),
            "Deluxe Pool View (room 204) - 2 nights + 1 extra guest - paid by Cash",
        )
        .finalize(Uuid::new_v4());

        let stay = resolve_stay(&txn, &MockBookingSource::default()).unwrap();
        assert_eq!(stay.room_number, "204");
        assert_eq!(stay.check_in, Some(check_in));
        assert_eq!(stay.check_out, NaiveDate::from_ymd_opt(2024, 5, 23));
        assert_eq!(nights_from_description("walk-in"), None);
    }

    #[test]
    fn document_kinds_parse_aliases() {
        assert_eq!(parse_kind("invoice").unwrap(), DocumentKind::TaxInvoice);
        assert_eq!(parse_kind("Registration").unwrap(), DocumentKind::GuestRegistration);
        assert!(parse_kind("memo").is_err());
    }
}
