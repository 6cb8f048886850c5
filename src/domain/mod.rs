pub mod booking;
pub mod category;
pub mod common;
pub mod guest;
pub mod transaction;

pub use booking::{Booking, BookingStatus};
pub use category::{Category, CategoryPolicy, Direction};
pub use common::Displayable;
pub use guest::GuestRecord;
pub use transaction::{Transaction, TransactionDraft};
