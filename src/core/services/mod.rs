pub mod aggregation_service;
pub mod booking_service;
pub mod intake_service;
pub mod reconciliation_service;

pub use aggregation_service::{AggregationEngine, CategoryBucket, MonthlyBucket, Totals};
pub use booking_service::{BookingService, BookingSource, MockBookingSource, PaymentOutcome};
pub use intake_service::IntakeService;
pub use reconciliation_service::{PendingSummary, ReconciliationTracker};
