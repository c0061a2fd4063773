// --- File: crates/tarot_common/src/services.rs ---
//! Service abstractions for the booking REST API.
//!
//! These traits decouple the booking core from the HTTP client so the
//! orchestration can be driven against mocks in tests.

use chrono::NaiveDate;
use std::future::Future;
use std::pin::Pin;

use crate::error::ApiError;
use crate::models::{
    BookingRecord, CreateBookingRequest, PaymentRedirect, ReaderProfile, TimeWindow, Topic,
};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Reader availability lookup.
pub trait AvailabilityService: Send + Sync {
    /// Open windows of `reader_id` on `date`. Usually zero or one.
    fn time_windows(&self, reader_id: &str, date: NaiveDate)
        -> BoxFuture<'_, Vec<TimeWindow>, ApiError>;
}

/// Booking record creation.
pub trait BookingService: Send + Sync {
    /// Submits the booking form. Any non-2xx status is an error.
    fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> BoxFuture<'_, BookingRecord, ApiError>;
}

/// Payment initiation for an existing booking.
pub trait PaymentService: Send + Sync {
    /// Requests the approval URL for `booking_id`.
    fn create_payment(&self, booking_id: &str) -> BoxFuture<'_, PaymentRedirect, ApiError>;
}

/// Read-only lookups that populate the booking form.
pub trait CatalogService: Send + Sync {
    fn topics(&self) -> BoxFuture<'_, Vec<Topic>, ApiError>;

    fn reader(&self, reader_id: &str) -> BoxFuture<'_, ReaderProfile, ApiError>;
}
