// --- File: crates/tarot_booking/src/error.rs ---
use chrono::NaiveDate;
use tarot_common::{external_service_error, ApiError, TarotError, TOKEN_EXPIRED_MESSAGE};
use thiserror::Error;

use crate::ui::ToastLevel;

/// Why a booking interaction did not go through.
///
/// None of these are fatal; each ends one attempt and becomes one toast.
#[derive(Error, Debug)]
pub enum BookingError {
    /// No authenticated user; nothing was sent.
    #[error("No authenticated user")]
    AuthRequired,

    /// Required selections are missing or unusable; nothing was sent.
    #[error("Booking form incomplete, missing: {}", .missing.join(", "))]
    IncompleteForm { missing: Vec<&'static str> },

    /// The booking endpoint refused the submission. No booking exists.
    #[error("Booking creation failed: {0}")]
    BookingCreationFailed(#[source] ApiError),

    /// The booking exists server-side but no approval URL was obtained.
    /// `source` is absent when the endpoint answered with an unusable URL.
    #[error("Payment initiation failed for booking {booking_id}: {reason}")]
    PaymentInitiationFailed {
        booking_id: String,
        reason: String,
        #[source]
        source: Option<ApiError>,
    },

    /// The reader's window for the date could not be fetched.
    #[error("Availability fetch failed: {0}")]
    AvailabilityFetchFailed(#[source] ApiError),

    #[error("Date {date} is outside {earliest} ..= {latest}")]
    DateOutOfRange {
        date: NaiveDate,
        earliest: NaiveDate,
        latest: NaiveDate,
    },

    #[error("Session length of {0} minutes is not offered")]
    InvalidDuration(i64),
}

impl BookingError {
    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            BookingError::AuthRequired => "User ID is required. Please log in.".to_string(),
            BookingError::IncompleteForm { .. } => {
                "Please fill in all required fields.".to_string()
            }
            BookingError::BookingCreationFailed(_)
            | BookingError::PaymentInitiationFailed { .. } => {
                "Could not complete booking and payment process. Please try again.".to_string()
            }
            BookingError::AvailabilityFetchFailed(_) => {
                "Could not fetch available time slots. Please try again.".to_string()
            }
            BookingError::DateOutOfRange {
                earliest, latest, ..
            } => format!("Please pick a date between {} and {}.", earliest, latest),
            BookingError::InvalidDuration(_) => {
                "Please choose one of the offered session lengths.".to_string()
            }
        }
    }

    pub fn toast_level(&self) -> ToastLevel {
        match self {
            BookingError::IncompleteForm { .. }
            | BookingError::DateOutOfRange { .. }
            | BookingError::InvalidDuration(_)
            | BookingError::AvailabilityFetchFailed(_) => ToastLevel::Warning,
            BookingError::AuthRequired
            | BookingError::BookingCreationFailed(_)
            | BookingError::PaymentInitiationFailed { .. } => ToastLevel::Error,
        }
    }

    /// True when the API rejected the session token as expired.
    pub fn is_token_expired(&self) -> bool {
        matches!(
            self,
            BookingError::BookingCreationFailed(ApiError::TokenExpired)
                | BookingError::AvailabilityFetchFailed(ApiError::TokenExpired)
                | BookingError::PaymentInitiationFailed {
                    source: Some(ApiError::TokenExpired),
                    ..
                }
        )
    }
}

/// Convert BookingError to TarotError
impl From<BookingError> for TarotError {
    fn from(err: BookingError) -> Self {
        if err.is_token_expired() {
            return TarotError::AuthError(TOKEN_EXPIRED_MESSAGE.to_string());
        }
        match err {
            BookingError::AuthRequired => TarotError::AuthError(err.to_string()),
            BookingError::IncompleteForm { .. }
            | BookingError::DateOutOfRange { .. }
            | BookingError::InvalidDuration(_) => TarotError::ValidationError(err.to_string()),
            BookingError::BookingCreationFailed(e) => {
                external_service_error("Booking endpoint", e)
            }
            BookingError::PaymentInitiationFailed {
                booking_id, reason, ..
            } => external_service_error(
                "Payment endpoint",
                format!("booking {}: {}", booking_id, reason),
            ),
            BookingError::AvailabilityFetchFailed(e) => {
                external_service_error("Availability endpoint", e)
            }
        }
    }
}
