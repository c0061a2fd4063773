// --- File: crates/tarot_booking/src/orchestrator.rs ---
//! Turns a completed draft into a booking and hands the user off to payment.
//!
//! The sequence is strictly ordered and each step only runs when the
//! previous one succeeded:
//! 1. re-derive the 24-hour interval from the selected slot label
//! 2. create the booking record
//! 3. request the payment approval URL for that booking
//! 4. navigate to the approval URL
//!
//! Nothing is retried. A failure in step 3 leaves an unpaid booking on the
//! server; [`BookingOrchestrator::retry_payment`] restarts from step 3 for it.

use std::sync::Arc;

use reqwest::Url;
use tarot_common::models::{BookingRecord, CreateBookingRequest};
use tarot_common::services::{BookingService, PaymentService};
use tracing::{error, info, instrument, warn};

use crate::availability::SlotLoader;
use crate::clock::{resolve_range, submission_timestamp};
use crate::draft::BookingDraft;
use crate::error::BookingError;
use crate::slots::Slot;
use crate::ui::{Navigator, Notifier, ToastLevel};

pub struct BookingOrchestrator {
    bookings: Arc<dyn BookingService>,
    payments: Arc<dyn PaymentService>,
    navigator: Arc<dyn Navigator>,
}

impl BookingOrchestrator {
    pub fn new(
        bookings: Arc<dyn BookingService>,
        payments: Arc<dyn PaymentService>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            bookings,
            payments,
            navigator,
        }
    }

    /// Checks preconditions and builds the form submission. No I/O.
    pub fn prepare(draft: &BookingDraft) -> Result<CreateBookingRequest, BookingError> {
        let user_id = draft
            .user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(BookingError::AuthRequired)?;

        let missing = draft.missing_fields();
        let (Some(date), Some(slot)) = (draft.date(), draft.slot()) else {
            return Err(BookingError::IncompleteForm { missing });
        };
        if !missing.is_empty() {
            return Err(BookingError::IncompleteForm { missing });
        }

        let (start, end) = resolve_range(date, &slot.label).map_err(|e| {
            warn!(label = %slot.label, error = %e, "Selected slot label could not be parsed");
            BookingError::IncompleteForm {
                missing: vec!["time slot"],
            }
        })?;

        Ok(CreateBookingRequest {
            user_id: user_id.to_string(),
            reader_id: draft.reader_id.clone(),
            time_start: submission_timestamp(start),
            time_end: submission_timestamp(end),
            topic_ids: draft.topic_ids().iter().cloned().collect(),
            note: draft.note.clone(),
        })
    }

    /// Creates the booking, requests payment and navigates to the approval page.
    ///
    /// Returns the created record once the navigation has been issued.
    #[instrument(skip(self, draft), fields(reader_id = %draft.reader_id))]
    pub async fn submit_booking(&self, draft: &BookingDraft) -> Result<BookingRecord, BookingError> {
        let request = Self::prepare(draft)?;
        info!(
            time_start = %request.time_start,
            time_end = %request.time_end,
            topics = request.topic_ids.len(),
            "Submitting booking"
        );

        let booking = self
            .bookings
            .create_booking(request)
            .await
            .map_err(BookingError::BookingCreationFailed)?;
        info!(booking_id = %booking.id, "Booking created");

        self.pay(&booking.id).await?;
        Ok(booking)
    }

    /// Restarts the handoff at the payment step for an existing booking.
    #[instrument(skip(self))]
    pub async fn retry_payment(&self, booking_id: &str) -> Result<(), BookingError> {
        self.pay(booking_id).await
    }

    async fn pay(&self, booking_id: &str) -> Result<(), BookingError> {
        let redirect = self
            .payments
            .create_payment(booking_id)
            .await
            .map_err(|e| BookingError::PaymentInitiationFailed {
                booking_id: booking_id.to_string(),
                reason: e.to_string(),
                source: Some(e),
            })?;
        let url = Url::parse(&redirect.approval_url).map_err(|e| {
            BookingError::PaymentInitiationFailed {
                booking_id: booking_id.to_string(),
                reason: format!("invalid approval url: {}", e),
                source: None,
            }
        })?;

        info!(booking_id, host = url.host_str().unwrap_or(""), "Redirecting to payment approval");
        self.navigator.navigate(&url);
        Ok(())
    }
}

/// The orchestrator as the booking form drives it: failures are logged and
/// turned into one toast each, and the draft is left untouched.
pub struct BookingFlow {
    orchestrator: BookingOrchestrator,
    slots: SlotLoader,
    notifier: Arc<dyn Notifier>,
}

impl BookingFlow {
    pub fn new(
        orchestrator: BookingOrchestrator,
        slots: SlotLoader,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            orchestrator,
            slots,
            notifier,
        }
    }

    /// Slots for the draft's date and duration; empty if no date or on failure.
    pub async fn refresh_slots(&self, draft: &BookingDraft) -> Vec<Slot> {
        self.try_refresh_slots(draft).await.unwrap_or_default()
    }

    /// Like [`refresh_slots`](Self::refresh_slots) but hands the reported
    /// failure back, so the caller can react to an expired session.
    pub async fn try_refresh_slots(&self, draft: &BookingDraft) -> Result<Vec<Slot>, BookingError> {
        let Some(date) = draft.date() else {
            return Ok(Vec::new());
        };
        self.slots
            .load_slots(&draft.reader_id, date, draft.duration_minutes())
            .await
            .inspect_err(|e| self.report(e))
    }

    pub async fn confirm(&self, draft: &BookingDraft) -> Result<BookingRecord, BookingError> {
        let record = self
            .orchestrator
            .submit_booking(draft)
            .await
            .inspect_err(|e| self.report(e))?;
        self.notifier
            .toast(ToastLevel::Success, "Booking created. Redirecting to payment...");
        Ok(record)
    }

    pub async fn retry_payment(&self, booking_id: &str) -> Result<(), BookingError> {
        self.orchestrator
            .retry_payment(booking_id)
            .await
            .inspect_err(|e| self.report(e))?;
        self.notifier
            .toast(ToastLevel::Success, "Redirecting to payment...");
        Ok(())
    }

    fn report(&self, err: &BookingError) {
        error!(error = %err, "Booking interaction failed");
        self.notifier.toast(err.toast_level(), &err.user_message());
    }
}
