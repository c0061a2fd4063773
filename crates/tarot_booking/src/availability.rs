// --- File: crates/tarot_booking/src/availability.rs ---
use std::sync::Arc;

use chrono::NaiveDate;
use tarot_common::services::AvailabilityService;
use tracing::{debug, instrument};

use crate::error::BookingError;
use crate::slots::{generate_slots, Slot};

/// Fetches a reader's window for a date and slices it into slots.
#[derive(Clone)]
pub struct SlotLoader {
    availability: Arc<dyn AvailabilityService>,
}

impl SlotLoader {
    pub fn new(availability: Arc<dyn AvailabilityService>) -> Self {
        Self { availability }
    }

    /// Slots for `reader_id` on `date`. Only the first returned window is used.
    #[instrument(skip(self))]
    pub async fn load_slots(
        &self,
        reader_id: &str,
        date: NaiveDate,
        duration_minutes: i64,
    ) -> Result<Vec<Slot>, BookingError> {
        let windows = self
            .availability
            .time_windows(reader_id, date)
            .await
            .map_err(BookingError::AvailabilityFetchFailed)?;

        if windows.len() > 1 {
            debug!(
                count = windows.len(),
                "Multiple availability windows returned, using the first"
            );
        }
        let Some(window) = windows.first() else {
            debug!("Reader has no availability on this date");
            return Ok(Vec::new());
        };

        let slots = generate_slots(window, duration_minutes);
        debug!(count = slots.len(), "Generated slots");
        Ok(slots)
    }
}
