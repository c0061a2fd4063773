// --- File: crates/tarot_booking/src/slots.rs ---
//! Partitions a reader's availability window into bookable slots.

use std::iter::FusedIterator;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tarot_common::models::TimeWindow;

use crate::clock::format_range;

/// A candidate session interval.
///
/// `label` is what the user picks from and what is parsed back at
/// submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

impl Slot {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            label: format_range(start.time(), end.time()),
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// `09:00 - 10:00`, the 24-hour rendering of the interval.
    pub fn range_24h(&self) -> String {
        format!("{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Lazily yields consecutive slots of a fixed length inside a window.
#[derive(Debug, Clone)]
pub struct Slots {
    cursor: NaiveDateTime,
    end: NaiveDateTime,
    step: Option<Duration>,
}

impl Iterator for Slots {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        let step = self.step?;
        match self.cursor.checked_add_signed(step) {
            Some(slot_end) if slot_end <= self.end => {
                let slot = Slot::new(self.cursor, slot_end);
                self.cursor = slot_end;
                Some(slot)
            }
            _ => {
                self.step = None;
                None
            }
        }
    }
}

impl FusedIterator for Slots {}

/// Iterator form of [`generate_slots`].
pub fn slots(window: &TimeWindow, duration_minutes: i64) -> Slots {
    let step = (duration_minutes > 0 && window.is_open())
        .then(|| Duration::try_minutes(duration_minutes))
        .flatten();
    Slots {
        cursor: window.start,
        end: window.end,
        step,
    }
}

/// Back-to-back slots of `duration_minutes`, starting at the window start.
///
/// A trailing remainder shorter than the duration is dropped. A
/// non-positive duration or an inverted window gives no slots.
pub fn generate_slots(window: &TimeWindow, duration_minutes: i64) -> Vec<Slot> {
    slots(window, duration_minutes).collect()
}
