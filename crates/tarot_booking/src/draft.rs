// --- File: crates/tarot_booking/src/draft.rs ---
//! The user's in-progress booking selections.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tarot_common::models::{Reader, Topic};
use tarot_config::models::BookingConfig;

use crate::error::BookingError;
use crate::pricing::{format_price, total_price};
use crate::slots::Slot;

/// Form state for one reader. Never persisted.
///
/// Changing the date or duration invalidates the chosen slot, so the
/// stored slot always belongs to the current date and duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub reader_id: String,
    pub user_id: Option<String>,
    topic_ids: BTreeSet<String>,
    date: Option<NaiveDate>,
    duration_minutes: i64,
    slot: Option<Slot>,
    pub note: String,
}

impl BookingDraft {
    pub fn new(reader_id: impl Into<String>, user_id: Option<String>, duration_minutes: i64) -> Self {
        Self {
            reader_id: reader_id.into(),
            user_id,
            topic_ids: BTreeSet::new(),
            date: None,
            duration_minutes,
            slot: None,
            note: String::new(),
        }
    }

    /// Draft using the configured default session length.
    pub fn from_config(
        reader_id: impl Into<String>,
        user_id: Option<String>,
        config: &BookingConfig,
    ) -> Self {
        Self::new(reader_id, user_id, config.default_duration_minutes)
    }

    pub fn topic_ids(&self) -> &BTreeSet<String> {
        &self.topic_ids
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn slot(&self) -> Option<&Slot> {
        self.slot.as_ref()
    }

    /// Adds the topic if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle_topic(&mut self, topic_id: impl Into<String>) -> bool {
        let topic_id = topic_id.into();
        if self.topic_ids.remove(&topic_id) {
            false
        } else {
            self.topic_ids.insert(topic_id);
            true
        }
    }

    pub fn set_topics<I, S>(&mut self, topic_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topic_ids = topic_ids.into_iter().map(Into::into).collect();
    }

    /// Picks a date between `today` and `today + horizon_days`, inclusive.
    pub fn set_date(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
        config: &BookingConfig,
    ) -> Result<(), BookingError> {
        let latest = Duration::try_days(config.horizon_days.max(0))
            .and_then(|horizon| today.checked_add_signed(horizon))
            .unwrap_or(NaiveDate::MAX);
        if date < today || date > latest {
            return Err(BookingError::DateOutOfRange {
                date,
                earliest: today,
                latest,
            });
        }
        if self.date != Some(date) {
            self.slot = None;
        }
        self.date = Some(date);
        Ok(())
    }

    /// Only lengths from the configured menu are accepted.
    pub fn set_duration(
        &mut self,
        minutes: i64,
        config: &BookingConfig,
    ) -> Result<(), BookingError> {
        if !config.durations.contains(&minutes) {
            return Err(BookingError::InvalidDuration(minutes));
        }
        if self.duration_minutes != minutes {
            self.slot = None;
        }
        self.duration_minutes = minutes;
        Ok(())
    }

    pub fn select_slot(&mut self, slot: Slot) {
        self.slot = Some(slot);
    }

    /// Selects the slot whose label matches. Returns false if none does.
    pub fn select_slot_by_label(&mut self, label: &str, offered: &[Slot]) -> bool {
        match offered.iter().find(|s| s.label == label) {
            Some(slot) => {
                self.slot = Some(slot.clone());
                true
            }
            None => false,
        }
    }

    pub fn clear_slot(&mut self) {
        self.slot = None;
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Names of the required selections that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.topic_ids.is_empty() {
            missing.push("topics");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.slot.is_none() {
            missing.push("time slot");
        }
        missing
    }

    /// Price of the selected slot, 0 when none is selected.
    pub fn total_price(&self, price_per_hour: f64) -> f64 {
        self.slot
            .as_ref()
            .map(|slot| total_price(slot.start, slot.end, price_per_hour))
            .unwrap_or(0.0)
    }

    /// Confirmation view of the draft. Unknown topic ids are shown as is.
    pub fn summary(&self, reader: &Reader, topics: &[Topic]) -> BookingSummary {
        let topic_names = self
            .topic_ids
            .iter()
            .map(|id| {
                topics
                    .iter()
                    .find(|t| &t.id == id)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| id.clone())
            })
            .collect();
        BookingSummary {
            reader_name: reader.name.clone(),
            date: self.date,
            time: self.slot.as_ref().map(|s| s.label.clone()),
            duration_minutes: self.duration_minutes,
            topics: topic_names,
            note: self.note.clone(),
            total: format_price(self.total_price(reader.price)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub reader_name: String,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub duration_minutes: i64,
    pub topics: Vec<String>,
    pub note: String,
    pub total: String,
}

impl fmt::Display for BookingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reader:   {}", self.reader_name)?;
        match self.date {
            Some(date) => writeln!(f, "Date:     {}", date.format("%d/%m/%Y"))?,
            None => writeln!(f, "Date:     -")?,
        }
        writeln!(f, "Time:     {}", self.time.as_deref().unwrap_or("-"))?;
        writeln!(f, "Duration: {} minutes", self.duration_minutes)?;
        writeln!(f, "Topics:   {}", self.topics.join(", "))?;
        if !self.note.is_empty() {
            writeln!(f, "Note:     {}", self.note)?;
        }
        write!(f, "Total:    ${}", self.total)
    }
}
