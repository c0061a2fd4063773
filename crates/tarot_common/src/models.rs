// --- File: crates/tarot_common/src/models.rs ---
//! Wire models exchanged with the booking REST API.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A reader's availability for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(deserialize_with = "deserialize_wall_clock")]
    pub start: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_wall_clock")]
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// `start < end`; an inverted or empty window yields no slots.
    pub fn is_open(&self) -> bool {
        self.start < self.end
    }
}

/// Parses a timestamp as the wall-clock reading it was written with.
///
/// Accepts naive ISO-8601 (`2025-05-05T09:00:00`, optional fraction or
/// missing seconds) and RFC 3339 with an offset, whose offset is dropped.
pub fn parse_wall_clock(value: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn deserialize_wall_clock<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_wall_clock(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

/// Booking as stored by the server. Only `id` is guaranteed in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub reader_id: Option<String>,
    #[serde(default)]
    pub time_start: Option<String>,
    #[serde(default)]
    pub time_end: Option<String>,
    #[serde(default, alias = "listTopicId")]
    pub topic_ids: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Hosted payment page the browser is sent to. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRedirect {
    pub approval_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reader {
    pub id: String,
    pub name: String,
    /// Price per hour of session.
    pub price: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response of the reader detail endpoint: the reader plus image urls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderProfile {
    pub reader: Reader,
    #[serde(default, rename = "url")]
    pub image_urls: Vec<String>,
}

impl ReaderProfile {
    pub fn avatar_url(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

/// Body of the booking-creation form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookingRequest {
    pub user_id: String,
    pub reader_id: String,
    pub time_start: String,
    pub time_end: String,
    pub topic_ids: Vec<String>,
    pub note: String,
}

impl CreateBookingRequest {
    /// Form fields in submission order; `ListTopicId` repeats once per topic.
    pub fn form_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("UserId", self.user_id.as_str()),
            ("ReaderId", self.reader_id.as_str()),
            ("TimeStart", self.time_start.as_str()),
            ("TimeEnd", self.time_end.as_str()),
        ];
        pairs.extend(self.topic_ids.iter().map(|id| ("ListTopicId", id.as_str())));
        pairs.push(("Note", self.note.as_str()));
        pairs
    }
}
