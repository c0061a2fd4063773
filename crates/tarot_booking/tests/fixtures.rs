//! Shared fixtures for the booking API tests.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use reqwest::Url;
use serde_json::{json, Value};
use tarot_booking::{BookingDraft, Navigator, RestBookingClient, Slot};
use tarot_config::models::BookingConfig;

pub const TOKEN: &str = "test-token";

pub fn booking_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
}

pub fn client_for(base_url: &str) -> RestBookingClient {
    RestBookingClient::with_client(reqwest::Client::new(), base_url)
        .with_token(Some(TOKEN.to_string()))
}

/// Availability response with one window from `from` to `to` o'clock.
pub fn window_body(from: u32, to: u32) -> Value {
    json!([{
        "start": format!("2025-05-05T{:02}:00:00", from),
        "end": format!("2025-05-05T{:02}:00:00", to),
    }])
}

/// A draft ready for submission with a 2-4 PM slot.
pub fn complete_draft() -> BookingDraft {
    let config = BookingConfig::default();
    let mut draft = BookingDraft::from_config("reader-7", Some("user-1".to_string()), &config);
    draft.set_topics(["t1", "t2"]);
    draft.set_date(booking_date(), booking_date(), &config).unwrap();
    draft.set_duration(120, &config).unwrap();
    let start = booking_date().and_hms_opt(14, 0, 0).unwrap();
    draft.select_slot(Slot::new(start, start + chrono::Duration::hours(2)));
    draft.set_note("career & love");
    draft
}

/// Records navigations instead of opening a browser.
#[derive(Default)]
pub struct CapturingNavigator {
    pub visited: Mutex<Vec<Url>>,
}

impl CapturingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn visited(&self) -> Vec<Url> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for CapturingNavigator {
    fn navigate(&self, url: &Url) {
        self.visited.lock().unwrap().push(url.clone());
    }
}
