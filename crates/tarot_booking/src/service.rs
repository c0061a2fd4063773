// --- File: crates/tarot_booking/src/service.rs ---
//! reqwest implementation of the booking API service traits.

use chrono::NaiveDate;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tarot_common::error::ApiError;
use tarot_common::http::{decode_json, success_body, with_bearer};
use tarot_common::models::{
    BookingRecord, CreateBookingRequest, PaymentRedirect, ReaderProfile, TimeWindow, Topic,
};
use tarot_common::services::{
    AvailabilityService, BookingService, BoxFuture, CatalogService, PaymentService,
};
use tarot_common::{create_client, HTTP_CLIENT};
use tarot_config::models::ApiConfig;
use tracing::{debug, warn};

pub const AVAILABILITY_PATH: &str = "/api/BookingWeb/available-time-slots";
pub const CREATE_BOOKING_PATH: &str = "/api/BookingWeb/create-booking";
pub const CREATE_PAYMENT_PATH: &str = "/api/Payment/create-payment";
pub const TOPICS_PATH: &str = "/api/TopicWeb/topics-list";
pub const READER_PATH: &str = "/api/ReaderWeb/reader-with-images";

/// Booking API client. Carries the session token, if any, as a bearer header.
#[derive(Clone)]
pub struct RestBookingClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestBookingClient {
    pub fn new(config: &ApiConfig) -> Self {
        let client = create_client(config.timeout_secs, true).unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to shared HTTP client");
            HTTP_CLIENT.clone()
        });
        Self::with_client(client, &config.base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let request = self
            .client
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json");
        let response = with_bearer(request, self.token.as_deref()).send().await?;
        let body = success_body(response).await?;
        decode_json(&body)
    }
}

impl AvailabilityService for RestBookingClient {
    fn time_windows(
        &self,
        reader_id: &str,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<TimeWindow>, ApiError> {
        let reader_id = reader_id.to_string();
        Box::pin(async move {
            let date = date.format("%Y-%m-%d").to_string();
            self.get_json(
                self.url(AVAILABILITY_PATH),
                &[("readerId", reader_id.as_str()), ("date", date.as_str())],
            )
            .await
        })
    }
}

impl BookingService for RestBookingClient {
    fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> BoxFuture<'_, BookingRecord, ApiError> {
        Box::pin(async move {
            let body = serde_urlencoded::to_string(request.form_pairs())
                .map_err(|e| ApiError::Encoding(e.to_string()))?;
            let url = self.url(CREATE_BOOKING_PATH);
            debug!(%url, "POST booking form");

            let builder = self
                .client
                .post(&url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(ACCEPT, "application/json")
                .body(body);
            let response = with_bearer(builder, self.token.as_deref()).send().await?;
            let body = success_body(response).await?;
            decode_json(&body)
        })
    }
}

impl PaymentService for RestBookingClient {
    fn create_payment(&self, booking_id: &str) -> BoxFuture<'_, PaymentRedirect, ApiError> {
        let booking_id = booking_id.to_string();
        Box::pin(async move {
            self.get_json(
                self.url(CREATE_PAYMENT_PATH),
                &[("bookingId", booking_id.as_str())],
            )
            .await
        })
    }
}

impl CatalogService for RestBookingClient {
    fn topics(&self) -> BoxFuture<'_, Vec<Topic>, ApiError> {
        Box::pin(async move { self.get_json(self.url(TOPICS_PATH), &[]).await })
    }

    fn reader(&self, reader_id: &str) -> BoxFuture<'_, ReaderProfile, ApiError> {
        let url = format!("{}/{}", self.url(READER_PATH), reader_id);
        Box::pin(async move { self.get_json(url, &[]).await })
    }
}

/// In-memory backend that records every call, for driving the booking
/// flow without a server.
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        TimeWindows { reader_id: String, date: NaiveDate },
        CreateBooking(CreateBookingRequest),
        CreatePayment(String),
        Topics,
        Reader(String),
    }

    /// Every endpoint succeeds unless a failure status is set for it.
    #[derive(Debug)]
    pub struct RecordingBackend {
        pub windows: Vec<TimeWindow>,
        pub booking_id: String,
        pub approval_url: String,
        pub topics: Vec<Topic>,
        pub reader: Option<ReaderProfile>,
        pub availability_status: Option<u16>,
        pub booking_status: Option<u16>,
        pub payment_status: Option<u16>,
        pub(crate) calls: Mutex<Vec<Call>>,
    }

    impl Default for RecordingBackend {
        fn default() -> Self {
            Self {
                windows: Vec::new(),
                booking_id: "booking-1".to_string(),
                approval_url: "https://payments.example.com/approve?token=abc".to_string(),
                topics: Vec::new(),
                reader: None,
                availability_status: None,
                booking_status: None,
                payment_status: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl RecordingBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        fn record(&self, call: Call) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
        }

        fn fail(status: Option<u16>) -> Result<(), ApiError> {
            match status {
                Some(status) => Err(ApiError::from_status(status, "")),
                None => Ok(()),
            }
        }
    }

    impl AvailabilityService for RecordingBackend {
        fn time_windows(
            &self,
            reader_id: &str,
            date: NaiveDate,
        ) -> BoxFuture<'_, Vec<TimeWindow>, ApiError> {
            self.record(Call::TimeWindows {
                reader_id: reader_id.to_string(),
                date,
            });
            let result = Self::fail(self.availability_status).map(|_| self.windows.clone());
            Box::pin(async move { result })
        }
    }

    impl BookingService for RecordingBackend {
        fn create_booking(
            &self,
            request: CreateBookingRequest,
        ) -> BoxFuture<'_, BookingRecord, ApiError> {
            let result = Self::fail(self.booking_status).map(|_| BookingRecord {
                id: self.booking_id.clone(),
                user_id: Some(request.user_id.clone()),
                reader_id: Some(request.reader_id.clone()),
                time_start: Some(request.time_start.clone()),
                time_end: Some(request.time_end.clone()),
                topic_ids: request.topic_ids.clone(),
                note: Some(request.note.clone()),
            });
            self.record(Call::CreateBooking(request));
            Box::pin(async move { result })
        }
    }

    impl PaymentService for RecordingBackend {
        fn create_payment(&self, booking_id: &str) -> BoxFuture<'_, PaymentRedirect, ApiError> {
            self.record(Call::CreatePayment(booking_id.to_string()));
            let result = Self::fail(self.payment_status).map(|_| PaymentRedirect {
                approval_url: self.approval_url.clone(),
            });
            Box::pin(async move { result })
        }
    }

    impl CatalogService for RecordingBackend {
        fn topics(&self) -> BoxFuture<'_, Vec<Topic>, ApiError> {
            self.record(Call::Topics);
            let topics = self.topics.clone();
            Box::pin(async move { Ok(topics) })
        }

        fn reader(&self, reader_id: &str) -> BoxFuture<'_, ReaderProfile, ApiError> {
            self.record(Call::Reader(reader_id.to_string()));
            let result = self
                .reader
                .clone()
                .ok_or_else(|| ApiError::from_status(404, ""));
            Box::pin(async move { result })
        }
    }
}
