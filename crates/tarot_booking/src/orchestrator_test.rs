use std::sync::Arc;

use crate::availability::SlotLoader;
use crate::draft::BookingDraft;
use crate::error::BookingError;
use crate::orchestrator::{BookingFlow, BookingOrchestrator};
use crate::service::mock::{Call, RecordingBackend};
use crate::slots::Slot;
use crate::ui::{MockNavigator, MockNotifier, ToastLevel};
use chrono::{NaiveDate, NaiveDateTime};
use mockall::predicate::*;
use tarot_common::models::TimeWindow;
use tarot_config::models::BookingConfig;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    day().and_hms_opt(h, m, 0).unwrap()
}

fn complete_draft() -> BookingDraft {
    let config = BookingConfig::default();
    let mut draft = BookingDraft::from_config("reader-7", Some("user-1".to_string()), &config);
    draft.set_topics(["t1", "t2"]);
    draft.set_date(day(), day(), &config).unwrap();
    draft.set_duration(60, &config).unwrap();
    draft.select_slot(Slot::new(at(13, 0), at(14, 0)));
    draft.set_note("about work");
    draft
}

fn orchestrator(backend: &Arc<RecordingBackend>, navigator: MockNavigator) -> BookingOrchestrator {
    BookingOrchestrator::new(backend.clone(), backend.clone(), Arc::new(navigator))
}

fn no_navigation() -> MockNavigator {
    let mut navigator = MockNavigator::new();
    navigator.expect_navigate().never();
    navigator
}

#[tokio::test]
async fn test_successful_submission_redirects_to_approval_url() {
    let backend = Arc::new(RecordingBackend::new());
    let mut navigator = MockNavigator::new();
    navigator
        .expect_navigate()
        .withf(|url| url.as_str() == "https://payments.example.com/approve?token=abc")
        .times(1)
        .return_const(());

    let record = orchestrator(&backend, navigator)
        .submit_booking(&complete_draft())
        .await
        .unwrap();
    assert_eq!(record.id, "booking-1");

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    let Call::CreateBooking(request) = &calls[0] else {
        panic!("expected booking creation first, got {:?}", calls[0]);
    };
    assert_eq!(request.user_id, "user-1");
    assert_eq!(request.reader_id, "reader-7");
    assert_eq!(request.time_start, "2025-05-05T13:00:00.000Z");
    assert_eq!(request.time_end, "2025-05-05T14:00:00.000Z");
    assert_eq!(request.topic_ids, vec!["t1", "t2"]);
    assert_eq!(request.note, "about work");
    assert_eq!(calls[1], Call::CreatePayment("booking-1".to_string()));
}

#[tokio::test]
async fn test_missing_user_fails_before_any_call() {
    let backend = Arc::new(RecordingBackend::new());
    let mut draft = complete_draft();
    draft.user_id = None;

    let err = orchestrator(&backend, no_navigation())
        .submit_booking(&draft)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::AuthRequired));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_empty_topics_fail_before_any_call() {
    let backend = Arc::new(RecordingBackend::new());
    let mut draft = complete_draft();
    draft.set_topics(Vec::<String>::new());

    let err = orchestrator(&backend, no_navigation())
        .submit_booking(&draft)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::IncompleteForm { ref missing } if missing == &vec!["topics"]));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_missing_slot_is_incomplete() {
    let backend = Arc::new(RecordingBackend::new());
    let mut draft = complete_draft();
    draft.clear_slot();

    let err = BookingOrchestrator::prepare(&draft).unwrap_err();
    assert!(matches!(err, BookingError::IncompleteForm { ref missing } if missing == &vec!["time slot"]));
    assert!(orchestrator(&backend, no_navigation())
        .submit_booking(&draft)
        .await
        .is_err());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_booking_failure_never_requests_payment() {
    let backend = Arc::new(RecordingBackend {
        booking_status: Some(500),
        ..RecordingBackend::default()
    });

    let err = orchestrator(&backend, no_navigation())
        .submit_booking(&complete_draft())
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::BookingCreationFailed(_)));
    assert!(!backend
        .calls()
        .iter()
        .any(|c| matches!(c, Call::CreatePayment(_))));
}

#[tokio::test]
async fn test_payment_failure_does_not_redirect() {
    let backend = Arc::new(RecordingBackend {
        payment_status: Some(500),
        ..RecordingBackend::default()
    });

    let err = orchestrator(&backend, no_navigation())
        .submit_booking(&complete_draft())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::PaymentInitiationFailed { ref booking_id, .. } if booking_id == "booking-1"
    ));
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
async fn test_invalid_approval_url_is_a_payment_failure() {
    let backend = Arc::new(RecordingBackend {
        approval_url: "not a url".to_string(),
        ..RecordingBackend::default()
    });

    let err = orchestrator(&backend, no_navigation())
        .submit_booking(&complete_draft())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::PaymentInitiationFailed { source: None, .. }
    ));
    assert!(!err.is_token_expired());
}

#[tokio::test]
async fn test_retry_payment_skips_booking_creation() {
    let backend = Arc::new(RecordingBackend::new());
    let mut navigator = MockNavigator::new();
    navigator.expect_navigate().times(1).return_const(());

    orchestrator(&backend, navigator)
        .retry_payment("orphan-9")
        .await
        .unwrap();
    assert_eq!(backend.calls(), vec![Call::CreatePayment("orphan-9".to_string())]);
}

#[tokio::test]
async fn test_resubmission_after_failure_reruns_whole_sequence() {
    let backend = Arc::new(RecordingBackend {
        payment_status: Some(502),
        ..RecordingBackend::default()
    });
    let orchestrator = orchestrator(&backend, no_navigation());
    let draft = complete_draft();

    assert!(orchestrator.submit_booking(&draft).await.is_err());
    assert!(orchestrator.submit_booking(&draft).await.is_err());

    let creations = backend
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::CreateBooking(_)))
        .count();
    assert_eq!(creations, 2, "no de-duplication of bookings");
}

fn flow(backend: &Arc<RecordingBackend>, navigator: MockNavigator, notifier: MockNotifier) -> BookingFlow {
    BookingFlow::new(
        orchestrator(backend, navigator),
        SlotLoader::new(backend.clone()),
        Arc::new(notifier),
    )
}

#[tokio::test]
async fn test_flow_toasts_failures_once() {
    let backend = Arc::new(RecordingBackend {
        booking_status: Some(500),
        ..RecordingBackend::default()
    });
    let mut notifier = MockNotifier::new();
    notifier
        .expect_toast()
        .with(
            eq(ToastLevel::Error),
            eq("Could not complete booking and payment process. Please try again."),
        )
        .times(1)
        .return_const(());

    let draft = complete_draft();
    let before = draft.clone();
    let result = flow(&backend, no_navigation(), notifier).confirm(&draft).await;
    assert!(result.is_err());
    assert_eq!(draft, before, "draft is preserved for resubmission");
}

#[tokio::test]
async fn test_flow_incomplete_form_is_a_warning() {
    let backend = Arc::new(RecordingBackend::new());
    let mut notifier = MockNotifier::new();
    notifier
        .expect_toast()
        .with(eq(ToastLevel::Warning), eq("Please fill in all required fields."))
        .times(1)
        .return_const(());

    let mut draft = complete_draft();
    draft.set_topics(Vec::<String>::new());
    assert!(flow(&backend, no_navigation(), notifier)
        .confirm(&draft)
        .await
        .is_err());
}

#[tokio::test]
async fn test_flow_refresh_slots() {
    let backend = Arc::new(RecordingBackend {
        windows: vec![TimeWindow::new(at(9, 0), at(11, 0))],
        ..RecordingBackend::default()
    });
    let mut notifier = MockNotifier::new();
    notifier.expect_toast().never();

    let slots = flow(&backend, no_navigation(), notifier)
        .refresh_slots(&complete_draft())
        .await;
    let labels: Vec<_> = slots.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["09:00 AM - 10:00 AM", "10:00 AM - 11:00 AM"]);
}

#[tokio::test]
async fn test_flow_refresh_slots_failure_is_empty_with_warning() {
    let backend = Arc::new(RecordingBackend {
        availability_status: Some(500),
        ..RecordingBackend::default()
    });
    let mut notifier = MockNotifier::new();
    notifier
        .expect_toast()
        .with(eq(ToastLevel::Warning), always())
        .times(1)
        .return_const(());

    let slots = flow(&backend, no_navigation(), notifier)
        .refresh_slots(&complete_draft())
        .await;
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_flow_toasts_success_after_redirect() {
    let backend = Arc::new(RecordingBackend::new());
    let mut navigator = MockNavigator::new();
    navigator.expect_navigate().times(1).return_const(());
    let mut notifier = MockNotifier::new();
    notifier
        .expect_toast()
        .with(eq(ToastLevel::Success), always())
        .times(1)
        .return_const(());

    let record = flow(&backend, navigator, notifier)
        .confirm(&complete_draft())
        .await
        .unwrap();
    assert_eq!(record.id, "booking-1");
}

#[tokio::test]
async fn test_flow_retry_payment_toasts_success() {
    let backend = Arc::new(RecordingBackend::new());
    let mut navigator = MockNavigator::new();
    navigator.expect_navigate().times(1).return_const(());
    let mut notifier = MockNotifier::new();
    notifier
        .expect_toast()
        .with(eq(ToastLevel::Success), eq("Redirecting to payment..."))
        .times(1)
        .return_const(());

    flow(&backend, navigator, notifier)
        .retry_payment("orphan-9")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_flow_try_refresh_slots_hands_back_expiry() {
    let backend = Arc::new(RecordingBackend {
        availability_status: Some(401),
        ..RecordingBackend::default()
    });
    let mut notifier = MockNotifier::new();
    notifier
        .expect_toast()
        .with(eq(ToastLevel::Warning), always())
        .times(1)
        .return_const(());

    let err = flow(&backend, no_navigation(), notifier)
        .try_refresh_slots(&complete_draft())
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::AvailabilityFetchFailed(_)));
}

#[tokio::test]
async fn test_payment_token_expiry_is_recognised() {
    let backend = Arc::new(RecordingBackend {
        payment_status: Some(401),
        ..RecordingBackend::default()
    });
    let err = orchestrator(&backend, no_navigation())
        .retry_payment("orphan-9")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::PaymentInitiationFailed { source: Some(_), .. }
    ));
}
