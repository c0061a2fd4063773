use crate::models::{
    parse_wall_clock, BookingRecord, CreateBookingRequest, PaymentRedirect, ReaderProfile,
    TimeWindow,
};
use chrono::NaiveDate;

fn at(h: u32, m: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 5)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

#[test]
fn test_window_accepts_naive_and_offset_timestamps() {
    let windows: Vec<TimeWindow> = serde_json::from_str(
        r#"[
            {"start": "2025-05-05T09:00:00", "end": "2025-05-05T17:00:00"},
            {"start": "2025-05-05T09:00:00+07:00", "end": "2025-05-05T12:30:00.000Z"}
        ]"#,
    )
    .unwrap();
    assert_eq!(windows[0], TimeWindow::new(at(9, 0), at(17, 0)));
    // Offsets are dropped; the wall-clock reading is kept.
    assert_eq!(windows[1], TimeWindow::new(at(9, 0), at(12, 30)));
}

#[test]
fn test_window_rejects_garbage() {
    let parsed: Result<TimeWindow, _> =
        serde_json::from_str(r#"{"start": "tomorrow", "end": "2025-05-05T17:00:00"}"#);
    assert!(parsed.is_err());
    assert_eq!(parse_wall_clock("2025-05-05T09:15"), Some(at(9, 15)));
}

#[test]
fn test_inverted_window_is_not_open() {
    assert!(TimeWindow::new(at(9, 0), at(10, 0)).is_open());
    assert!(!TimeWindow::new(at(10, 0), at(10, 0)).is_open());
    assert!(!TimeWindow::new(at(11, 0), at(10, 0)).is_open());
}

#[test]
fn test_booking_record_needs_only_id() {
    let record: BookingRecord =
        serde_json::from_str(r#"{"id": "b-1", "readerId": "r-9", "total": null}"#).unwrap();
    assert_eq!(record.id, "b-1");
    assert_eq!(record.reader_id.as_deref(), Some("r-9"));
    assert!(record.topic_ids.is_empty());
}

#[test]
fn test_payment_redirect_is_camel_case() {
    let redirect: PaymentRedirect =
        serde_json::from_str(r#"{"approvalUrl": "https://pay.example/approve?token=1"}"#)
            .unwrap();
    assert_eq!(redirect.approval_url, "https://pay.example/approve?token=1");
}

#[test]
fn test_reader_profile_avatar_is_first_url() {
    let profile: ReaderProfile = serde_json::from_str(
        r#"{"reader": {"id": "r-1", "name": "Luna", "price": 20.0, "rating": 4.5},
            "url": ["https://img/1.png", "https://img/2.png"]}"#,
    )
    .unwrap();
    assert_eq!(profile.avatar_url(), Some("https://img/1.png"));
    assert_eq!(profile.reader.price, 20.0);
}

#[test]
fn test_form_pairs_repeat_topic_ids() {
    let request = CreateBookingRequest {
        user_id: "u-1".to_string(),
        reader_id: "r-1".to_string(),
        time_start: "2025-05-05T09:00:00.000Z".to_string(),
        time_end: "2025-05-05T10:00:00.000Z".to_string(),
        topic_ids: vec!["love".to_string(), "career".to_string()],
        note: String::new(),
    };
    let keys: Vec<&str> = request.form_pairs().iter().map(|(k, _)| *k).collect();
    assert_eq!(
        keys,
        vec![
            "UserId",
            "ReaderId",
            "TimeStart",
            "TimeEnd",
            "ListTopicId",
            "ListTopicId",
            "Note"
        ]
    );
}
