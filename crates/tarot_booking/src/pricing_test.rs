use crate::pricing::*;
use chrono::{NaiveDate, NaiveDateTime};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 5)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

#[test]
fn test_price_for_ninety_minutes() {
    assert_eq!(total_price(at(9, 0), at(10, 30), 30.0), 45.0);
    assert_eq!(format_price(total_price(at(9, 0), at(10, 30), 30.0)), "45.00");
}

#[test]
fn test_price_rounds_to_cents() {
    // 20 minutes at 10/h is 3.333...
    assert_eq!(format_price(total_price(at(9, 0), at(9, 20), 10.0)), "3.33");
    // 45 minutes at 10.50/h is 7.875
    assert_eq!(total_price(at(9, 0), at(9, 45), 10.5), 7.88);
}

#[test]
fn test_non_positive_interval_is_free() {
    assert_eq!(hours_between(at(10, 0), at(10, 0)), 0.0);
    assert_eq!(total_price(at(11, 0), at(10, 0), 50.0), 0.0);
    assert_eq!(format_price(0.0), "0.00");
}
