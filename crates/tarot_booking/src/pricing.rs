// --- File: crates/tarot_booking/src/pricing.rs ---
use chrono::NaiveDateTime;

/// Hours between `start` and `end`, or 0 when `end` is not after `start`.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    if end <= start {
        return 0.0;
    }
    (end - start).num_seconds() as f64 / 3600.0
}

/// Session price rounded to cents.
pub fn total_price(start: NaiveDateTime, end: NaiveDateTime, price_per_hour: f64) -> f64 {
    let raw = hours_between(start, end) * price_per_hour;
    (raw * 100.0).round() / 100.0
}

/// Two decimal places, e.g. `45.00`.
pub fn format_price(amount: f64) -> String {
    format!("{:.2}", amount)
}
