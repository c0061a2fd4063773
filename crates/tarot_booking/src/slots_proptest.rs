use crate::clock::resolve_range;
use crate::slots::generate_slots;
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use tarot_common::models::TimeWindow;

proptest! {
    #[test]
    fn slots_tile_the_window_prefix(
        start_minute in 0i64..(24 * 60),
        length in 0i64..(12 * 60),
        duration in prop::sample::select(vec![30i64, 60, 90, 120, 150]),
    ) {
        let day = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let start = day + Duration::minutes(start_minute);
        let end = start + Duration::minutes(length);
        let slots = generate_slots(&TimeWindow::new(start, end), duration);

        prop_assert_eq!(slots.len() as i64, length / duration);
        let mut cursor = start;
        for slot in &slots {
            prop_assert_eq!(slot.start, cursor);
            prop_assert_eq!(slot.duration(), Duration::minutes(duration));
            prop_assert!(slot.end <= end);
            cursor = slot.end;
        }
        prop_assert!(end - cursor < Duration::minutes(duration));
    }

    #[test]
    fn labels_resolve_back_to_the_slot(
        start_minute in 0i64..(24 * 60),
        duration in prop::sample::select(vec![30i64, 60, 90, 120, 150]),
    ) {
        let date = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        let start = date.and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(start_minute);
        let window = TimeWindow::new(start, start + Duration::minutes(duration));
        let slots = generate_slots(&window, duration);
        prop_assert_eq!(slots.len(), 1);

        let (resolved_start, resolved_end) = resolve_range(date, &slots[0].label).unwrap();
        prop_assert_eq!(resolved_start, slots[0].start);
        prop_assert_eq!(resolved_end, slots[0].end);
    }
}
