// Property-based tests for clock parsing and countdown calculation
// Random days and instants check the invariants hold everywhere

use chrono::{FixedOffset, TimeZone};
use proptest::prelude::*;

use prayer_widgets::models::prayer::{PrayerName, PrayerTime};
use prayer_widgets::services::countdown::{compute_countdown, format_clock, parse_clock};

/// Five distinct, increasing minutes-of-day mapped onto the prayers in order.
fn day_strategy() -> impl Strategy<Value = Vec<PrayerTime>> {
    prop::collection::btree_set(0u32..1440, 5).prop_map(|minutes| {
        minutes
            .into_iter()
            .zip(PrayerName::ALL)
            .map(|(minute, name)| PrayerTime::new(name, minute / 60, minute % 60))
            .collect()
    })
}

proptest! {
    /// Property: formatting then parsing gives back the same 24-hour time
    #[test]
    fn prop_clock_round_trip(hour in 0u32..24, minute in 0u32..60) {
        prop_assert_eq!(parse_clock(&format_clock(hour, minute)), Ok((hour, minute)));
    }

    /// Property: the remaining time is positive and at most one day
    #[test]
    fn prop_remaining_within_one_day(
        day in day_strategy(),
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
        offset_hours in -11i32..=12,
    ) {
        let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 3, 10, hour, minute, second).unwrap();

        let countdown = compute_countdown(&day, &now).unwrap();

        prop_assert!(countdown.remaining_ms > 0);
        prop_assert!(countdown.remaining_ms <= 24 * 60 * 60 * 1000);
        prop_assert!(countdown.target > now);
    }

    /// Property: the target is the first prayer strictly after now, else Fajr
    #[test]
    fn prop_target_is_first_upcoming_prayer(
        day in day_strategy(),
        hour in 0u32..24,
        minute in 0u32..60,
    ) {
        let tz = FixedOffset::east_opt(0).unwrap();
        let now = tz.with_ymd_and_hms(2026, 3, 10, hour, minute, 0).unwrap();
        let now_minute = hour * 60 + minute;

        let countdown = compute_countdown(&day, &now).unwrap();

        match day.iter().find(|time| time.minute_of_day() > now_minute) {
            Some(upcoming) => {
                prop_assert_eq!(countdown.next, upcoming.name);
                prop_assert!(!countdown.rolled_over);
            }
            None => {
                prop_assert_eq!(countdown.next, PrayerName::Fajr);
                prop_assert!(countdown.rolled_over);
            }
        }
    }

    /// Property: the same instant always gives the same countdown
    #[test]
    fn prop_countdown_is_idempotent(
        day in day_strategy(),
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 3, 10, hour, minute, second).unwrap();

        let first = compute_countdown(&day, &now).unwrap();
        let again = compute_countdown(&day, &now).unwrap();

        prop_assert_eq!(first.text(), again.text());
        prop_assert_eq!(first.remaining_ms, again.remaining_ms);
    }

    /// Property: the displayed countdown never increases as time moves on
    #[test]
    fn prop_countdown_monotonic_within_a_segment(
        day in day_strategy(),
        start in 0u32..86_000,
        step in 1u32..400,
    ) {
        let tz = FixedOffset::east_opt(0).unwrap();
        let midnight = tz.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        let earlier = midnight + chrono::Duration::seconds(start as i64);
        let later = earlier + chrono::Duration::seconds(step as i64);

        let a = compute_countdown(&day, &earlier).unwrap();
        let b = compute_countdown(&day, &later).unwrap();

        if a.target == b.target {
            prop_assert_eq!(a.remaining_ms - b.remaining_ms, step as i64 * 1000);
        }
    }
}
