// Unit tests for countdown text across the fixture day
// Table-driven with test_case, one row per interesting instant

use test_case::test_case;

use prayer_widgets::models::prayer::PrayerName;
use prayer_widgets::services::countdown::{compute_countdown, parse_clock, parse_times};

use crate::fixtures::{clock, times};

#[test_case(0, 0, 0, "05:23:00 until Fajr" ; "midnight")]
#[test_case(4, 0, 0, "01:23:00 until Fajr" ; "before fajr")]
#[test_case(5, 23, 0, "08:10:00 until Dhuhr" ; "exactly at fajr moves on")]
#[test_case(5, 22, 59, "00:00:01 until Fajr" ; "one second before fajr")]
#[test_case(13, 0, 0, "00:33:00 until Dhuhr" ; "just before dhuhr")]
#[test_case(18, 0, 0, "02:13:00 until Maghrib" ; "after asr")]
#[test_case(21, 31, 30, "00:00:30 until Isha" ; "half a minute to isha")]
#[test_case(22, 0, 0, "07:23:00 until Fajr" ; "after isha rolls over")]
#[test_case(23, 59, 59, "05:23:01 until Fajr" ; "last second of the day")]
fn test_countdown_text(hour: u32, minute: u32, second: u32, expected: &str) {
    let countdown = compute_countdown(&times::sample_day(), &clock::at(hour, minute, second)).unwrap();
    assert_eq!(countdown.text(), expected);
}

#[test_case("5:23 AM", 5, 23 ; "morning")]
#[test_case("12:00 AM", 0, 0 ; "midnight")]
#[test_case("12:15 PM", 12, 15 ; "noon hour")]
#[test_case("9:32 pm", 21, 32 ; "lowercase marker")]
#[test_case(" 1:33 PM ", 13, 33 ; "surrounding whitespace")]
fn test_parse_clock_accepts(text: &str, hour: u32, minute: u32) {
    assert_eq!(parse_clock(text), Ok((hour, minute)));
}

#[test_case("" ; "empty")]
#[test_case("5:23" ; "no marker")]
#[test_case("523 AM" ; "no colon")]
#[test_case("13:00 PM" ; "hour above twelve")]
#[test_case("0:30 AM" ; "hour zero")]
#[test_case("5:60 AM" ; "minute sixty")]
#[test_case("5:2 AM" ; "one digit minute")]
#[test_case("5:23 XM" ; "unknown marker")]
#[test_case("five:23 AM" ; "word hour")]
fn test_parse_clock_rejects(text: &str) {
    assert!(parse_clock(text).is_err());
}

#[test]
fn test_one_bad_field_keeps_the_rest() {
    let mut strings = times::sample_strings();
    strings[2].1 = "garbage";

    let parsed = parse_times(strings);

    assert_eq!(parsed.times.len(), 4);
    assert_eq!(parsed.failures.len(), 1);
    assert_eq!(parsed.failures[0].0, PrayerName::Asr);
    assert!(!parsed.is_valid(PrayerName::Asr));

    // Asr is skipped: after Dhuhr the next target is Maghrib.
    let countdown = compute_countdown(&parsed.times, &clock::at(14, 0, 0)).unwrap();
    assert_eq!(countdown.next, PrayerName::Maghrib);
}
