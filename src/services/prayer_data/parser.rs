//! Day records: `{"times": {"fajr": {"adhan": "5:23 AM"}, ...}}`.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone};
use serde::Deserialize;
use serde_json::Value;

use super::error::StoreError;
use crate::models::prayer::{PrayerName, PrayerSnapshot, MISSING_TIME};
use crate::services::countdown::{compute_countdown, display_time, parse_times};

#[derive(Debug, Clone, Deserialize)]
struct DayRecord {
    times: DayTimes,
}

/// The five prayer entries of one day. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DayTimes {
    fajr: TimeEntry,
    dhuhr: TimeEntry,
    asr: TimeEntry,
    maghrib: TimeEntry,
    isha: TimeEntry,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct TimeEntry {
    adhan: String,
}

impl DayTimes {
    /// Raw clock string of one prayer.
    pub fn adhan(&self, name: PrayerName) -> &str {
        let entry = match name {
            PrayerName::Fajr => &self.fajr,
            PrayerName::Dhuhr => &self.dhuhr,
            PrayerName::Asr => &self.asr,
            PrayerName::Maghrib => &self.maghrib,
            PrayerName::Isha => &self.isha,
        };
        &entry.adhan
    }
}

pub fn parse_day_record(json: &str) -> Result<DayTimes, serde_json::Error> {
    serde_json::from_str::<DayRecord>(json).map(|record| record.times)
}

/// Looks `date_key` up in a bulk document without decoding the other days.
pub fn find_in_bulk(document: &str, date_key: &str) -> Result<Option<DayTimes>, serde_json::Error> {
    let days: HashMap<String, Value> = serde_json::from_str(document)?;
    days.get(date_key)
        .map(|value| DayRecord::deserialize(value).map(|record| record.times))
        .transpose()
}

/// Builds the display snapshot for one day at `now`.
///
/// A field whose clock string is malformed shows `--:--` and is left out of
/// the countdown; only a day with no readable field at all is an error.
pub fn build_snapshot<Tz: TimeZone>(
    times: &DayTimes,
    now: &DateTime<Tz>,
    date_key: &str,
) -> Result<PrayerSnapshot, StoreError> {
    let parsed = parse_times(PrayerName::ALL.map(|name| (name, times.adhan(name))));
    for (name, err) in &parsed.failures {
        log::warn!("Skipping {} on {}: {}", name, date_key, err);
    }

    let countdown = compute_countdown(&parsed.times, now).ok_or_else(|| StoreError::NoUsableTimes {
        date_key: date_key.to_string(),
    })?;

    let display = |name: PrayerName| {
        if parsed.is_valid(name) {
            display_time(times.adhan(name))
        } else {
            MISSING_TIME.to_string()
        }
    };

    log::debug!(
        "Parsed prayer times for {} - next {} in {}",
        date_key,
        countdown.next,
        countdown.text()
    );

    Ok(PrayerSnapshot {
        fajr: display(PrayerName::Fajr),
        dhuhr: display(PrayerName::Dhuhr),
        asr: display(PrayerName::Asr),
        maghrib: display(PrayerName::Maghrib),
        isha: display(PrayerName::Isha),
        countdown_text: countdown.text(),
        next_prayer_name: countdown.next_name().to_string(),
        next_prayer_time: display(countdown.next),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    fn record(fajr: &str) -> String {
        serde_json::json!({
            "date": "2026-06-14",
            "times": {
                "fajr": {"adhan": fajr, "iqama": "5:45 AM"},
                "dhuhr": {"adhan": "1:33 PM"},
                "asr": {"adhan": "5:16 PM"},
                "maghrib": {"adhan": "8:13 PM"},
                "isha": {"adhan": "9:32 PM"}
            }
        })
        .to_string()
    }

    fn now(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 6, 14, hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn parses_record_ignoring_extra_fields() {
        let times = parse_day_record(&record("5:23 AM")).unwrap();
        assert_eq!(times.adhan(PrayerName::Fajr), "5:23 AM");
        assert_eq!(times.adhan(PrayerName::Isha), "9:32 PM");
    }

    #[test]
    fn missing_prayer_is_a_parse_error() {
        let json = r#"{"times":{"fajr":{"adhan":"5:23 AM"}}}"#;
        assert!(parse_day_record(json).is_err());
    }

    #[test]
    fn bulk_lookup_finds_matching_day() {
        let bulk = format!(r#"{{"2026-06-13": {{"broken": true}}, "2026-06-14": {}}}"#, record("5:20 AM"));

        let times = find_in_bulk(&bulk, "2026-06-14").unwrap().unwrap();
        assert_eq!(times.adhan(PrayerName::Fajr), "5:20 AM");
        assert!(find_in_bulk(&bulk, "2026-06-15").unwrap().is_none());
        assert!(find_in_bulk(&bulk, "2026-06-13").is_err());
    }

    #[test]
    fn snapshot_carries_times_and_countdown() {
        let times = parse_day_record(&record("5:23 AM")).unwrap();
        let snapshot = build_snapshot(&times, &now(4, 0), "2026-06-14").unwrap();

        assert_eq!(
            snapshot,
            PrayerSnapshot {
                fajr: "5:23 AM".into(),
                dhuhr: "1:33 PM".into(),
                asr: "5:16 PM".into(),
                maghrib: "8:13 PM".into(),
                isha: "9:32 PM".into(),
                countdown_text: "01:23:00 until Fajr".into(),
                next_prayer_name: "Fajr".into(),
                next_prayer_time: "5:23 AM".into(),
            }
        );
    }

    #[test]
    fn malformed_field_only_blanks_that_field() {
        let times = parse_day_record(&record("5:23AM")).unwrap();
        let snapshot = build_snapshot(&times, &now(4, 0), "2026-06-14").unwrap();

        assert_eq!(snapshot.fajr, MISSING_TIME);
        assert_eq!(snapshot.dhuhr, "1:33 PM");
        assert_eq!(snapshot.isha, "9:32 PM");
        assert_eq!(snapshot.next_prayer_name, "Dhuhr");
        assert_eq!(snapshot.countdown_text, "09:33:00 until Dhuhr");
    }

    #[test]
    fn day_without_readable_times_is_an_error() {
        let json = serde_json::json!({
            "times": {
                "fajr": {"adhan": "?"},
                "dhuhr": {"adhan": "?"},
                "asr": {"adhan": "?"},
                "maghrib": {"adhan": "?"},
                "isha": {"adhan": "?"}
            }
        })
        .to_string();
        let times = parse_day_record(&json).unwrap();

        let err = build_snapshot(&times, &now(4, 0), "2026-06-14").unwrap_err();
        assert!(matches!(err, StoreError::NoUsableTimes { .. }));
    }
}
