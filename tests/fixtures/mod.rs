// Test fixtures - reusable test data
// Provides a consistent prayer day across all test files

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone};
use prayer_widgets::models::prayer::{PrayerName, PrayerTime};

/// Date every fixture record belongs to.
pub const DAY_KEY: &str = "2026-06-14";

/// Day with no record in the preferences file, only in the bulk asset.
pub const BULK_ONLY_DAY_KEY: &str = "2026-06-15";

/// Sample times used across tests: Fajr 5:23 AM through Isha 9:32 PM.
pub mod times {
    use super::*;

    pub fn sample_day() -> Vec<PrayerTime> {
        vec![
            PrayerTime::new(PrayerName::Fajr, 5, 23),
            PrayerTime::new(PrayerName::Dhuhr, 13, 33),
            PrayerTime::new(PrayerName::Asr, 17, 16),
            PrayerTime::new(PrayerName::Maghrib, 20, 13),
            PrayerTime::new(PrayerName::Isha, 21, 32),
        ]
    }

    pub fn sample_strings() -> [(PrayerName, &'static str); 5] {
        [
            (PrayerName::Fajr, "5:23 AM"),
            (PrayerName::Dhuhr, "1:33 PM"),
            (PrayerName::Asr, "5:16 PM"),
            (PrayerName::Maghrib, "8:13 PM"),
            (PrayerName::Isha, "9:32 PM"),
        ]
    }
}

/// Stored JSON documents in the shape the app writes them.
pub mod records {
    use super::*;

    /// One day record with `fajr` substituted.
    pub fn day_record_with_fajr(fajr: &str) -> String {
        serde_json::json!({
            "date": DAY_KEY,
            "times": {
                "fajr": { "adhan": fajr, "iqamah": "5:45 AM" },
                "dhuhr": { "adhan": "1:33 PM", "iqamah": "1:45 PM" },
                "asr": { "adhan": "5:16 PM", "iqamah": "5:30 PM" },
                "maghrib": { "adhan": "8:13 PM", "iqamah": "8:18 PM" },
                "isha": { "adhan": "9:32 PM", "iqamah": "9:45 PM" }
            }
        })
        .to_string()
    }

    pub fn day_record() -> String {
        day_record_with_fajr("5:23 AM")
    }

    /// Preferences file holding today's record under its bridged key.
    pub fn preferences_file() -> String {
        let mut prefs = serde_json::Map::new();
        prefs.insert(
            format!("flutter.prayer_times_{}", DAY_KEY),
            serde_json::Value::String(day_record()),
        );
        prefs.insert(
            "flutter.selected_mosque".to_string(),
            serde_json::Value::String("central".to_string()),
        );
        serde_json::Value::Object(prefs).to_string()
    }

    /// Bulk asset covering the day after [`DAY_KEY`].
    pub fn bulk_asset() -> String {
        let day: serde_json::Value = serde_json::from_str(&day_record_with_fajr("5:22 AM")).unwrap();
        let mut bulk = serde_json::Map::new();
        bulk.insert(BULK_ONLY_DAY_KEY.to_string(), day);
        serde_json::Value::Object(bulk).to_string()
    }
}

/// Wall-clock instants on the fixture day.
pub mod clock {
    use super::*;

    pub fn zone() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).unwrap()
    }

    pub fn at(hour: u32, minute: u32, second: u32) -> DateTime<FixedOffset> {
        zone().with_ymd_and_hms(2026, 6, 14, hour, minute, second).unwrap()
    }

    pub fn next_day_at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        zone().with_ymd_and_hms(2026, 6, 15, hour, minute, 0).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_records_are_valid_json() {
        assert!(serde_json::from_str::<serde_json::Value>(&records::day_record()).is_ok());
        assert!(serde_json::from_str::<serde_json::Value>(&records::preferences_file()).is_ok());
        assert!(serde_json::from_str::<serde_json::Value>(&records::bulk_asset()).is_ok());
    }
}
