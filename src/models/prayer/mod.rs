// Prayer module
// Daily prayer names, parsed times and the display snapshot pushed to widgets

use serde::{Deserialize, Serialize};

/// Placeholder shown for a time that could not be loaded or parsed.
pub const MISSING_TIME: &str = "--:--";

/// Countdown text shown when no prayer data is available for today.
pub const UNAVAILABLE_TEXT: &str = "Unable to load prayer times";

/// The five daily prayers in their fixed order through the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerName {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    pub const ALL: [PrayerName; 5] = [
        PrayerName::Fajr,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    /// Name as shown in countdown text ("Fajr").
    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }
}

impl std::fmt::Display for PrayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A named time of day, decoded from a 12-hour clock string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerTime {
    pub name: PrayerName,
    /// 0-23
    pub hour: u32,
    /// 0-59
    pub minute: u32,
}

impl PrayerTime {
    pub fn new(name: PrayerName, hour: u32, minute: u32) -> Self {
        Self { name, hour, minute }
    }

    /// Minutes since midnight, handy for ordering and comparisons.
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

/// Everything a widget needs to paint itself.
///
/// Snapshots are values: refreshing the countdown builds a new snapshot via
/// [`PrayerSnapshot::with_countdown`] instead of mutating a shared one, so a
/// reader never observes a half-updated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerSnapshot {
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
    pub countdown_text: String,
    pub next_prayer_name: String,
    /// Display time of the prayer the countdown targets.
    #[serde(default)]
    pub next_prayer_time: String,
}

impl PrayerSnapshot {
    /// The snapshot shown when today's data cannot be loaded.
    pub fn error() -> Self {
        Self {
            fajr: MISSING_TIME.to_string(),
            dhuhr: MISSING_TIME.to_string(),
            asr: MISSING_TIME.to_string(),
            maghrib: MISSING_TIME.to_string(),
            isha: MISSING_TIME.to_string(),
            countdown_text: UNAVAILABLE_TEXT.to_string(),
            next_prayer_name: String::new(),
            next_prayer_time: String::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.next_prayer_name.is_empty() && self.countdown_text == UNAVAILABLE_TEXT
    }

    /// Display string for one prayer.
    pub fn time_for(&self, name: PrayerName) -> &str {
        match name {
            PrayerName::Fajr => &self.fajr,
            PrayerName::Dhuhr => &self.dhuhr,
            PrayerName::Asr => &self.asr,
            PrayerName::Maghrib => &self.maghrib,
            PrayerName::Isha => &self.isha,
        }
    }

    /// The five display strings in daily order.
    pub fn times(&self) -> [(PrayerName, &str); 5] {
        PrayerName::ALL.map(|name| (name, self.time_for(name)))
    }

    /// Copy of this snapshot with the countdown fields replaced.
    pub fn with_countdown(
        &self,
        countdown_text: impl Into<String>,
        next_prayer_name: impl Into<String>,
        next_prayer_time: impl Into<String>,
    ) -> Self {
        Self {
            countdown_text: countdown_text.into(),
            next_prayer_name: next_prayer_name.into(),
            next_prayer_time: next_prayer_time.into(),
            ..self.clone()
        }
    }
}
