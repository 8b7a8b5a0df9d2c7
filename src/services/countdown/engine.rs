//! Next-prayer selection and countdown arithmetic.
//!
//! Everything here is a pure function of the day's times and the caller's
//! `now`, so it can be re-run on a cached snapshot at any moment.

use chrono::{DateTime, FixedOffset, TimeZone};

use super::clock::{parse_clock, FormatError};
use crate::models::prayer::{PrayerName, PrayerSnapshot, PrayerTime};
use crate::utils::date::at_time_of_day;

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Time left until the next prayer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    pub next: PrayerName,
    pub target: DateTime<FixedOffset>,
    /// Always positive: the target is strictly after `now`.
    pub remaining_ms: i64,
    /// True when every prayer today has passed and the target is tomorrow.
    pub rolled_over: bool,
}

impl Countdown {
    pub fn hours(&self) -> i64 {
        self.remaining_ms / MS_PER_HOUR
    }

    pub fn minutes(&self) -> i64 {
        (self.remaining_ms % MS_PER_HOUR) / MS_PER_MINUTE
    }

    pub fn seconds(&self) -> i64 {
        (self.remaining_ms % MS_PER_MINUTE) / MS_PER_SECOND
    }

    pub fn total_seconds(&self) -> i64 {
        self.remaining_ms / MS_PER_SECOND
    }

    /// `"HH:MM:SS until <Name>"`. Hours are not wrapped at 24.
    pub fn text(&self) -> String {
        format!(
            "{:02}:{:02}:{:02} until {}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.next.display_name()
        )
    }

    pub fn next_name(&self) -> &'static str {
        self.next.display_name()
    }
}

/// Finds the first prayer strictly after `now`, in the order given.
///
/// When every prayer today has passed, the target becomes tomorrow's Fajr (or
/// the earliest remaining prayer if Fajr is missing from `times`). Returns
/// `None` only when `times` is empty.
pub fn compute_countdown<Tz: TimeZone>(times: &[PrayerTime], now: &DateTime<Tz>) -> Option<Countdown> {
    let tz = now.timezone();
    let today = now.date_naive();

    for time in times {
        let Some(candidate) = at_time_of_day(&tz, today, time.hour, time.minute) else {
            continue;
        };
        if candidate > *now {
            return Some(build(time.name, candidate, now, false));
        }
    }

    let first = times
        .iter()
        .find(|time| time.name == PrayerName::Fajr)
        .or_else(|| times.iter().min_by_key(|time| time.minute_of_day()))?;
    let tomorrow = today.succ_opt()?;
    let target = at_time_of_day(&tz, tomorrow, first.hour, first.minute)?;
    Some(build(first.name, target, now, true))
}

fn build<Tz: TimeZone>(next: PrayerName, target: DateTime<Tz>, now: &DateTime<Tz>, rolled_over: bool) -> Countdown {
    let remaining_ms = target
        .clone()
        .signed_duration_since(now.clone())
        .num_milliseconds();
    Countdown {
        next,
        target: target.fixed_offset(),
        remaining_ms,
        rolled_over,
    }
}

/// Day's times after parsing, with the fields that failed kept aside.
#[derive(Debug, Clone, Default)]
pub struct ParsedDay {
    pub times: Vec<PrayerTime>,
    pub failures: Vec<(PrayerName, FormatError)>,
}

impl ParsedDay {
    pub fn is_usable(&self) -> bool {
        !self.times.is_empty()
    }

    pub fn is_valid(&self, name: PrayerName) -> bool {
        self.times.iter().any(|time| time.name == name)
    }
}

/// Parses each `(name, clock string)` pair independently, so one malformed
/// field never affects the others.
pub fn parse_times<'a, I>(entries: I) -> ParsedDay
where
    I: IntoIterator<Item = (PrayerName, &'a str)>,
{
    let mut parsed = ParsedDay::default();
    for (name, text) in entries {
        match parse_clock(text) {
            Ok((hour, minute)) => parsed.times.push(PrayerTime::new(name, hour, minute)),
            Err(err) => parsed.failures.push((name, err)),
        }
    }
    parsed
}

/// Re-derives the countdown fields of `snapshot` for `now` by re-parsing its
/// own display strings.
pub fn refresh_countdown<Tz: TimeZone>(snapshot: &PrayerSnapshot, now: &DateTime<Tz>) -> PrayerSnapshot {
    let parsed = parse_times(snapshot.times());
    match compute_countdown(&parsed.times, now) {
        Some(countdown) => snapshot.with_countdown(
            countdown.text(),
            countdown.next_name(),
            snapshot.time_for(countdown.next),
        ),
        None => PrayerSnapshot::error(),
    }
}
