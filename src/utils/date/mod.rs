// Date utility functions
// Date keys and local wall-clock resolution for prayer times

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone};

/// Key used by the data sources for a calendar day ("2026-06-14").
pub fn date_key<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.date_naive().format("%Y-%m-%d").to_string()
}

/// The instant `day` at `hour:minute:00.000` in `tz`.
///
/// An ambiguous wall-clock time (clocks falling back) resolves to the earlier
/// instant. A time inside a spring-forward gap does not exist, so it is moved
/// forward by an hour.
pub fn at_time_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Tz>> {
    let naive = day.and_time(NaiveTime::from_hms_opt(hour, minute, 0)?);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz.from_local_datetime(&(naive + Duration::hours(1))).earliest(),
    }
}
