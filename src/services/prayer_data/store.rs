use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, FixedOffset, Local, TimeZone};

use super::error::StoreError;
use super::parser::{build_snapshot, find_in_bulk, parse_day_record, DayTimes};
use super::source::PrayerDataSource;
use crate::models::prayer::PrayerSnapshot;
use crate::models::settings::DEFAULT_CACHE_TTL_MS;
use crate::services::countdown::refresh_countdown;
use crate::utils::date::date_key;

/// Today's parsed snapshot and when it was computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub date_key: String,
    pub snapshot: PrayerSnapshot,
    pub computed_at: DateTime<FixedOffset>,
}

impl CacheEntry {
    /// Valid for the same day while `0 <= now - computed_at < ttl`. A `now`
    /// earlier than `computed_at` (the clock was set back) is a miss.
    fn is_fresh(&self, today_key: &str, now: DateTime<FixedOffset>, ttl: Duration) -> bool {
        let elapsed = now - self.computed_at;
        self.date_key == today_key && elapsed >= Duration::zero() && elapsed < ttl
    }
}

/// Owns the short-lived cache of today's prayer data.
///
/// The TTL check, the source read and the cache replacement all happen under
/// one lock, so two near-simultaneous misses load once. A successful load
/// always replaces the entry.
pub struct PrayerDataStore {
    source: Arc<dyn PrayerDataSource>,
    ttl: Duration,
    cache: Mutex<Option<CacheEntry>>,
}

impl PrayerDataStore {
    pub fn new(source: Arc<dyn PrayerDataSource>) -> Self {
        Self::with_ttl(source, StdDuration::from_millis(DEFAULT_CACHE_TTL_MS))
    }

    pub fn with_ttl(source: Arc<dyn PrayerDataSource>, ttl: StdDuration) -> Self {
        let ttl = Duration::from_std(ttl).unwrap_or_else(|_| Duration::milliseconds(DEFAULT_CACHE_TTL_MS as i64));
        Self {
            source,
            ttl,
            cache: Mutex::new(None),
        }
    }

    /// Snapshot for the current local time.
    pub fn get(&self) -> PrayerSnapshot {
        self.get_at(Local::now())
    }

    /// Snapshot for `now`. Never fails: when today's data cannot be loaded the
    /// error snapshot is returned and nothing is cached, so the next call
    /// retries the source.
    pub fn get_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> PrayerSnapshot {
        let today_key = date_key(&now);
        let now_fixed = now.fixed_offset();
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = cache.as_ref() {
            if entry.is_fresh(&today_key, now_fixed, self.ttl) {
                log::debug!("Returning cached prayer data for {}", today_key);
                return refresh_countdown(&entry.snapshot, &now);
            }
        }

        log::debug!("Loading fresh prayer data for {}", today_key);
        match self.load(&today_key, &now) {
            Ok(snapshot) => {
                *cache = Some(CacheEntry {
                    date_key: today_key,
                    snapshot: snapshot.clone(),
                    computed_at: now_fixed,
                });
                snapshot
            }
            Err(err) => {
                log::error!("Error getting prayer data: {}", err);
                PrayerSnapshot::error()
            }
        }
    }

    /// Drops the cached entry so the next `get` reloads from the source.
    pub fn invalidate(&self) {
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn cached_entry(&self) -> Option<CacheEntry> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn load<Tz: TimeZone>(&self, today_key: &str, now: &DateTime<Tz>) -> Result<PrayerSnapshot, StoreError> {
        let times = match self.load_record(today_key) {
            Some(times) => times,
            None => self.load_from_bulk(today_key)?,
        };
        build_snapshot(&times, now, today_key)
    }

    /// Per-date record. Any failure here is logged and the bulk path is tried.
    fn load_record(&self, today_key: &str) -> Option<DayTimes> {
        let json = match self.source.day_record(today_key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("Per-date record unavailable for {}: {}", today_key, err);
                return None;
            }
        };

        match parse_day_record(&json) {
            Ok(times) => Some(times),
            Err(err) => {
                log::warn!("Malformed per-date record for {}: {}", today_key, err);
                None
            }
        }
    }

    fn load_from_bulk(&self, today_key: &str) -> Result<DayTimes, StoreError> {
        log::debug!("Loading from bulk asset for {}", today_key);
        let unavailable = || StoreError::SourceUnavailable {
            date_key: today_key.to_string(),
        };

        let document = self.source.bulk_document()?.ok_or_else(unavailable)?;
        find_in_bulk(&document, today_key)
            .map_err(|source| StoreError::Parse {
                date_key: today_key.to_string(),
                source,
            })?
            .ok_or_else(unavailable)
    }
}
