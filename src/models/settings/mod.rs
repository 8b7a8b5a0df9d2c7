// Settings module
// Timing and data-source configuration, persisted as TOML

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::surface::SurfaceType;

pub const DEFAULT_CACHE_TTL_MS: u64 = 10_000;
pub const DEFAULT_PERIODIC_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_FOLLOW_UP_DELAY_MS: u64 = 1_000;
pub const DEFAULT_LIVE_UPDATE_DELAY_MS: u64 = 10_000;
pub const DEFAULT_COUNTDOWN_INTERVAL_MS: u64 = 1_000;
/// Coarsest repeating interval a host guarantees without exact-timer rights.
pub const DEFAULT_INEXACT_FLOOR_MS: u64 = 15 * 60 * 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub cache_ttl_ms: u64,
    pub periodic_interval_ms: u64,
    pub follow_up_delay_ms: u64,
    pub live_update_delay_ms: u64,
    pub countdown_interval_ms: u64,
    pub inexact_floor_ms: u64,
    /// Surface id ("4x1") that gets the 1 s countdown chain.
    pub fast_track_surface: String,
    /// Preferences file holding `prayer_times_<date>` records.
    pub preferences_path: Option<PathBuf>,
    /// Bulk asset mapping date keys to day records.
    pub bulk_asset_path: Option<PathBuf>,
    /// Instances per surface id placed at daemon start-up.
    pub instances: BTreeMap<String, u32>,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            periodic_interval_ms: DEFAULT_PERIODIC_INTERVAL_MS,
            follow_up_delay_ms: DEFAULT_FOLLOW_UP_DELAY_MS,
            live_update_delay_ms: DEFAULT_LIVE_UPDATE_DELAY_MS,
            countdown_interval_ms: DEFAULT_COUNTDOWN_INTERVAL_MS,
            inexact_floor_ms: DEFAULT_INEXACT_FLOOR_MS,
            fast_track_surface: SurfaceType::Horizontal.id().to_string(),
            preferences_path: None,
            bulk_asset_path: None,
            instances: BTreeMap::new(),
        }
    }
}

impl WidgetSettings {
    pub fn validate(&self) -> Result<(), String> {
        let durations = [
            ("cache_ttl_ms", self.cache_ttl_ms),
            ("periodic_interval_ms", self.periodic_interval_ms),
            ("follow_up_delay_ms", self.follow_up_delay_ms),
            ("live_update_delay_ms", self.live_update_delay_ms),
            ("countdown_interval_ms", self.countdown_interval_ms),
            ("inexact_floor_ms", self.inexact_floor_ms),
        ];
        for (name, value) in durations {
            if value == 0 {
                return Err(format!("{} must be greater than zero", name));
            }
        }

        if self.countdown_interval_ms >= self.periodic_interval_ms {
            return Err("countdown_interval_ms must be shorter than periodic_interval_ms".to_string());
        }

        if SurfaceType::from_id(&self.fast_track_surface).is_none() {
            return Err(format!("Unknown fast-track surface '{}'", self.fast_track_surface));
        }

        for id in self.instances.keys() {
            if SurfaceType::from_id(id).is_none() {
                return Err(format!("Unknown surface '{}' in instances", id));
            }
        }

        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// Timer cadences for the refresh scheduler.
    pub fn timings(&self) -> RefreshTimings {
        RefreshTimings {
            periodic_interval: Duration::from_millis(self.periodic_interval_ms),
            follow_up_delay: Duration::from_millis(self.follow_up_delay_ms),
            live_update_delay: Duration::from_millis(self.live_update_delay_ms),
            countdown_interval: Duration::from_millis(self.countdown_interval_ms),
            inexact_floor: Duration::from_millis(self.inexact_floor_ms),
        }
    }

    /// Falls back to the horizontal strip when the configured id is unknown;
    /// `validate` reports that case.
    pub fn fast_track(&self) -> SurfaceType {
        SurfaceType::from_id(&self.fast_track_surface).unwrap_or(SurfaceType::Horizontal)
    }

    /// Configured start-up instance counts, skipping unknown ids.
    pub fn initial_instances(&self) -> Vec<(SurfaceType, u32)> {
        self.instances
            .iter()
            .filter_map(|(id, count)| SurfaceType::from_id(id).map(|surface| (surface, *count)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTimings {
    pub periodic_interval: Duration,
    pub follow_up_delay: Duration,
    pub live_update_delay: Duration,
    pub countdown_interval: Duration,
    pub inexact_floor: Duration,
}

impl Default for RefreshTimings {
    fn default() -> Self {
        WidgetSettings::default().timings()
    }
}
