//! Where raw prayer JSON comes from.
//!
//! Two supply paths exist: a per-date record stored under
//! `prayer_times_<date>` in a preferences store, and a bulk asset mapping every
//! date key to its day record. The store tries them in that order.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde_json::Value;

use super::error::SourceError;

const RECORD_KEY_PREFIX: &str = "prayer_times_";
/// Prefix the mobile app's preferences bridge puts in front of every key.
const BRIDGE_KEY_PREFIX: &str = "flutter.";

/// Preferences key of the per-date record.
pub fn record_key(date_key: &str) -> String {
    format!("{}{}", RECORD_KEY_PREFIX, date_key)
}

#[cfg_attr(test, mockall::automock)]
pub trait PrayerDataSource: Send + Sync {
    /// Per-date record as a JSON string, if one was stored.
    fn day_record(&self, date_key: &str) -> Result<Option<String>, SourceError>;

    /// Whole bulk document, if the asset exists.
    fn bulk_document(&self) -> Result<Option<String>, SourceError>;
}

/// Reads a JSON preferences file and a bulk JSON asset from disk.
///
/// The preferences file is a flat object. Values may be JSON strings holding
/// the encoded record (as the app's bridge writes them) or inline objects.
#[derive(Debug, Clone, Default)]
pub struct JsonFileDataSource {
    preferences_path: Option<PathBuf>,
    bulk_path: Option<PathBuf>,
}

impl JsonFileDataSource {
    pub fn new(preferences_path: Option<PathBuf>, bulk_path: Option<PathBuf>) -> Self {
        Self {
            preferences_path,
            bulk_path,
        }
    }

    fn read_optional(path: &Path) -> Result<Option<String>, SourceError> {
        match fs::read_to_string(path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SourceError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl PrayerDataSource for JsonFileDataSource {
    fn day_record(&self, date_key: &str) -> Result<Option<String>, SourceError> {
        let Some(path) = self.preferences_path.as_deref() else {
            return Ok(None);
        };
        let Some(data) = Self::read_optional(path)? else {
            log::debug!("Preferences file {} does not exist", path.display());
            return Ok(None);
        };

        let prefs: HashMap<String, Value> =
            serde_json::from_str(&data).map_err(|source| SourceError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let key = record_key(date_key);
        let bridged = format!("{}{}", BRIDGE_KEY_PREFIX, key);
        let value = prefs.get(&key).or_else(|| prefs.get(&bridged));

        Ok(match value {
            Some(Value::String(encoded)) => Some(encoded.clone()),
            Some(inline @ Value::Object(_)) => Some(inline.to_string()),
            Some(other) => {
                log::warn!("Ignoring non-object preference {} = {}", key, other);
                None
            }
            None => None,
        })
    }

    fn bulk_document(&self) -> Result<Option<String>, SourceError> {
        match self.bulk_path.as_deref() {
            Some(path) => Self::read_optional(path),
            None => Ok(None),
        }
    }
}

/// Source kept in memory; used for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryDataSource {
    records: RwLock<HashMap<String, String>>,
    bulk: RwLock<Option<String>>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_record(&self, date_key: &str, json: impl Into<String>) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record_key(date_key), json.into());
    }

    pub fn remove_record(&self, date_key: &str) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&record_key(date_key));
    }

    pub fn set_bulk(&self, document: Option<String>) {
        *self.bulk.write().unwrap_or_else(PoisonError::into_inner) = document;
    }
}

impl PrayerDataSource for InMemoryDataSource {
    fn day_record(&self, date_key: &str) -> Result<Option<String>, SourceError> {
        Ok(self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&record_key(date_key))
            .cloned())
    }

    fn bulk_document(&self) -> Result<Option<String>, SourceError> {
        Ok(self.bulk.read().unwrap_or_else(PoisonError::into_inner).clone())
    }
}
