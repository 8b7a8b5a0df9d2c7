mod error;
mod parser;
mod source;
mod store;

pub use error::{SourceError, StoreError};
pub use parser::{build_snapshot, find_in_bulk, parse_day_record, DayTimes};
pub use source::{record_key, InMemoryDataSource, JsonFileDataSource, PrayerDataSource};
pub use store::{CacheEntry, PrayerDataStore};
