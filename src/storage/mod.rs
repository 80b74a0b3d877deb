//! Key-value persistence for sessions and streaks
//!
//! The engine and streak tracker never touch the filesystem directly; they go
//! through a `Store`, so tests can run against `MemoryStore` and the binary
//! against `FileStore`. Records are JSON strings.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// A string-keyed record store
pub trait Store {
    /// Load the record stored under `key`
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous record
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be written.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the record under `key`; removing a missing key is not an error
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be written.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Load and decode a record, treating unreadable or malformed data as absent
///
/// Failures are logged and swallowed so a corrupt record never stops the game.
pub fn load_record<T: DeserializeOwned>(store: &impl Store, key: &str) -> Option<T> {
    let raw = match store.load(key) {
        Ok(raw) => raw?,
        Err(err) => {
            warn!(key, error = %err, "failed to read stored record");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(key, error = %err, "discarding malformed stored record");
            None
        }
    }
}

/// Encode and save a record; failures are logged and skipped
pub fn save_record<T: Serialize>(store: &mut impl Store, key: &str, record: &T) {
    let json = match serde_json::to_string(record) {
        Ok(json) => json,
        Err(err) => {
            warn!(key, error = %err, "failed to encode record");
            return;
        }
    };

    if let Err(err) = store.save(key, &json) {
        warn!(key, error = %err, "failed to save record");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn records_round_trip() {
        let mut store = MemoryStore::new();
        save_record(&mut store, "counter", &Counter { value: 3 });
        assert_eq!(load_record(&store, "counter"), Some(Counter { value: 3 }));
    }

    #[test]
    fn missing_record_is_none() {
        let store = MemoryStore::new();
        assert_eq!(load_record::<Counter>(&store, "counter"), None);
    }

    #[test]
    fn malformed_record_is_discarded() {
        let mut store = MemoryStore::new();
        store.save("counter", "{\"value\": \"three\"}").unwrap();
        assert_eq!(load_record::<Counter>(&store, "counter"), None);

        store.save("counter", "not json").unwrap();
        assert_eq!(load_record::<Counter>(&store, "counter"), None);
    }
}
