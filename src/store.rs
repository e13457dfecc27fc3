//! Durable mapping store over an embedded redb database
//!
//! Owns the two persisted tables and exposes the create/resolve operations.
//! Uniqueness of short codes is enforced at the storage layer: redb allows a
//! single write transaction at a time, so the presence check and the insert
//! below happen atomically with respect to every other writer. There is no
//! separate application-level existence check outside that transaction.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::generator;
use crate::model::Mapping;

/// Main table for stored mappings
///
/// Key: short code as string
/// Value: JSON-serialized [`Mapping`] as string
///
/// Example:
/// - Key: "aZ3kQ9"
/// - Value: '{"id":1,"short_code":"aZ3kQ9","long_url":"https://example.com",...}'
const TABLE_MAPPINGS: TableDefinition<&str, &str> = TableDefinition::new("urls_v1");

/// Single-row table holding the next surrogate id.
const TABLE_SEQUENCE: TableDefinition<&str, u64> = TableDefinition::new("sequence_v1");

const NEXT_ID_KEY: &str = "next_id";

/// Fresh candidates drawn before giving up with [`StoreError::CapacityExhausted`].
const MAX_CREATE_ATTEMPTS: u32 = 10;

/// Handle to the mapping store, shared across request handlers
///
/// Cheap to clone; constructed once at startup and injected via router state.
#[derive(Clone)]
pub struct MappingStore {
    db: Arc<Database>,
    code_length: usize,
}

impl MappingStore {
    /// Opens (or creates) the database file and ensures both tables exist.
    ///
    /// Idempotent: opening an existing database never errors and never
    /// disturbs stored rows, so repeated process starts are safe.
    pub fn open(path: impl AsRef<Path>, code_length: usize) -> Result<Self, StoreError> {
        let db = Database::create(path)?;

        // Opening a table inside a committed write transaction creates it
        // if absent and is a no-op otherwise.
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(TABLE_MAPPINGS)?;
            write_txn.open_table(TABLE_SEQUENCE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            code_length,
        })
    }

    /// Stores `long_url` under a freshly generated short code and returns
    /// that code.
    ///
    /// Each attempt runs as one short-lived write transaction: if the
    /// candidate key is already taken the transaction is aborted and a new
    /// candidate is drawn. After [`MAX_CREATE_ATTEMPTS`] collisions the code
    /// space is considered saturated.
    pub fn create_mapping(&self, long_url: &str) -> Result<String, StoreError> {
        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            let candidate = generator::generate(self.code_length);

            let write_txn = self.db.begin_write()?;
            let inserted = {
                let mut mappings = write_txn.open_table(TABLE_MAPPINGS)?;

                if mappings.get(candidate.as_str())?.is_some() {
                    false
                } else {
                    let mut sequence = write_txn.open_table(TABLE_SEQUENCE)?;
                    let id = sequence
                        .get(NEXT_ID_KEY)?
                        .map(|guard| guard.value())
                        .unwrap_or(1);
                    sequence.insert(NEXT_ID_KEY, id + 1)?;

                    let record = Mapping {
                        id,
                        short_code: candidate.clone(),
                        long_url: long_url.to_string(),
                        created_at: Utc::now(),
                    };
                    let record_json = serde_json::to_string(&record)?;
                    mappings.insert(candidate.as_str(), record_json.as_str())?;
                    true
                }
            };

            if inserted {
                write_txn.commit()?;
                debug!(code = %candidate, "mapping created");
                return Ok(candidate);
            }

            // Collision. Discard the uncommitted transaction and draw again.
            write_txn.abort()?;
            warn!(attempt, code = %candidate, "short code collision, retrying");
        }

        Err(StoreError::CapacityExhausted {
            attempts: MAX_CREATE_ATTEMPTS,
        })
    }

    /// Looks up the long URL stored under `short_code`.
    ///
    /// Returns `Ok(None)` when the code is unknown; absence is an expected
    /// outcome, not an error.
    pub fn resolve_mapping(&self, short_code: &str) -> Result<Option<String>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let mappings = read_txn.open_table(TABLE_MAPPINGS)?;

        match mappings.get(short_code)? {
            Some(value) => {
                let record: Mapping = serde_json::from_str(value.value())?;
                Ok(Some(record.long_url))
            }
            None => Ok(None),
        }
    }
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the durable mapping store.
    pub store: MappingStore,

    /// Origin used for short URLs when the request carries no Host header.
    pub fallback_origin: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{ALPHABET, DEFAULT_CODE_LENGTH};
    use std::collections::HashSet;
    use std::thread;
    use tempfile::NamedTempFile;

    fn open_test_store(code_length: usize) -> (MappingStore, NamedTempFile) {
        let temp_db = NamedTempFile::new().expect("Failed to create temp file");
        let store = MappingStore::open(temp_db.path(), code_length)
            .expect("Failed to open test store");
        (store, temp_db)
    }

    #[test]
    fn create_then_resolve_round_trip() {
        let (store, _temp_db) = open_test_store(DEFAULT_CODE_LENGTH);

        let code = store.create_mapping("https://example.com").unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| ALPHABET.contains(c)));

        let resolved = store.resolve_mapping(&code).unwrap();
        assert_eq!(resolved.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn resolve_unknown_code_returns_none() {
        let (store, _temp_db) = open_test_store(DEFAULT_CODE_LENGTH);
        assert_eq!(store.resolve_mapping("zzzzzz").unwrap(), None);
    }

    #[test]
    fn resolve_is_idempotent() {
        let (store, _temp_db) = open_test_store(DEFAULT_CODE_LENGTH);
        let code = store.create_mapping("https://example.com/page").unwrap();

        for _ in 0..3 {
            assert_eq!(
                store.resolve_mapping(&code).unwrap().as_deref(),
                Some("https://example.com/page")
            );
        }
    }

    #[test]
    fn same_url_twice_creates_distinct_mappings() {
        let (store, _temp_db) = open_test_store(DEFAULT_CODE_LENGTH);

        let first = store.create_mapping("https://example.com").unwrap();
        let second = store.create_mapping("https://example.com").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn reopening_keeps_rows_and_does_not_error() {
        let temp_db = NamedTempFile::new().expect("Failed to create temp file");

        let code = {
            let store = MappingStore::open(temp_db.path(), DEFAULT_CODE_LENGTH).unwrap();
            store.create_mapping("https://example.com/persist").unwrap()
        };

        // Second startup against the same file: schema creation must be a
        // no-op and existing rows must survive.
        let store = MappingStore::open(temp_db.path(), DEFAULT_CODE_LENGTH).unwrap();
        assert_eq!(
            store.resolve_mapping(&code).unwrap().as_deref(),
            Some("https://example.com/persist")
        );
    }

    #[test]
    fn ids_increase_monotonically() {
        let (store, _temp_db) = open_test_store(DEFAULT_CODE_LENGTH);

        let mut ids = Vec::new();
        for i in 0..5 {
            let code = store
                .create_mapping(&format!("https://example.com/{i}"))
                .unwrap();

            let read_txn = store.db.begin_read().unwrap();
            let table = read_txn.open_table(TABLE_MAPPINGS).unwrap();
            let guard = table.get(code.as_str()).unwrap().unwrap();
            let record: Mapping = serde_json::from_str(guard.value()).unwrap();
            ids.push(record.id);
        }

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn concurrent_creates_yield_distinct_codes() {
        let (store, _temp_db) = open_test_store(DEFAULT_CODE_LENGTH);

        let mut handles = Vec::new();
        for worker in 0..8 {
            let store = store.clone();
            handles.push(thread::spawn(move || {
                (0..25)
                    .map(|i| {
                        store
                            .create_mapping(&format!("https://example.com/{worker}/{i}"))
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            }));
        }

        let mut codes = HashSet::new();
        for handle in handles {
            for code in handle.join().unwrap() {
                assert!(codes.insert(code), "duplicate short code handed out");
            }
        }
        assert_eq!(codes.len(), 200);
    }

    #[test]
    fn exhausts_capacity_on_tiny_code_space() {
        // Length 1 gives only 62 codes; filling the space forces the retry
        // loop to give up eventually.
        let (store, _temp_db) = open_test_store(1);

        let mut exhausted = false;
        for i in 0..200 {
            match store.create_mapping(&format!("https://example.com/{i}")) {
                Ok(_) => {}
                Err(StoreError::CapacityExhausted { attempts }) => {
                    assert_eq!(attempts, MAX_CREATE_ATTEMPTS);
                    exhausted = true;
                    break;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert!(exhausted, "expected capacity exhaustion on 62-code space");
    }
}
