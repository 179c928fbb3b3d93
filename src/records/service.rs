//! Record Service
//!
//! Read-through lookups (cache, then one coalesced store fetch) and
//! write-through creation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::coalesce::Coalescer;
use crate::error::Result;
use crate::records::{Record, RecordStore};

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordLookup {
    pub record: Record,
    /// Whether the outer cache check already held the record
    pub cached: bool,
    /// End-to-end time of the lookup, coalesced wait included
    pub response_time: Duration,
}

// == Record Service ==
pub struct RecordService {
    cache: SharedCache<Record>,
    coalescer: Coalescer<Option<Record>>,
    store: Arc<dyn RecordStore>,
}

impl RecordService {
    pub fn new(cache: SharedCache<Record>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            cache,
            coalescer: Coalescer::new(),
            store,
        }
    }

    pub fn cache(&self) -> &SharedCache<Record> {
        &self.cache
    }

    // == Get By Id ==
    /// Returns the record with `id`, or `None` when the store has no such id.
    ///
    /// Every call, whatever its outcome, adds its latency to the cache's
    /// response-time accumulator.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<RecordLookup>> {
        let started = Instant::now();
        let key = Record::cache_key(id);

        let hit = self.cache.write().await.get(&key);
        let outcome = match hit {
            Some(record) => {
                debug!("Cache hit for '{}'", key);
                Ok(Some((record, true)))
            }
            None => self
                .fetch(id, &key)
                .await
                .map(|found| found.map(|record| (record, false))),
        };

        let response_time = started.elapsed();
        self.cache.write().await.record_response_time(response_time);

        Ok(outcome?.map(|(record, cached)| RecordLookup {
            record,
            cached,
            response_time,
        }))
    }

    /// Coalesced miss path. Re-checks the cache first: another caller may
    /// have filled it between the outer check and registration here.
    async fn fetch(&self, id: i64, key: &str) -> Result<Option<Record>> {
        let cache = Arc::clone(&self.cache);
        let store = Arc::clone(&self.store);
        let owned_key = key.to_string();

        self.coalescer
            .run(key, move || async move {
                let hit = cache.write().await.get(&owned_key);
                if hit.is_some() {
                    debug!("'{}' filled while waiting to fetch", owned_key);
                    return Ok(hit);
                }

                let found = store.find(id).await?;
                match &found {
                    Some(record) => cache.write().await.set(owned_key, record.clone()),
                    None => debug!("No record with id {}", id),
                }
                Ok(found)
            })
            .await
    }

    // == Create ==
    /// Stores a new record and writes it straight into the cache.
    ///
    /// Callers are expected to have validated `name` and `email`.
    pub async fn create(&self, name: String, email: String) -> Result<Record> {
        let record = self.store.insert(name, email).await?;
        self.cache
            .write()
            .await
            .set(Record::cache_key(record.id), record.clone());

        info!("Created record {}", record.id);
        Ok(record)
    }
}
