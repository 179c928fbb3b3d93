//! Backing Store
//!
//! The slow source of truth the cache fronts. `RecordStore` is the seam; the
//! in-memory implementation simulates lookup latency.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::records::Record;

/// Source of records by integer id.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Looks up a record. `Ok(None)` means the id does not exist.
    async fn find(&self, id: i64) -> Result<Option<Record>>;

    /// Stores a new record under the next free id.
    async fn insert(&self, name: String, email: String) -> Result<Record>;
}

#[derive(Debug)]
struct Table {
    rows: HashMap<i64, Record>,
    next_id: i64,
}

// == In-Memory Store ==
/// Map-backed store with an artificial delay on every lookup.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    table: RwLock<Table>,
    latency: Duration,
    lookups: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryRecordStore {
    /// Creates an empty store; ids start at 1.
    pub fn new(latency: Duration) -> Self {
        Self {
            table: RwLock::new(Table {
                rows: HashMap::new(),
                next_id: 1,
            }),
            latency,
            lookups: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Creates a store holding the three demo records; new ids start at 4.
    pub fn seeded(latency: Duration) -> Self {
        let rows = [
            Record::new(1, "John Doe", "john@example.com"),
            Record::new(2, "Jane Smith", "jane@example.com"),
            Record::new(3, "Alice Johnson", "alice@example.com"),
        ];
        let mut store = Self::new(latency);
        {
            let table = store.table.get_mut();
            for row in rows {
                table.next_id = table.next_id.max(row.id + 1);
                table.rows.insert(row.id, row);
            }
        }
        store
    }

    /// Number of `find` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Makes every subsequent `find` fail until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find(&self, id: i64) -> Result<Option<Record>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        debug!("Backing store lookup for id {}", id);

        tokio::time::sleep(self.latency).await;

        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Store(format!("lookup of id {} failed", id)));
        }

        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, name: String, email: String) -> Result<Record> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let record = Record::new(id, name, email);
        table.rows.insert(id, record.clone());
        Ok(record)
    }
}
