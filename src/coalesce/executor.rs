//! Coalescing Executor
//!
//! Collapses concurrent fetches for the same key into one execution whose
//! outcome is handed to every caller that asked while it was running.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, error};

use crate::error::{AppError, Result};

type SharedFetch<T> = Shared<BoxFuture<'static, Result<T>>>;
type InFlightMap<T> = Mutex<HashMap<String, SharedFetch<T>>>;

// == Coalescer ==
/// Per-key single-flight executor.
///
/// Cloning is cheap; clones share the same in-flight map.
pub struct Coalescer<T> {
    in_flight: Arc<InFlightMap<T>>,
}

impl<T> Clone for Coalescer<T> {
    fn clone(&self) -> Self {
        Self {
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<T> Default for Coalescer<T> {
    fn default() -> Self {
        Self {
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T> Coalescer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    // == Run ==
    /// Runs `fetch` for `key`, or joins the fetch already running for it.
    ///
    /// The check for an existing fetch and the registration of a new one
    /// happen under one lock, so at most one `fetch` is active per key. The
    /// fetch runs on its own task; its slot is released when that task ends,
    /// whatever the outcome, so a failed key can be retried straight away.
    pub async fn run<F, Fut>(&self, key: &str, fetch: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let pending = {
            let mut in_flight = lock(&self.in_flight);
            match in_flight.get(key) {
                Some(existing) => {
                    debug!("Joining in-flight fetch for '{}'", key);
                    existing.clone()
                }
                None => {
                    let pending = self.start(key, fetch());
                    in_flight.insert(key.to_string(), pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    /// Number of keys with a fetch currently running.
    pub fn in_flight(&self) -> usize {
        lock(&self.in_flight).len()
    }

    fn start<Fut>(&self, key: &str, fut: Fut) -> SharedFetch<T>
    where
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let release = SlotRelease {
            in_flight: Arc::clone(&self.in_flight),
            key: key.to_string(),
        };

        let task = tokio::spawn(async move {
            let _release = release;
            fut.await
        });

        let key = key.to_string();
        async move {
            task.await.unwrap_or_else(|join_err| {
                error!("Fetch for '{}' did not complete: {}", key, join_err);
                Err(AppError::Internal(format!("fetch for '{}' aborted", key)))
            })
        }
        .boxed()
        .shared()
    }
}

// == Slot Release ==
/// Removes a key's in-flight slot when dropped, including on panic.
struct SlotRelease<T> {
    in_flight: Arc<InFlightMap<T>>,
    key: String,
}

impl<T> Drop for SlotRelease<T> {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.key);
    }
}

/// The map holds no invariants a panicking holder could break mid-update.
fn lock<T>(map: &InFlightMap<T>) -> MutexGuard<'_, HashMap<String, SharedFetch<T>>> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}
