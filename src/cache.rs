//! Read-through request cache.
//!
//! Every decoded response is kept for the lifetime of the cache, keyed by its
//! URL. There is no expiry and no invalidation: the catalog is treated as
//! immutable for the duration of a session.

use crate::api::Fetcher;
use crate::error::Result;
use log::{debug, trace};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;

type Slot = Arc<OnceCell<Arc<Value>>>;

/// Memoizes [`Fetcher`] responses by request key.
///
/// Concurrent calls for the same uncached key share one underlying fetch
/// (single-flight). A failed fetch stores nothing, so the next call for that
/// key fetches again.
pub struct RequestCache<F> {
    fetcher: F,
    slots: Mutex<HashMap<String, Slot>>,
}

impl<F: Fetcher> RequestCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the decoded response for `key`, fetching it on first use.
    pub async fn get(&self, key: &str) -> Result<Arc<Value>> {
        let slot = self.slot(key);

        if let Some(value) = slot.get() {
            trace!("Cache hit for {}", key);
            return Ok(Arc::clone(value));
        }

        let fetched = slot
            .get_or_try_init(|| async {
                debug!("Cache miss for {}", key);
                self.fetcher.fetch_json(key).await.map(Arc::new)
            })
            .await;

        match fetched {
            Ok(value) => Ok(Arc::clone(value)),
            Err(e) => {
                self.discard_empty(key, &slot);
                Err(e)
            }
        }
    }

    /// Whether a successful response is stored for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.lock()
            .get(key)
            .is_some_and(|slot| slot.initialized())
    }

    /// Number of stored responses.
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &str) -> Slot {
        Arc::clone(self.lock().entry(key.to_string()).or_default())
    }

    /// Drop the map entry for `key` if it is still this unfilled slot.
    fn discard_empty(&self, key: &str, slot: &Slot) {
        let mut slots = self.lock();
        if slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && !current.initialized())
        {
            slots.remove(key);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
