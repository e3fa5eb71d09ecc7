//! Explicit time-to-live memoization for dataset loads.
//!
//! Loads are idempotent blocking reads that produce immutable snapshots, so
//! the only discipline needed is at this boundary: a fresh entry is shared
//! as an `Arc`, an expired entry is reloaded, and a per-key async mutex
//! keeps at most one load per key in flight.

use crate::error::EngineError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};
use tokio::sync::Mutex as AsyncMutex;

struct Slot<V> {
    value: Option<Entry<V>>,
}

struct Entry<V> {
    value: Arc<V>,
    expires_at: Instant,
}

pub struct TtlCache<V> {
    ttl: Duration,
    slots: StdMutex<HashMap<String, Arc<AsyncMutex<Slot<V>>>>>,
}

impl<V> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        TtlCache { ttl, slots: StdMutex::new(HashMap::new()) }
    }

    /// Returns the cached snapshot for `key` if still fresh, otherwise runs
    /// `loader` and caches its result for the configured TTL. A failed load
    /// caches nothing; the next call retries.
    pub async fn get_or_load<F>(&self, key: &str, loader: F) -> Result<Arc<V>, EngineError>
    where
        F: FnOnce() -> Result<V, EngineError>,
    {
        let slot = self.slot_for(key);
        let mut guard = slot.lock().await;

        if let Some(entry) = &guard.value {
            if entry.expires_at > Instant::now() {
                return Ok(entry.value.clone());
            }
        }

        let value = Arc::new(loader()?);
        guard.value = Some(Entry { value: value.clone(), expires_at: Instant::now() + self.ttl });
        Ok(value)
    }

    /// Drops any cached value for `key`, forcing the next access to reload.
    pub fn invalidate(&self, key: &str) {
        self.slots
            .lock()
            .expect("cache slot map poisoned")
            .remove(key);
    }

    fn slot_for(&self, key: &str) -> Arc<AsyncMutex<Slot<V>>> {
        let mut slots = self.slots.lock().expect("cache slot map poisoned");
        slots
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(Slot { value: None })))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_loader(counter: &AtomicUsize, value: u32) -> impl FnOnce() -> Result<u32, EngineError> + '_ {
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(value)
        }
    }

    #[tokio::test]
    async fn fresh_entry_is_shared_without_reload() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        let loads = AtomicUsize::new(0);
        let a = cache.get_or_load("k", counting_loader(&loads, 7)).await.unwrap();
        let b = cache.get_or_load("k", counting_loader(&loads, 8)).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*b, 7);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_reloads() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_millis(10));
        let loads = AtomicUsize::new(0);
        let _ = cache.get_or_load("k", counting_loader(&loads, 1)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        let v = cache.get_or_load("k", counting_loader(&loads, 2)).await.unwrap();
        assert_eq!(*v, 2);
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_load_caches_nothing() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        let err = cache
            .get_or_load("k", || {
                Err(EngineError::ComputationFailure("boom".into()))
            })
            .await;
        assert!(err.is_err());

        let loads = AtomicUsize::new(0);
        let v = cache.get_or_load("k", counting_loader(&loads, 5)).await.unwrap();
        assert_eq!(*v, 5);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        let loads = AtomicUsize::new(0);
        let _ = cache.get_or_load("k", counting_loader(&loads, 1)).await.unwrap();
        cache.invalidate("k");
        let v = cache.get_or_load("k", counting_loader(&loads, 2)).await.unwrap();
        assert_eq!(*v, 2);
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        let loads = AtomicUsize::new(0);
        let a = cache.get_or_load("a", counting_loader(&loads, 1)).await.unwrap();
        let b = cache.get_or_load("b", counting_loader(&loads, 2)).await.unwrap();
        assert_eq!((*a, *b), (1, 2));
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }
}
