//! In-memory implementations of the `KvStore` port.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::kv_store::{KvStore, StoreStatus},
};

/// In-memory key-value store. `set_failing(true)` makes every call fail the
/// way an unreachable Redis would; `set_failing_puts(true)` fails only the
/// plain `put`/`put_with_ttl` writes.
#[derive(Default)]
pub struct InMemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
    ttls: Mutex<HashMap<String, u64>>,
    failing: AtomicBool,
    failing_puts: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store without counting writes.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        for (key, value) in entries {
            store.insert_raw(key, value);
        }
        store
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Raw stored value (for test assertions).
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn ttl(&self, key: &str) -> Option<u64> {
        self.ttls.lock().unwrap().get(key).copied()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_failing_puts(&self, failing: bool) {
        self.failing_puts.store(failing, Ordering::SeqCst);
    }

    /// Number of successful writes through the `KvStore` interface.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable("in-memory store offline".into()));
        }
        Ok(())
    }

    fn check_puts_available(&self) -> AppResult<()> {
        self.check_available()?;
        if self.failing_puts.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable("in-memory store rejected write".into()));
        }
        Ok(())
    }

    fn write(&self, key: &str, value: &str, ttl_secs: Option<u64>) {
        self.insert_raw(key, value);
        self.record_write(key, ttl_secs);
    }

    fn record_write(&self, key: &str, ttl_secs: Option<u64>) {
        let mut ttls = self.ttls.lock().unwrap();
        match ttl_secs {
            Some(ttl) => ttls.insert(key.to_string(), ttl),
            None => ttls.remove(key),
        };
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.check_available()?;
        Ok(self.raw(key).filter(|value| !value.is_empty()))
    }

    async fn put(&self, key: &str, value: &str) -> AppResult<()> {
        self.check_puts_available()?;
        self.write(key, value, None);
        Ok(())
    }

    async fn put_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> AppResult<()> {
        self.check_puts_available()?;
        self.write(key, value, Some(ttl_secs));
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> AppResult<bool> {
        self.check_available()?;
        {
            // Compare and write under one lock, like the Lua script.
            let mut entries = self.entries.lock().unwrap();
            let current = entries.get(key).filter(|value| !value.is_empty());
            if current.map(String::as_str) != expected {
                return Ok(false);
            }
            entries.insert(key.to_string(), value.to_string());
        }
        self.record_write(key, None);
        Ok(true)
    }

    async fn status(&self) -> AppResult<StoreStatus> {
        self.check_available()?;
        Ok(StoreStatus {
            backend: "memory".to_string(),
            version: None,
            mode: None,
            role: None,
            uptime_secs: None,
            connected_clients: Some(1),
            checked_at: Utc::now(),
        })
    }
}

/// Wraps an `InMemoryKvStore` and, right after the first read of `key`,
/// writes `interfering_value` to it, simulating another process updating the
/// key between our read and our write.
pub struct RacingKvStore {
    inner: Arc<InMemoryKvStore>,
    key: String,
    interfering_value: String,
    fired: AtomicBool,
}

impl RacingKvStore {
    pub fn new(inner: Arc<InMemoryKvStore>, key: &str, interfering_value: &str) -> Self {
        Self {
            inner,
            key: key.to_string(),
            interfering_value: interfering_value.to_string(),
            fired: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl KvStore for RacingKvStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self.inner.get(key).await?;
        if key == self.key && !self.fired.swap(true, Ordering::SeqCst) {
            self.inner.insert_raw(key, &self.interfering_value);
        }
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.put(key, value).await
    }

    async fn put_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> AppResult<()> {
        self.inner.put_with_ttl(key, value, ttl_secs).await
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> AppResult<bool> {
        self.inner.compare_and_swap(key, expected, value).await
    }

    async fn status(&self) -> AppResult<StoreStatus> {
        self.inner.status().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn compare_and_swap_requires_matching_value() {
        let store = InMemoryKvStore::new();

        assert!(store.compare_and_swap("k", None, "v1").await.unwrap());
        assert!(!store.compare_and_swap("k", None, "v2").await.unwrap());
        assert!(!store.compare_and_swap("k", Some("other"), "v2").await.unwrap());
        assert!(store.compare_and_swap("k", Some("v1"), "v2").await.unwrap());
        assert_eq!(store.raw("k").as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn empty_value_reads_as_absent() {
        let store = InMemoryKvStore::with_entries([("k", "")]);

        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.compare_and_swap("k", None, "v").await.unwrap());
    }

    #[tokio::test]
    async fn put_clears_previous_ttl() {
        let store = InMemoryKvStore::new();
        store.put_with_ttl("k", "v", 60).await.unwrap();
        assert_eq!(store.ttl("k"), Some(60));

        store.put("k", "v2").await.unwrap();
        assert_eq!(store.ttl("k"), None);
    }

    #[tokio::test]
    async fn concurrent_swaps_from_same_snapshot_let_exactly_one_win() {
        let store = Arc::new(InMemoryKvStore::with_entries([("k", "v0")]));

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .compare_and_swap("k", Some("v0"), &format!("v{}", i + 1))
                    .await
                    .unwrap()
            }));
        }
        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap() {
                wins += 1;
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn failing_puts_still_allow_reads_and_swaps() {
        let store = InMemoryKvStore::new();
        store.set_failing_puts(true);

        assert!(store.put("k", "v").await.is_err());
        assert!(store.put_with_ttl("k", "v", 60).await.is_err());
        assert!(store.compare_and_swap("k", None, "v").await.unwrap());
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn failing_store_rejects_every_call() {
        let store = InMemoryKvStore::new();
        store.set_failing(true);

        assert!(store.get("k").await.is_err());
        assert!(store.put("k", "v").await.is_err());
        assert!(store.status().await.is_err());
        assert_eq!(store.write_count(), 0);
    }
}
