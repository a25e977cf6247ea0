//! Port for the shared key-value store that holds the waitlist and token records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app_error::AppResult;

/// Liveness snapshot reported by `/healthz`.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub backend: String,
    pub version: Option<String>,
    pub mode: Option<String>,
    pub role: Option<String>,
    pub uptime_secs: Option<u64>,
    pub connected_clients: Option<u64>,
    pub checked_at: DateTime<Utc>,
}

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Returns `Ok(None)` when the key is absent or holds an empty value.
    /// Transport failures are errors, never `None`.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Unconditional overwrite.
    async fn put(&self, key: &str, value: &str) -> AppResult<()>;

    /// Overwrite with an expiry.
    async fn put_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> AppResult<()>;

    /// Atomically writes `value` only if the key currently holds `expected`
    /// (`None` meaning the key is absent). Returns `false` if the stored value
    /// changed since it was read.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> AppResult<bool>;

    async fn status(&self) -> AppResult<StoreStatus>;
}
