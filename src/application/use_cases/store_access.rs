//! Read helpers shared by the use cases.

use serde::de::DeserializeOwned;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::kv_store::KvStore,
    domain::entities::store_error_policy::StoreErrorPolicy,
};

const MAX_PAYLOAD_LOG_LEN: usize = 200;

/// Reads a key, applying the configured store error policy.
///
/// Under `Lenient`, an unreachable store is logged and reported as an absent
/// key.
pub async fn read_value(
    store: &dyn KvStore,
    key_label: &str,
    key: &str,
    policy: StoreErrorPolicy,
) -> AppResult<Option<String>> {
    match store.get(key).await {
        Ok(value) => Ok(value),
        Err(AppError::StoreUnavailable(reason)) if policy.is_lenient() => {
            tracing::warn!(
                key = key_label,
                reason = %reason,
                "Store read failed, treating key as absent"
            );
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Decodes a stored payload, logging and returning `None` on failure.
pub fn decode_or_warn<T: DeserializeOwned>(raw: &str, key_label: &str) -> Option<T> {
    serde_json::from_str(raw)
        .map_err(|err| {
            let truncated = if raw.len() > MAX_PAYLOAD_LOG_LEN {
                let mut end = MAX_PAYLOAD_LOG_LEN;
                while !raw.is_char_boundary(end) {
                    end -= 1;
                }
                format!("{}...", &raw[..end])
            } else {
                raw.to_string()
            };

            tracing::warn!(
                key = key_label,
                raw = %truncated,
                error = %err,
                "Failed to decode stored payload"
            );
        })
        .ok()
}
