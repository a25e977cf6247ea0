use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use redis::{AsyncCommands, Script, aio::ConnectionManager};
use tracing::info;

use super::InfraError;
use crate::{
    app_error::{AppError, AppResult},
    application::ports::kv_store::{KvStore, StoreStatus},
};

/// Lua script for an atomic conditional write.
/// ARGV[1] is "1" when a value is expected, "0" when the key must be absent.
/// An empty stored string counts as absent.
/// Returns 1 if the write happened, 0 otherwise.
const COMPARE_AND_SWAP_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
if current == '' then
    current = false
end
if ARGV[1] == '1' then
    if current ~= ARGV[2] then
        return 0
    end
elseif current then
    return 0
end
redis.call('SET', KEYS[1], ARGV[3])
return 1
"#;

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        tracing::error!(error = %err, "Redis command failed");
        AppError::StoreUnavailable("key-value store command failed".into())
    }
}

/// Redis-backed key-value store shared by all use cases.
#[derive(Clone)]
pub struct RedisKvStore {
    manager: ConnectionManager,
    cas_script: Script,
}

impl RedisKvStore {
    pub async fn new(redis_url: &str) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url).map_err(InfraError::RedisConnection)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(InfraError::RedisConnection)?;

        info!("Connected to Redis");
        Ok(Self {
            manager,
            cas_script: Script::new(COMPARE_AND_SWAP_SCRIPT),
        })
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = conn.get(key).await?;
        Ok(raw.filter(|value| !value.is_empty()))
    }

    async fn put(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn put_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.set_ex(key, value, ttl_secs.max(1)).await?;
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> AppResult<bool> {
        let mut conn = self.manager.clone();
        let (flag, expected) = match expected {
            Some(expected) => ("1", expected),
            None => ("0", ""),
        };

        let written: i64 = self
            .cas_script
            .key(key)
            .arg(flag)
            .arg(expected)
            .arg(value)
            .invoke_async(&mut conn)
            .await?;

        Ok(written == 1)
    }

    async fn status(&self) -> AppResult<StoreStatus> {
        let mut conn = self.manager.clone();

        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        let info: String = redis::cmd("INFO").query_async(&mut conn).await?;

        Ok(status_from_info(&info))
    }
}

/// Parses the `field:value` lines of an `INFO` reply.
pub fn parse_info(raw: &str) -> HashMap<String, String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .collect()
}

fn status_from_info(raw: &str) -> StoreStatus {
    let fields = parse_info(raw);

    StoreStatus {
        backend: "redis".to_string(),
        version: fields.get("redis_version").cloned(),
        mode: fields.get("redis_mode").cloned(),
        role: fields.get("role").cloned(),
        uptime_secs: fields
            .get("uptime_in_seconds")
            .and_then(|v| v.parse().ok()),
        connected_clients: fields
            .get("connected_clients")
            .and_then(|v| v.parse().ok()),
        checked_at: Utc::now(),
    }
}
