//! Redis-backed rate limit store shared by every API process.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use himig_application::{RateLimitStore, WindowUsage};
use himig_core::{AppError, AppResult};
use redis::Script;

const RECORD_REQUEST_SCRIPT: &str = r#"
local key = KEYS[1]
local max_requests = tonumber(ARGV[1])
local window_ms = tonumber(ARGV[2])
local now_ms = tonumber(ARGV[3])

local count = tonumber(redis.call('HGET', key, 'count'))
local reset_at = tonumber(redis.call('HGET', key, 'reset_at'))

if count == nil or reset_at == nil or reset_at <= now_ms then
  count = 0
  reset_at = now_ms + window_ms
  redis.call('HSET', key, 'count', 0, 'reset_at', reset_at)
  redis.call('PEXPIREAT', key, reset_at)
end

if count >= max_requests then
  return {0, count, reset_at}
end

count = redis.call('HINCRBY', key, 'count', 1)
return {1, count, reset_at}
"#;

/// Redis implementation of the rate limit store port.
#[derive(Clone)]
pub struct RedisRateLimitStore {
    client: redis::Client,
    key_prefix: String,
}

impl RedisRateLimitStore {
    /// Creates a store with a configured Redis client and key prefix.
    #[must_use]
    pub fn new(client: redis::Client, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    fn key_for(&self, key: &str) -> String {
        format!("{}:{key}", self.key_prefix)
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn record_request(
        &self,
        key: &str,
        max_requests: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> AppResult<WindowUsage> {
        let window_ms = window.num_milliseconds();
        if window_ms <= 0 {
            return Err(AppError::Validation(
                "rate limit window must be greater than zero".to_owned(),
            ));
        }

        let mut connection = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))?;

        let (admitted, count, reset_at_ms): (i64, i64, i64) = Script::new(RECORD_REQUEST_SCRIPT)
            .key(self.key_for(key))
            .arg(max_requests)
            .arg(window_ms)
            .arg(now.timestamp_millis())
            .invoke_async(&mut connection)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to record redis rate limit request: {error}"))
            })?;

        let count = u32::try_from(count)
            .map_err(|error| AppError::Internal(format!("invalid redis request count: {error}")))?;
        let reset_at = DateTime::from_timestamp_millis(reset_at_ms).ok_or_else(|| {
            AppError::Internal(format!("invalid redis window reset timestamp: {reset_at_ms}"))
        })?;

        Ok(WindowUsage {
            admitted: admitted == 1,
            count,
            reset_at,
        })
    }

    async fn remove_expired(&self, _now: DateTime<Utc>) -> AppResult<u64> {
        // Windows carry PEXPIREAT at their reset time, so Redis evicts them itself.
        Ok(0)
    }
}
