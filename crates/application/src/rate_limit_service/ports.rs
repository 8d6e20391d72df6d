use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use himig_core::AppResult;

/// Storage port for rate limit windows.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Records one request for the given key as a single atomic step.
    ///
    /// If no window exists or the stored window has reached its reset time,
    /// a fresh window `[now, now + window)` with a zero count is started.
    /// When the count already equals `max_requests` the request is refused
    /// and the count is left untouched; otherwise the count is incremented.
    async fn record_request(
        &self,
        key: &str,
        max_requests: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> AppResult<WindowUsage>;

    /// Removes windows whose reset time is at or before `now`.
    ///
    /// Returns the number of removed entries.
    async fn remove_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Outcome of recording one request against a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowUsage {
    /// Whether the request fit in the window's budget.
    pub admitted: bool,
    /// Requests counted in the window after this call.
    pub count: u32,
    /// Absolute time at which the window expires.
    pub reset_at: DateTime<Utc>,
}
