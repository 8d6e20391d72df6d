use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use himig_core::AppResult;

use super::config::{ClientFingerprint, RateLimitPolicy};
use super::ports::RateLimitStore;
use crate::Clock;

/// Admission decision plus the accounting metadata reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitVerdict {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Window budget of the applied policy.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// Absolute time at which the window resets.
    pub reset_at: DateTime<Utc>,
    /// Whole seconds until the window resets, rounded up; zero when allowed.
    pub retry_after_seconds: u64,
}

/// Application service for rate limiting.
#[derive(Clone)]
pub struct RateLimitService {
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
}

impl RateLimitService {
    /// Creates a new rate limit service.
    #[must_use]
    pub fn new(store: Arc<dyn RateLimitStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Records a request and decides whether it is within the policy budget.
    ///
    /// This never fails. If the store is unreachable the request is admitted
    /// and the failure is logged.
    pub async fn check(
        &self,
        policy: &RateLimitPolicy,
        fingerprint: &ClientFingerprint,
    ) -> RateLimitVerdict {
        let key = policy.key_for(fingerprint);
        let now = self.clock.now();

        let usage = match self
            .store
            .record_request(&key, policy.max_requests, policy.window, now)
            .await
        {
            Ok(usage) => usage,
            Err(error) => {
                warn!(
                    category = %policy.category,
                    error = %error,
                    "rate limit store unavailable, admitting request"
                );
                return RateLimitVerdict {
                    allowed: true,
                    limit: policy.max_requests,
                    remaining: policy.max_requests.saturating_sub(1),
                    reset_at: now + policy.window,
                    retry_after_seconds: 0,
                };
            }
        };

        if !usage.admitted {
            let retry_after_seconds = seconds_until(now, usage.reset_at);
            debug!(
                category = %policy.category,
                key = %key,
                retry_after_seconds,
                "rate limit exceeded"
            );
            return RateLimitVerdict {
                allowed: false,
                limit: policy.max_requests,
                remaining: 0,
                reset_at: usage.reset_at,
                retry_after_seconds,
            };
        }

        RateLimitVerdict {
            allowed: true,
            limit: policy.max_requests,
            remaining: policy.max_requests.saturating_sub(usage.count),
            reset_at: usage.reset_at,
            retry_after_seconds: 0,
        }
    }

    /// Removes expired windows. Intended for the periodic sweeper.
    pub async fn sweep_expired(&self) -> AppResult<u64> {
        self.store.remove_expired(self.clock.now()).await
    }
}

fn seconds_until(now: DateTime<Utc>, reset_at: DateTime<Utc>) -> u64 {
    let millis = u64::try_from((reset_at - now).num_milliseconds()).unwrap_or(0);
    millis.div_ceil(1000)
}
