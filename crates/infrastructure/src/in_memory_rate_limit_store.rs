use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use himig_application::{RateLimitStore, WindowUsage};
use himig_core::AppResult;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy)]
struct RateLimitWindow {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Process-local rate limit store.
///
/// The whole check-then-increment runs under one lock, so the per-window
/// budget holds under parallel callers.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, RateLimitWindow>>,
}

impl InMemoryRateLimitStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of tracked windows, expired ones included.
    pub async fn len(&self) -> usize {
        self.windows.lock().await.len()
    }

    /// Returns whether no windows are tracked.
    pub async fn is_empty(&self) -> bool {
        self.windows.lock().await.is_empty()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn record_request(
        &self,
        key: &str,
        max_requests: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> AppResult<WindowUsage> {
        let mut windows = self.windows.lock().await;
        let fresh = RateLimitWindow {
            count: 0,
            reset_at: now + window,
        };

        let entry = windows.entry(key.to_owned()).or_insert(fresh);
        if entry.reset_at <= now {
            *entry = fresh;
        }

        if entry.count >= max_requests {
            return Ok(WindowUsage {
                admitted: false,
                count: entry.count,
                reset_at: entry.reset_at,
            });
        }

        entry.count += 1;
        Ok(WindowUsage {
            admitted: true,
            count: entry.count,
            reset_at: entry.reset_at,
        })
    }

    async fn remove_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, window| window.reset_at > now);

        Ok(u64::try_from(before - windows.len()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, Utc};
    use himig_application::RateLimitStore;

    use super::InMemoryRateLimitStore;

    fn epoch_plus(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap_or_default()
    }

    #[tokio::test]
    async fn denied_requests_do_not_consume_budget() {
        let store = InMemoryRateLimitStore::new();
        let window = Duration::minutes(1);

        for _ in 0..2 {
            let usage = store.record_request("k", 2, window, epoch_plus(0)).await;
            assert!(matches!(usage, Ok(usage) if usage.admitted));
        }

        for _ in 0..3 {
            let usage = store.record_request("k", 2, window, epoch_plus(1)).await;
            assert!(matches!(usage, Ok(usage) if !usage.admitted && usage.count == 2));
        }
    }

    #[tokio::test]
    async fn expired_window_is_reinitialized_on_access() {
        let store = InMemoryRateLimitStore::new();
        let window = Duration::seconds(30);

        let first = store.record_request("k", 1, window, epoch_plus(0)).await;
        assert!(matches!(first, Ok(usage) if usage.reset_at == epoch_plus(30)));

        let renewed = store.record_request("k", 1, window, epoch_plus(30)).await;
        assert!(matches!(
            renewed,
            Ok(usage) if usage.admitted && usage.count == 1 && usage.reset_at == epoch_plus(60)
        ));
    }

    #[tokio::test]
    async fn sweep_keeps_active_windows() {
        let store = InMemoryRateLimitStore::new();

        assert!(
            store
                .record_request("short", 5, Duration::seconds(10), epoch_plus(0))
                .await
                .is_ok()
        );
        assert!(
            store
                .record_request("long", 5, Duration::seconds(100), epoch_plus(0))
                .await
                .is_ok()
        );

        assert!(matches!(store.remove_expired(epoch_plus(9)).await, Ok(0)));
        assert!(matches!(store.remove_expired(epoch_plus(10)).await, Ok(1)));
        assert_eq!(store.len().await, 1);

        let usage = store
            .record_request("long", 5, Duration::seconds(100), epoch_plus(11))
            .await;
        assert!(matches!(usage, Ok(usage) if usage.count == 2));

        assert!(matches!(store.remove_expired(epoch_plus(500)).await, Ok(1)));
        assert!(store.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_callers_never_exceed_budget() {
        let store = Arc::new(InMemoryRateLimitStore::new());
        let now = epoch_plus(0);

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .record_request("shared", 10, Duration::minutes(15), now)
                        .await
                        .map(|usage| usage.admitted)
                        .unwrap_or(false)
                })
            })
            .collect();

        let mut admitted = 0;
        for task in tasks {
            if matches!(task.await, Ok(true)) {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 10);
    }
}
