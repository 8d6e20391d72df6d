use std::time::Duration;

use himig_application::RateLimitService;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Spawns the background task that evicts expired rate limit windows.
///
/// The caller owns the handle and aborts it at shutdown. `interval` must be
/// non-zero.
pub fn spawn_rate_limit_sweeper(service: RateLimitService, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match service.sweep_expired().await {
                Ok(0) => {}
                Ok(removed) => debug!(removed, "swept expired rate limit windows"),
                Err(error) => warn!(error = %error, "rate limit sweep failed"),
            }
        }
    })
}
