//! Rate limiting ports and application service.
//!
//! Implements a fixed-window admission counter per client key. Each policy
//! owns a category prefix so several policies can share one store without
//! their counters interfering.

mod config;
mod ports;
mod service;


pub use config::{ANONYMOUS_KEY, ClientFingerprint, KeyStrategy, RateLimitPolicy};
pub use ports::{RateLimitStore, WindowUsage};
pub use service::{RateLimitService, RateLimitVerdict};
