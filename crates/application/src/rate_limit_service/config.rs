use chrono::Duration;

/// Key shared by every client that carries no identity information.
pub const ANONYMOUS_KEY: &str = "anonymous";

/// Identity-deriving information extracted from an inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFingerprint {
    /// Authenticated user identifier, when one was asserted.
    pub user_id: Option<String>,
    /// Network origin derived from forwarding headers.
    pub origin: Option<String>,
}

impl ClientFingerprint {
    /// Creates a fingerprint from optional user and origin values.
    #[must_use]
    pub fn new(user_id: Option<String>, origin: Option<String>) -> Self {
        Self { user_id, origin }
    }
}

/// How a policy turns a fingerprint into a counter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Prefer the user identifier, fall back to the network origin.
    UserThenOrigin,
    /// Use the network origin only.
    OriginOnly,
}

/// Configuration for a rate limit policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Prefix isolating this policy's counters (e.g., "generation", "api").
    pub category: String,
    /// Maximum number of requests admitted in one window.
    pub max_requests: u32,
    /// Window length.
    pub window: Duration,
    /// Key derivation used for this policy.
    pub key_strategy: KeyStrategy,
}

impl RateLimitPolicy {
    /// Creates a new rate limit policy.
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        max_requests: u32,
        window: Duration,
        key_strategy: KeyStrategy,
    ) -> Self {
        Self {
            category: category.into(),
            max_requests,
            window,
            key_strategy,
        }
    }

    /// Music generation: 10 requests per 15 minutes, keyed by user then origin.
    #[must_use]
    pub fn generation() -> Self {
        Self::new(
            "generation",
            10,
            Duration::minutes(15),
            KeyStrategy::UserThenOrigin,
        )
    }

    /// General API traffic: 100 requests per 15 minutes, keyed by origin.
    #[must_use]
    pub fn api() -> Self {
        Self::new("api", 100, Duration::minutes(15), KeyStrategy::OriginOnly)
    }

    /// Authentication attempts: 5 requests per 15 minutes, keyed by origin.
    #[must_use]
    pub fn auth() -> Self {
        Self::new("auth", 5, Duration::minutes(15), KeyStrategy::OriginOnly)
    }

    /// Returns the composite store key `"{category}:{client}"` for a fingerprint.
    ///
    /// Clients without usable identity all share the anonymous bucket.
    #[must_use]
    pub fn key_for(&self, fingerprint: &ClientFingerprint) -> String {
        let user_id = match self.key_strategy {
            KeyStrategy::UserThenOrigin => non_blank(fingerprint.user_id.as_deref()),
            KeyStrategy::OriginOnly => None,
        };
        let client = user_id
            .or_else(|| non_blank(fingerprint.origin.as_deref()))
            .unwrap_or(ANONYMOUS_KEY);

        format!("{}:{client}", self.category)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
