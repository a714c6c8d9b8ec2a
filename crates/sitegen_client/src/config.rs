//! Client tuning knobs.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_MIN_IDEA_CHARS: usize = 4;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Settings for an API client and its generator session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and port of the API, without the `/api` prefix.
    pub base_url: String,
    /// Quiet period after the last keystroke before a lookup fires.
    pub debounce_delay: Duration,
    /// Trimmed inputs shorter than this never trigger a lookup.
    pub min_idea_chars: usize,
    /// Freshness window for cached server results.
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_delay: DEFAULT_DEBOUNCE_DELAY,
            min_idea_chars: DEFAULT_MIN_IDEA_CHARS,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
