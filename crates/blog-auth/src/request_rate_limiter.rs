use crate::{AuthError, RateLimitConfig, Result as AuthErrorResult};

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::keyed::DefaultKeyedStateStore,
};

type KeyedLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Per-principal fixed-window request limiter. Authenticated requests are
/// keyed by username, anonymous requests by a caller-chosen bucket.
pub struct RequestRateLimiter {
    users: KeyedLimiter,
    anon: KeyedLimiter,
    config: RateLimitConfig,
}

impl RequestRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            users: RateLimiter::keyed(quota(config.user_max_requests, config.window_secs)),
            anon: RateLimiter::keyed(quota(config.anon_max_requests, config.window_secs)),
            config,
        }
    }

    /// Check a request from an authenticated principal
    #[track_caller]
    pub fn check_user(&self, username: &str) -> AuthErrorResult<()> {
        self.users
            .check_key(&username.to_string())
            .map_err(|_| AuthError::RateLimitExceeded {
                limit: self.config.user_max_requests,
                window_secs: self.config.window_secs,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Check an anonymous request
    #[track_caller]
    pub fn check_anon(&self, bucket: &str) -> AuthErrorResult<()> {
        self.anon
            .check_key(&bucket.to_string())
            .map_err(|_| AuthError::RateLimitExceeded {
                limit: self.config.anon_max_requests,
                window_secs: self.config.window_secs,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl Default for RequestRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

/// Replenish one permit per window/max with the full window as burst, so
/// sub-1-per-second quotas like "4 per hour" still meter correctly.
fn quota(max_requests: u32, window_secs: u64) -> Quota {
    let max = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::new(1).unwrap());
    let window = Duration::from_secs(window_secs.max(1));

    Quota::with_period(window / max.get())
        .unwrap_or_else(|| Quota::per_second(NonZeroU32::new(1).unwrap()))
        .allow_burst(max)
}
