use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ANON_MAX_REQUESTS, DEFAULT_RATE_LIMIT_WINDOW_SECS,
    DEFAULT_USER_MAX_REQUESTS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum requests per window for authenticated principals
    pub user_max_requests: u32,
    /// Maximum requests per window for anonymous clients
    pub anon_max_requests: u32,
    /// Window duration in seconds
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            user_max_requests: DEFAULT_USER_MAX_REQUESTS,
            anon_max_requests: DEFAULT_ANON_MAX_REQUESTS,
            window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.user_max_requests == 0 || self.anon_max_requests == 0 {
            return Err(ConfigError::rate_limit(
                "rate_limit request maximums must be greater than zero",
            ));
        }

        if self.window_secs == 0 {
            return Err(ConfigError::rate_limit(
                "rate_limit.window_secs must be greater than zero",
            ));
        }

        Ok(())
    }
}
