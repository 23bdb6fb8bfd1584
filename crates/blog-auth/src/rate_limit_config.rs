/// Configuration for per-principal request throttling
#[derive(Debug, Clone)]
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
            user_max_requests: 1000,
            anon_max_requests: 100,
            window_secs: 3600, // per hour
        }
    }
}
