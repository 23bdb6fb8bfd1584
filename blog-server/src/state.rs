use blog_auth::{RequestRateLimiter, TokenAuthenticator};
use blog_config::ApiConfig;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared application state for REST handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub authenticator: Arc<TokenAuthenticator>,
    pub rate_limiter: Arc<RequestRateLimiter>,
    pub api_config: ApiConfig,
}
