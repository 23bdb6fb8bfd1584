pub mod authenticator;
pub mod bearer;
pub mod claims;
pub mod error;
pub mod jwks_client;
pub mod rate_limit_config;
pub mod request_rate_limiter;

pub use authenticator::{Authenticated, AuthenticatorConfig, CHALLENGE, TokenAuthenticator};
pub use claims::IdentityClaims;
pub use error::{AuthError, Result};
pub use jwks_client::JwksClient;
pub use rate_limit_config::RateLimitConfig;
pub use request_rate_limiter::RequestRateLimiter;

#[cfg(test)]
mod tests;
