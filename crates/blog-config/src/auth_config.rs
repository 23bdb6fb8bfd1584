use crate::{ConfigError, ConfigErrorResult, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_JWKS_TTL_SECS};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL of the identity provider whose signing keys verify bearer
    /// tokens, e.g. `https://myproject.supabase.co`
    pub identity_provider_url: String,
    /// How long a fetched key set may be reused, in seconds
    pub jwks_ttl_secs: u64,
    /// Bound on the signing-key fetch, in seconds
    pub http_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            identity_provider_url: String::new(),
            jwks_ttl_secs: DEFAULT_JWKS_TTL_SECS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.identity_provider_url.is_empty() {
            return Err(ConfigError::auth(
                "auth.identity_provider_url must be set (BLOG_AUTH_IDENTITY_PROVIDER_URL)",
            ));
        }

        if !self.identity_provider_url.starts_with("http://")
            && !self.identity_provider_url.starts_with("https://")
        {
            return Err(ConfigError::auth(
                "auth.identity_provider_url must be an http(s) URL",
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(ConfigError::auth(
                "auth.http_timeout_secs must be greater than zero",
            ));
        }

        Ok(())
    }
}
