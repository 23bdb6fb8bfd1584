use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;
use std::time::{Duration, Instant};

use error_location::ErrorLocation;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::JwkSet;
use tokio::sync::RwLock;

/// Fetches and caches the identity provider's published signing keys.
///
/// The whole key set is cached with a TTL. A lookup that misses (stale
/// cache or unknown kid) re-fetches from the provider; a fetch failure
/// fails closed rather than serving stale keys.
pub struct JwksClient {
    http: reqwest::Client,
    jwks_url: String,
    ttl: Duration,
    cache: RwLock<Option<CachedKeys>>,
}

struct CachedKeys {
    fetched_at: Instant,
    keys: JwkSet,
}

impl CachedKeys {
    fn fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

impl JwksClient {
    #[track_caller]
    pub fn new(
        identity_provider_url: &str,
        ttl: Duration,
        http_timeout: Duration,
    ) -> AuthErrorResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(http_timeout)
            .build()
            .map_err(|e| AuthError::ProviderUnreachable {
                message: format!("failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let jwks_url = format!(
            "{}/auth/v1/.well-known/jwks.json",
            identity_provider_url.trim_end_matches('/')
        );

        Ok(Self {
            http,
            jwks_url,
            ttl,
            cache: RwLock::new(None),
        })
    }

    /// Resolve the decoding key for `kid`.
    pub async fn decoding_key(&self, kid: &str) -> AuthErrorResult<DecodingKey> {
        // Fast path: fresh cache holds the key (read lock)
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref()
                && cached.fresh(self.ttl)
                && let Some(jwk) = cached.keys.find(kid)
            {
                return key_from_jwk(jwk);
            }
        }

        // Slow path: re-fetch (write lock for the entire operation)
        let mut cache = self.cache.write().await;

        // Double-check: another request might have refreshed the set while
        // we waited for the write lock
        if let Some(cached) = cache.as_ref()
            && cached.fresh(self.ttl)
            && let Some(jwk) = cached.keys.find(kid)
        {
            return key_from_jwk(jwk);
        }

        let keys = self.fetch().await?;
        *cache = Some(CachedKeys {
            fetched_at: Instant::now(),
            keys,
        });

        match cache.as_ref().and_then(|c| c.keys.find(kid)) {
            Some(jwk) => key_from_jwk(jwk),
            None => Err(AuthError::NoMatchingKey {
                kid: kid.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    async fn fetch(&self) -> AuthErrorResult<JwkSet> {
        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::ProviderUnreachable {
                message: format!("GET {} failed: {}", self.jwks_url, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::ProviderUnreachable {
                message: format!("invalid JWKS payload from {}: {}", self.jwks_url, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

#[track_caller]
fn key_from_jwk(jwk: &jsonwebtoken::jwk::Jwk) -> AuthErrorResult<DecodingKey> {
    DecodingKey::from_jwk(jwk).map_err(|e| AuthError::InvalidToken {
        message: format!("unusable signing key: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}
