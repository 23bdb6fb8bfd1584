use crate::{AuthError, IdentityClaims, JwksClient, Result as AuthErrorResult, bearer};

use blog_core::User;
use blog_db::{DbError, ProfileRepository, UserRepository};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, Validation, decode, decode_header};
use log::warn;
use sqlx::SqlitePool;

/// Challenge for the `WWW-Authenticate` header on rejected requests.
pub const CHALLENGE: &str = r#"Bearer realm="api""#;

#[derive(Debug, Clone)]
pub struct AuthenticatorConfig {
    pub identity_provider_url: String,
    /// How long a fetched key set may be reused.
    pub jwks_ttl: Duration,
    /// Bound on the signing-key fetch.
    pub http_timeout: Duration,
}

/// A verified principal: the local user plus the raw token for downstream
/// use. `profile_warning` carries the swallowed profile-provisioning
/// failure, when one occurred; authentication succeeded regardless.
#[derive(Debug)]
pub struct Authenticated {
    pub user: User,
    pub token: String,
    pub profile_warning: Option<DbError>,
}

/// Verifies bearer tokens against the identity provider's signing keys and
/// resolves (creating if necessary) the local user and profile records.
pub struct TokenAuthenticator {
    jwks: JwksClient,
    users: UserRepository,
    profiles: ProfileRepository,
    validation: Validation,
}

impl TokenAuthenticator {
    #[track_caller]
    pub fn new(config: AuthenticatorConfig, pool: SqlitePool) -> AuthErrorResult<Self> {
        let jwks = JwksClient::new(
            &config.identity_provider_url,
            config.jwks_ttl,
            config.http_timeout,
        )?;

        let mut validation = Validation::new(Algorithm::RS256);
        // The provider issues tokens for multiple audiences; this system
        // deliberately does not constrain the aud claim.
        validation.validate_aud = false;
        validation.leeway = 0;

        Ok(Self {
            jwks,
            users: UserRepository::new(pool.clone()),
            profiles: ProfileRepository::new(pool),
            validation,
        })
    }

    /// Authenticate one request.
    ///
    /// `Ok(None)` means no credential was supplied and the caller may
    /// proceed anonymously; the store is never touched on that path.
    /// `Ok(Some(_))` is a fully provisioned principal. Every `Err` is a
    /// hard rejection.
    pub async fn authenticate(
        &self,
        header: Option<&str>,
    ) -> AuthErrorResult<Option<Authenticated>> {
        let Some(token) = bearer::parse(header) else {
            return Ok(None);
        };

        let claims = self.verify(token).await?;
        claims.validate()?;

        let username = claims.username().to_string();
        let email = claims.email_or_empty().to_string();

        let user = self
            .users
            .upsert_by_username(&username, &email)
            .await
            .map_err(|source| AuthError::UserProvisioningFailed {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        // The profile is a convenience projection, not the authority for
        // identity: a failure here is logged and reported alongside the
        // principal, never raised.
        let profile_warning = match self
            .profiles
            .upsert_for_user(user.id, &claims.sub, &username, &email)
            .await
        {
            Ok(_) => None,
            Err(e) => {
                warn!("profile provisioning failed for '{}': {}", username, e);
                Some(e)
            }
        };

        Ok(Some(Authenticated {
            user,
            token: token.to_string(),
            profile_warning,
        }))
    }

    async fn verify(&self, token: &str) -> AuthErrorResult<IdentityClaims> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidToken {
            message: format!("malformed token header: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let kid = header.kid.ok_or_else(|| AuthError::InvalidToken {
            message: "token header missing key id".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let key = self.jwks.decoding_key(&kid).await?;

        let token_data =
            decode::<IdentityClaims>(token, &key, &self.validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        Ok(token_data.claims)
    }
}
