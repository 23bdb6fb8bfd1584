//! Axum extractors for REST API authentication
//!
//! Every request passes through the token authenticator and the request
//! rate limiter here. An invalid or expired token is rejected even on
//! public endpoints; only the complete absence of a credential is treated
//! as anonymous.

use crate::ApiError;
use crate::state::AppState;

use blog_core::User;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Principal resolved from a bearer token; rejects with 401 when absent
pub struct AuthUser(pub User);

/// Optional principal: `None` for anonymous requests
pub struct MaybeAuthUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header_value = parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok());

            match state.authenticator.authenticate(header_value).await {
                Ok(Some(authenticated)) => {
                    state
                        .rate_limiter
                        .check_user(&authenticated.user.username)?;
                    Ok(MaybeAuthUser(Some(authenticated.user)))
                }
                Ok(None) => {
                    state.rate_limiter.check_anon(&anon_bucket(parts))?;
                    Ok(MaybeAuthUser(None))
                }
                Err(e) => {
                    log::warn!("Authentication failed: {}", e);
                    Err(ApiError::from(e))
                }
            }
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            match MaybeAuthUser::from_request_parts(parts, state).await? {
                MaybeAuthUser(Some(user)) => Ok(AuthUser(user)),
                MaybeAuthUser(None) => Err(ApiError::no_credential()),
            }
        }
    }
}

/// Throttle key for anonymous requests: the first client named by
/// X-Forwarded-For, else one shared bucket.
fn anon_bucket(parts: &Parts) -> String {
    parts
        .headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .unwrap_or_else(|| "anonymous".to_string())
}
