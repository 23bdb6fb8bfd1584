use crate::ApiError;

use blog_auth::AuthError;

use std::panic::Location;

use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use error_location::ErrorLocation;

fn location() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[test]
fn test_not_found_maps_to_404() {
    let response = ApiError::NotFound {
        message: "missing".into(),
        location: location(),
    }
    .into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_unauthorized_carries_challenge_header() {
    let response = ApiError::no_credential().into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some(r#"Bearer realm="api""#)
    );
}

#[test]
fn test_forbidden_maps_to_403_without_challenge() {
    let response = ApiError::Forbidden {
        message: "not yours".into(),
        location: location(),
    }
    .into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
}

#[test]
fn test_expired_token_keeps_distinct_code() {
    let auth_err = AuthError::TokenExpired {
        location: location(),
    };
    let api_err = ApiError::from(auth_err);

    let response = api_err.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_rate_limit_maps_to_429() {
    let auth_err = AuthError::RateLimitExceeded {
        limit: 4,
        window_secs: 3600,
        location: location(),
    };

    let response = ApiError::from(auth_err).into_response();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}
