use crate::{AuthError, RateLimitConfig, RequestRateLimiter};

fn limiter(user_max: u32, anon_max: u32) -> RequestRateLimiter {
    RequestRateLimiter::new(RateLimitConfig {
        user_max_requests: user_max,
        anon_max_requests: anon_max,
        window_secs: 3600,
    })
}

#[test]
fn given_quota_when_exhausted_then_rate_limit_error() {
    let limiter = limiter(3, 1);

    for _ in 0..3 {
        limiter.check_user("alice").unwrap();
    }

    let result = limiter.check_user("alice");
    assert!(matches!(
        result,
        Err(AuthError::RateLimitExceeded { limit: 3, .. })
    ));
}

#[test]
fn given_separate_principals_when_checked_then_quotas_are_independent() {
    let limiter = limiter(1, 1);

    limiter.check_user("alice").unwrap();
    limiter.check_user("bob").unwrap();

    assert!(limiter.check_user("alice").is_err());
    assert!(limiter.check_user("bob").is_err());
}

#[test]
fn given_anon_bucket_when_exhausted_then_user_quota_is_untouched() {
    let limiter = limiter(5, 1);

    limiter.check_anon("10.0.0.1").unwrap();
    assert!(limiter.check_anon("10.0.0.1").is_err());

    limiter.check_user("alice").unwrap();
}
