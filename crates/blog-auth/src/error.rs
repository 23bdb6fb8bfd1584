use blog_db::DbError;

use error_location::ErrorLocation;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("No signing key matches kid '{kid}' {location}")]
    NoMatchingKey { kid: String, location: ErrorLocation },

    #[error("Identity provider unreachable: {message} {location}")]
    ProviderUnreachable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token missing sub claim {location}")]
    MissingSubjectClaim { location: ErrorLocation },

    #[error("Could not provision user: {source} {location}")]
    UserProvisioningFailed {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded: {limit} requests per {window_secs}s {location}")]
    RateLimitExceeded {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code for client responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::InvalidToken { .. } | Self::JwtDecode { .. } | Self::NoMatchingKey { .. } => {
                "INVALID_TOKEN"
            }
            Self::ProviderUnreachable { .. } => "PROVIDER_UNREACHABLE",
            Self::MissingSubjectClaim { .. } => "MISSING_SUBJECT_CLAIM",
            Self::UserProvisioningFailed { .. } => "USER_PROVISIONING_FAILED",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
