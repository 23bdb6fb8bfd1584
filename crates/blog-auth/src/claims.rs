use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Decoded token payload. Exists only for the duration of one request's
/// authentication step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject: the provider's stable, opaque identifier
    pub sub: String,
    /// Optional provider-asserted email
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration timestamp (Unix)
    pub exp: i64,
}

impl IdentityClaims {
    /// Validate claims after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::MissingSubjectClaim {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Local username: the email when the provider asserted one, else the
    /// subject id.
    pub fn username(&self) -> &str {
        match self.email.as_deref() {
            Some(email) if !email.is_empty() => email,
            _ => &self.sub,
        }
    }

    /// Claim email as stored locally; absent means empty.
    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}
