use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local identity record, provisioned on first successful authentication.
/// `username` is the identity provider's email when one is known, else the
/// provider's opaque subject id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// May be empty when the provider asserted no email.
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            created_at: Utc::now(),
        }
    }
}
