use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Best-effort projection of identity metadata, subordinate to [`crate::User`].
/// At most one per user; `auth_id` mirrors the most recently verified
/// provider subject id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub auth_id: String,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(user_id: Uuid, auth_id: String, username: String, email: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            auth_id,
            username,
            email,
            full_name: None,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }
}
