use blog_core::Profile;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProfileDto {
    pub auth_id: String,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: i64,
}

impl From<Profile> for ProfileDto {
    fn from(p: Profile) -> Self {
        Self {
            auth_id: p.auth_id,
            username: p.username,
            email: p.email,
            full_name: p.full_name,
            avatar_url: p.avatar_url,
            created_at: p.created_at.timestamp(),
        }
    }
}
