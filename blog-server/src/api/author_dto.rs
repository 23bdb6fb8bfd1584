use blog_core::User;

use serde::Serialize;

/// Author projection embedded in post and comment payloads
#[derive(Debug, Serialize)]
pub struct AuthorDto {
    pub id: String,
    pub username: String,
}

impl From<User> for AuthorDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username,
        }
    }
}
