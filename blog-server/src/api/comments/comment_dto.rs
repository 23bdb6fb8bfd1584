use crate::AuthorDto;

use blog_core::{Comment, User};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CommentDto {
    pub id: String,
    pub post_id: String,
    /// None once the author account is gone
    pub author: Option<AuthorDto>,
    pub content: String,
    pub created_at: i64,
    pub approved: bool,
}

impl CommentDto {
    pub fn new(comment: Comment, author: Option<User>) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author: author.map(AuthorDto::from),
            content: comment.content,
            created_at: comment.created_at.timestamp(),
            approved: comment.approved,
        }
    }
}
