use crate::{CommentDto, PostDto};

use serde::Serialize;

/// Retrieve payload: the post plus its approved comments
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: PostDto,
    pub comments: Vec<CommentDto>,
}
