use crate::PostDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostDto>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}
