use crate::{AuthorDto, TagDto};

use blog_core::{Post, Tag, User};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PostDto {
    pub id: String,
    pub author: AuthorDto,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub status: String,
    pub published_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub click_count: i64,
    pub tags: Vec<TagDto>,
}

impl PostDto {
    pub fn new(post: Post, author: User, tags: Vec<Tag>) -> Self {
        Self {
            id: post.id.to_string(),
            author: author.into(),
            title: post.title,
            slug: post.slug,
            content: post.content,
            excerpt: post.excerpt,
            status: post.status.as_str().to_string(),
            published_at: post.published_at.map(|dt| dt.timestamp()),
            created_at: post.created_at.timestamp(),
            updated_at: post.updated_at.timestamp(),
            click_count: post.click_count,
            tags: tags.into_iter().map(TagDto::from).collect(),
        }
    }
}
