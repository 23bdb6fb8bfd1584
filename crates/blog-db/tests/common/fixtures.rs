use blog_core::{Comment, Post, PostStatus, Tag, User};
use blog_db::{CommentRepository, PostRepository, TagRepository, UserRepository};

use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn create_test_user(pool: &SqlitePool, username: &str) -> User {
    UserRepository::new(pool.clone())
        .upsert_by_username(username, &format!("{}@example.com", username))
        .await
        .expect("Failed to create test user")
}

pub async fn create_test_post(pool: &SqlitePool, author_id: Uuid, slug: &str) -> Post {
    let post = Post::new(
        author_id,
        format!("Post {}", slug),
        slug.to_string(),
        "Some content".to_string(),
        String::new(),
        PostStatus::Published,
    );
    PostRepository::new(pool.clone())
        .create(&post)
        .await
        .expect("Failed to create test post");
    post
}

pub async fn create_test_tag(pool: &SqlitePool, name: &str, slug: &str) -> Tag {
    let tag = Tag::new(name.to_string(), slug.to_string());
    TagRepository::new(pool.clone())
        .create(&tag)
        .await
        .expect("Failed to create test tag");
    tag
}

pub async fn create_test_comment(pool: &SqlitePool, post_id: Uuid, author_id: Uuid) -> Comment {
    let comment = Comment::new(post_id, author_id, "A test comment".to_string());
    CommentRepository::new(pool.clone())
        .create(&comment)
        .await
        .expect("Failed to create test comment");
    comment
}
