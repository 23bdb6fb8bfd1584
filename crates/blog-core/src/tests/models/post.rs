use crate::{Post, PostStatus};

use uuid::Uuid;

fn draft() -> Post {
    Post::new(
        Uuid::new_v4(),
        "My First Post".to_string(),
        "my-first-post".to_string(),
        "Hello world".to_string(),
        String::new(),
        PostStatus::Draft,
    )
}

#[test]
fn test_post_new_draft_has_no_published_at() {
    let post = draft();

    assert_eq!(post.status, PostStatus::Draft);
    assert!(post.published_at.is_none());
    assert!(!post.is_published());
    assert_eq!(post.click_count, 0);
}

#[test]
fn test_post_new_published_stamps_published_at() {
    let post = Post::new(
        Uuid::new_v4(),
        "Live".to_string(),
        "live".to_string(),
        "content".to_string(),
        String::new(),
        PostStatus::Published,
    );

    assert!(post.is_published());
    assert!(post.published_at.is_some());
}

#[test]
fn test_publish_stamps_published_at_only_once() {
    let mut post = draft();

    post.publish();
    let first = post.published_at.expect("publish sets published_at");

    post.publish();
    assert_eq!(post.published_at, Some(first));
}
