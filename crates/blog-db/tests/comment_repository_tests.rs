mod common;

use common::{create_test_comment, create_test_pool, create_test_post, create_test_user};

use blog_core::Comment;
use blog_db::CommentRepository;

use googletest::prelude::*;

#[tokio::test]
async fn given_valid_comment_when_created_then_can_be_found_by_id() {
    let pool = create_test_pool().await;
    let user = create_test_user(&pool, "alice@example.com").await;
    let post = create_test_post(&pool, user.id, "commented").await;
    let repo = CommentRepository::new(pool.clone());

    let comment = create_test_comment(&pool, post.id, user.id).await;

    let found = repo.find_by_id(comment.id).await.unwrap();
    assert_that!(found, some(anything()));
    let found = found.unwrap();
    assert_that!(found.post_id, eq(post.id));
    assert_that!(found.author_id, some(eq(user.id)));
    assert_that!(found.approved, eq(true));
}

#[tokio::test]
async fn given_unapproved_comment_when_listed_then_it_is_excluded() {
    let pool = create_test_pool().await;
    let user = create_test_user(&pool, "alice@example.com").await;
    let post = create_test_post(&pool, user.id, "moderated").await;
    let repo = CommentRepository::new(pool.clone());

    create_test_comment(&pool, post.id, user.id).await;
    let mut hidden = Comment::new(post.id, user.id, "spam".to_string());
    hidden.approved = false;
    repo.create(&hidden).await.unwrap();

    let listed = repo.find_approved_by_post(post.id).await.unwrap();

    assert_that!(listed.len(), eq(1));
    assert_that!(listed[0].content, eq("A test comment"));
}

#[tokio::test]
async fn given_comments_when_listed_then_oldest_first() {
    let pool = create_test_pool().await;
    let user = create_test_user(&pool, "alice@example.com").await;
    let post = create_test_post(&pool, user.id, "threaded").await;
    let repo = CommentRepository::new(pool.clone());

    let mut first = Comment::new(post.id, user.id, "first".to_string());
    first.created_at = chrono::DateTime::from_timestamp(1_000, 0).unwrap();
    let mut second = Comment::new(post.id, user.id, "second".to_string());
    second.created_at = chrono::DateTime::from_timestamp(2_000, 0).unwrap();

    repo.create(&second).await.unwrap();
    repo.create(&first).await.unwrap();

    let listed = repo.find_approved_by_post(post.id).await.unwrap();

    assert_that!(listed.len(), eq(2));
    assert_that!(listed[0].content, eq("first"));
    assert_that!(listed[1].content, eq("second"));
}

#[tokio::test]
async fn given_comment_when_deleted_then_it_is_gone() {
    let pool = create_test_pool().await;
    let user = create_test_user(&pool, "alice@example.com").await;
    let post = create_test_post(&pool, user.id, "cleanup").await;
    let repo = CommentRepository::new(pool.clone());

    let comment = create_test_comment(&pool, post.id, user.id).await;
    repo.delete(comment.id).await.unwrap();

    let found = repo.find_by_id(comment.id).await.unwrap();
    assert_that!(found, none());
}
