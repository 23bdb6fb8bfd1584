mod common;

use common::{create_test_pool, create_test_tag};

use blog_core::Tag;
use blog_db::TagRepository;

use googletest::prelude::*;

#[tokio::test]
async fn given_tags_when_listed_then_ordered_by_name() {
    let pool = create_test_pool().await;
    let repo = TagRepository::new(pool.clone());

    create_test_tag(&pool, "Zig", "zig").await;
    create_test_tag(&pool, "Async", "async").await;
    create_test_tag(&pool, "Rust", "rust").await;

    let tags = repo.list_all().await.unwrap();

    let names: Vec<String> = tags.iter().map(|t| t.name.clone()).collect();
    assert_that!(names, elements_are![eq("Async"), eq("Rust"), eq("Zig")]);
}

#[tokio::test]
async fn given_duplicate_name_when_created_then_unique_violation_is_reported() {
    let pool = create_test_pool().await;
    let repo = TagRepository::new(pool.clone());

    create_test_tag(&pool, "Rust", "rust").await;
    let duplicate = Tag::new("Rust".to_string(), "rust-2".to_string());

    let result = repo.create(&duplicate).await;
    assert_that!(result.unwrap_err().is_unique_violation(), eq(true));
}

#[tokio::test]
async fn given_slugs_when_resolved_then_unknown_slugs_are_skipped() {
    let pool = create_test_pool().await;
    let repo = TagRepository::new(pool.clone());

    create_test_tag(&pool, "Rust", "rust").await;

    let tags = repo
        .find_by_slugs(&["rust".to_string(), "missing".to_string()])
        .await
        .unwrap();

    assert_that!(tags.len(), eq(1));
    assert_that!(tags[0].slug, eq("rust"));
}

#[tokio::test]
async fn given_tag_when_deleted_then_lookup_returns_none() {
    let pool = create_test_pool().await;
    let repo = TagRepository::new(pool.clone());

    let tag = create_test_tag(&pool, "Temp", "temp").await;
    repo.delete(tag.id).await.unwrap();

    let found = repo.find_by_slug("temp").await.unwrap();
    assert_that!(found, none());
}
