//! Integration tests for post API handlers

mod common;

use crate::common::{body_json, create_test_app_state, get_request, json_request, mint_token};

use blog_server::build_router;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_post_success() {
    let (state, _provider) = create_test_app_state().await;
    let app = build_router(state);

    let token = mint_token("author-1", Some("alice@example.com"));
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            json!({
                "title": "My First Post",
                "content": "Hello world",
                "status": "published"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["post"]["title"], "My First Post");
    assert_eq!(json["post"]["slug"], "my-first-post");
    assert_eq!(json["post"]["status"], "published");
    assert_eq!(json["post"]["author"]["username"], "alice@example.com");
    assert!(json["post"]["published_at"].is_i64());
}

#[tokio::test]
async fn test_create_post_requires_authentication() {
    let (state, _provider) = create_test_app_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            None,
            json!({"title": "Nope", "content": "x"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_duplicate_slug_conflicts() {
    let (state, _provider) = create_test_app_state().await;
    let token = mint_token("author-1", Some("alice@example.com"));

    let first = build_router(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            json!({"title": "Taken", "content": "x", "status": "published"}),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = build_router(state)
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            json!({"title": "Other Title", "slug": "taken", "content": "y"}),
        ))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::CONFLICT);

    let json = body_json(second).await;
    assert_eq!(json["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_create_post_rejects_unknown_status() {
    let (state, _provider) = create_test_app_state().await;
    let app = build_router(state);

    let token = mint_token("author-1", Some("alice@example.com"));
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            json!({"title": "Bad", "content": "x", "status": "archived"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["field"], "status");
}

#[tokio::test]
async fn test_list_returns_published_only() {
    let (state, _provider) = create_test_app_state().await;
    let token = mint_token("author-1", Some("alice@example.com"));

    for (title, status) in [("Live Post", "published"), ("Hidden Draft", "draft")] {
        let response = build_router(state.clone())
            .oneshot(json_request(
                "POST",
                "/api/v1/posts",
                Some(&token),
                json!({"title": title, "content": "body", "status": status}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = build_router(state)
        .oneshot(get_request("/api/v1/posts", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["posts"][0]["slug"], "live-post");
}

#[tokio::test]
async fn test_list_search_matches_title() {
    let (state, _provider) = create_test_app_state().await;
    let token = mint_token("author-1", Some("alice@example.com"));

    for title in ["Async Rust Primer", "Cooking With Gas"] {
        build_router(state.clone())
            .oneshot(json_request(
                "POST",
                "/api/v1/posts",
                Some(&token),
                json!({"title": title, "content": "body", "status": "published"}),
            ))
            .await
            .unwrap();
    }

    let response = build_router(state)
        .oneshot(get_request("/api/v1/posts?q=rust", None))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["posts"][0]["slug"], "async-rust-primer");
}

#[tokio::test]
async fn test_list_pagination_clamps_and_pages() {
    let (state, _provider) = create_test_app_state().await;
    let token = mint_token("author-1", Some("alice@example.com"));

    for i in 0..3 {
        build_router(state.clone())
            .oneshot(json_request(
                "POST",
                "/api/v1/posts",
                Some(&token),
                json!({"title": format!("Post {}", i), "content": "body", "status": "published"}),
            ))
            .await
            .unwrap();
    }

    let response = build_router(state)
        .oneshot(get_request("/api/v1/posts?page=2&page_size=2", None))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["page"], 2);
    assert_eq!(json["page_size"], 2);
    assert_eq!(json["posts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_retrieve_increments_click_count() {
    let (state, _provider) = create_test_app_state().await;
    let token = mint_token("author-1", Some("alice@example.com"));

    build_router(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            json!({"title": "Clicked", "content": "body", "status": "published"}),
        ))
        .await
        .unwrap();

    for expected in 1..=2 {
        let response = build_router(state.clone())
            .oneshot(get_request("/api/v1/posts/clicked", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["post"]["click_count"], expected);
    }
}

#[tokio::test]
async fn test_retrieve_draft_is_not_found() {
    let (state, _provider) = create_test_app_state().await;
    let token = mint_token("author-1", Some("alice@example.com"));

    build_router(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            json!({"title": "Secret", "content": "body"}),
        ))
        .await
        .unwrap();

    let response = build_router(state)
        .oneshot(get_request("/api/v1/posts/secret", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_post_by_non_author_is_forbidden() {
    let (state, _provider) = create_test_app_state().await;

    let author = mint_token("author-1", Some("alice@example.com"));
    build_router(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&author),
            json!({"title": "Mine", "content": "body", "status": "published"}),
        ))
        .await
        .unwrap();

    let intruder = mint_token("author-2", Some("bob@example.com"));
    let response = build_router(state)
        .oneshot(json_request(
            "PUT",
            "/api/v1/posts/mine",
            Some(&intruder),
            json!({"title": "Stolen"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_post_publish_stamps_published_at() {
    let (state, _provider) = create_test_app_state().await;
    let token = mint_token("author-1", Some("alice@example.com"));

    let created = build_router(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            json!({"title": "Draft First", "content": "body"}),
        ))
        .await
        .unwrap();
    let created = body_json(created).await;
    assert!(created["post"]["published_at"].is_null());

    let response = build_router(state)
        .oneshot(json_request(
            "PUT",
            "/api/v1/posts/draft-first",
            Some(&token),
            json!({"status": "published"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["post"]["status"], "published");
    assert!(json["post"]["published_at"].is_i64());
}

#[tokio::test]
async fn test_delete_post_by_author() {
    let (state, _provider) = create_test_app_state().await;
    let token = mint_token("author-1", Some("alice@example.com"));

    build_router(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            json!({"title": "Doomed", "content": "body", "status": "published"}),
        ))
        .await
        .unwrap();

    let response = build_router(state.clone())
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri("/api/v1/posts/doomed")
                .header("Authorization", format!("Bearer {}", token))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let gone = build_router(state)
        .oneshot(get_request("/api/v1/posts/doomed", None))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_post_with_tags_attaches_known_slugs() {
    let (state, _provider) = create_test_app_state().await;
    let token = mint_token("author-1", Some("alice@example.com"));

    build_router(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/tags",
            Some(&token),
            json!({"name": "Rust"}),
        ))
        .await
        .unwrap();

    let response = build_router(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            json!({
                "title": "Tagged Post",
                "content": "body",
                "status": "published",
                "tags": ["rust", "unknown-tag"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let tags = json["post"]["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["slug"], "rust");

    // And the tag filter finds it
    let filtered = build_router(state)
        .oneshot(get_request("/api/v1/posts?tag=rust", None))
        .await
        .unwrap();
    let filtered = body_json(filtered).await;
    assert_eq!(filtered["total"], 1);
}
