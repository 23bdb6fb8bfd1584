use crate::state::AppState;
use crate::{api, health};

use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Posts
        .route(
            "/api/v1/posts",
            get(api::posts::posts::list_posts).post(api::posts::posts::create_post),
        )
        .route(
            "/api/v1/posts/{slug}",
            get(api::posts::posts::get_post)
                .put(api::posts::posts::update_post)
                .delete(api::posts::posts::delete_post),
        )
        // Comments
        .route(
            "/api/v1/posts/{slug}/comments",
            get(api::comments::comments::list_comments).post(api::comments::comments::create_comment),
        )
        .route(
            "/api/v1/comments/{id}",
            delete(api::comments::comments::delete_comment),
        )
        // Tags
        .route(
            "/api/v1/tags",
            get(api::tags::tags::list_tags).post(api::tags::tags::create_tag),
        )
        .route("/api/v1/tags/{slug}", delete(api::tags::tags::delete_tag))
        // Identity
        .route("/api/v1/me", get(api::me::me::get_me))
        // Add shared state
        .with_state(state)
        // CORS middleware for browser clients
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
