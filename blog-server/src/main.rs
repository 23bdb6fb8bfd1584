pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

pub use crate::routes::build_router;
pub use crate::state::AppState;
pub use api::{
    author_dto::AuthorDto,
    comments::{
        comment_dto::CommentDto, comment_list_response::CommentListResponse,
        comment_response::CommentResponse, create_comment_request::CreateCommentRequest,
    },
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::auth_user::{AuthUser, MaybeAuthUser},
    me::{me_response::MeResponse, profile_dto::ProfileDto, user_dto::UserDto},
    posts::{
        create_post_request::CreatePostRequest, list_posts_query::ListPostsQuery,
        post_detail_response::PostDetailResponse, post_dto::PostDto,
        post_list_response::PostListResponse, post_response::PostResponse,
        update_post_request::UpdatePostRequest,
    },
    tags::{
        create_tag_request::CreateTagRequest, tag_dto::TagDto, tag_list_response::TagListResponse,
        tag_response::TagResponse,
    },
};

use blog_auth::{AuthenticatorConfig, RequestRateLimiter, TokenAuthenticator};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = blog_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = blog_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting blog-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(Duration::from_secs(5))
                .foreign_keys(true),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    blog_db::MIGRATOR.run(&pool).await?;
    info!("Migrations complete");

    // Token authenticator against the configured identity provider
    let authenticator = Arc::new(TokenAuthenticator::new(
        AuthenticatorConfig {
            identity_provider_url: config.auth.identity_provider_url.clone(),
            jwks_ttl: Duration::from_secs(config.auth.jwks_ttl_secs),
            http_timeout: Duration::from_secs(config.auth.http_timeout_secs),
        },
        pool.clone(),
    )?);

    // Convert config types for blog-auth
    let rate_limiter = Arc::new(RequestRateLimiter::new(blog_auth::RateLimitConfig {
        user_max_requests: config.rate_limit.user_max_requests,
        anon_max_requests: config.rate_limit.anon_max_requests,
        window_secs: config.rate_limit.window_secs,
    }));

    // Build application state
    let app_state = AppState {
        pool,
        authenticator,
        rate_limiter,
        api_config: config.api.clone(),
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => warn!("Failed to listen for SIGINT: {}", e),
    }
}
