//! Comment REST API handlers

use crate::api::sanitize_string;
use crate::state::AppState;
use crate::{
    ApiError, ApiResult, AuthUser, CommentDto, CommentListResponse, CommentResponse,
    CreateCommentRequest, DeleteResponse, MaybeAuthUser,
};

use blog_core::{Comment, Post};
use blog_db::{CommentRepository, PostRepository, UserRepository};

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State},
};
use error_location::ErrorLocation;
use uuid::Uuid;

const MAX_COMMENT_LENGTH: usize = 10_000;

/// GET /api/v1/posts/:slug/comments
pub async fn list_comments(
    State(state): State<AppState>,
    MaybeAuthUser(_user): MaybeAuthUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<CommentListResponse>> {
    let post = find_published_post(&state, &slug).await?;

    let comments = CommentRepository::new(state.pool.clone())
        .find_approved_by_post(post.id)
        .await?;

    let mut dtos = Vec::with_capacity(comments.len());
    for comment in comments {
        let author = match comment.author_id {
            Some(author_id) => {
                UserRepository::new(state.pool.clone())
                    .find_by_id(author_id)
                    .await?
            }
            None => None,
        };
        dtos.push(CommentDto::new(comment, author));
    }

    Ok(Json(CommentListResponse { comments: dtos }))
}

/// POST /api/v1/posts/:slug/comments
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(slug): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let post = find_published_post(&state, &slug).await?;

    let content = sanitize_string(&req.content);
    validate_comment(&content)?;

    let comment = Comment::new(post.id, user.id, content);
    CommentRepository::new(state.pool.clone())
        .create(&comment)
        .await?;

    log::info!("Created comment {} on post '{}'", comment.id, slug);

    Ok(Json(CommentResponse {
        comment: CommentDto::new(comment, Some(user)),
    }))
}

/// DELETE /api/v1/comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let comment_uuid = Uuid::parse_str(&comment_id)?;

    let repo = CommentRepository::new(state.pool.clone());
    let comment = repo
        .find_by_id(comment_uuid)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Comment {} not found", comment_id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    if comment.author_id != Some(user.id) {
        return Err(ApiError::Forbidden {
            message: "Only the author may delete this comment".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    repo.delete(comment_uuid).await?;

    log::info!("Deleted comment {} by user {}", comment_uuid, user.username);

    Ok(Json(DeleteResponse {
        deleted_id: comment_uuid.to_string(),
    }))
}

async fn find_published_post(state: &AppState, slug: &str) -> ApiResult<Post> {
    PostRepository::new(state.pool.clone())
        .find_published_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Post '{}' not found", slug),
            location: ErrorLocation::from(Location::caller()),
        })
}

#[track_caller]
fn validate_comment(content: &str) -> ApiResult<()> {
    if content.is_empty() {
        return Err(ApiError::Validation {
            message: "content cannot be empty".to_string(),
            field: Some("content".into()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if content.len() > MAX_COMMENT_LENGTH {
        return Err(ApiError::Validation {
            message: format!("content must not exceed {} characters", MAX_COMMENT_LENGTH),
            field: Some("content".into()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}
