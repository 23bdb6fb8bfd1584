//! Tag REST API handlers

use crate::api::sanitize_string;
use crate::state::AppState;
use crate::{
    ApiError, ApiResult, AuthUser, CreateTagRequest, DeleteResponse, MaybeAuthUser, TagDto,
    TagListResponse, TagResponse,
};

use blog_core::{Tag, slugify};
use blog_db::TagRepository;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State},
};
use error_location::ErrorLocation;

/// GET /api/v1/tags
pub async fn list_tags(
    State(state): State<AppState>,
    MaybeAuthUser(_user): MaybeAuthUser,
) -> ApiResult<Json<TagListResponse>> {
    let tags = TagRepository::new(state.pool.clone()).list_all().await?;

    Ok(Json(TagListResponse {
        tags: tags.into_iter().map(TagDto::from).collect(),
    }))
}

/// POST /api/v1/tags
pub async fn create_tag(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateTagRequest>,
) -> ApiResult<Json<TagResponse>> {
    let name = sanitize_string(&req.name);
    if name.is_empty() {
        return Err(ApiError::Validation {
            message: "name cannot be empty".to_string(),
            field: Some("name".into()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let slug = slugify(req.slug.as_deref().unwrap_or(&name));
    if slug.is_empty() {
        return Err(ApiError::Validation {
            message: "slug cannot be derived from the given value".to_string(),
            field: Some("slug".into()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let tag = Tag::new(name, slug);
    // Name and slug are both unique; the DB conflict maps to 409
    TagRepository::new(state.pool.clone()).create(&tag).await?;

    log::info!("Created tag '{}' by user {}", tag.slug, user.username);

    Ok(Json(TagResponse { tag: tag.into() }))
}

/// DELETE /api/v1/tags/:slug
pub async fn delete_tag(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let repo = TagRepository::new(state.pool.clone());
    let tag = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Tag '{}' not found", slug),
            location: ErrorLocation::from(Location::caller()),
        })?;

    repo.delete(tag.id).await?;

    log::info!("Deleted tag '{}' by user {}", slug, user.username);

    Ok(Json(DeleteResponse {
        deleted_id: tag.id.to_string(),
    }))
}
