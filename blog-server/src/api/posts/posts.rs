//! Post REST API handlers

use crate::api::sanitize_string;
use crate::{
    ApiError, ApiResult, AuthUser, CommentDto, CreatePostRequest, DeleteResponse, ListPostsQuery,
    MaybeAuthUser, PostDetailResponse, PostDto, PostListResponse, PostResponse,
    UpdatePostRequest,
};
use crate::state::AppState;

use blog_core::{Post, PostStatus, User, slugify};
use blog_db::{
    CommentRepository, PostListFilter, PostRepository, TagRepository, UserRepository,
};

use std::panic::Location;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use error_location::ErrorLocation;

const MAX_TITLE_LENGTH: usize = 255;

/// GET /api/v1/posts
pub async fn list_posts(
    State(state): State<AppState>,
    MaybeAuthUser(_user): MaybeAuthUser,
    Query(query): Query<ListPostsQuery>,
) -> ApiResult<Json<PostListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .page_size
        .unwrap_or(state.api_config.default_page_size)
        .clamp(1, state.api_config.max_page_size);

    let filter = PostListFilter {
        query: query.q,
        tag_slug: query.tag,
        limit: page_size as i64,
        offset: (page as i64 - 1) * page_size as i64,
    };

    let repo = PostRepository::new(state.pool.clone());
    let result = repo.list_published(&filter).await?;

    let mut posts = Vec::with_capacity(result.posts.len());
    for post in result.posts {
        posts.push(assemble_dto(&state, post).await?);
    }

    Ok(Json(PostListResponse {
        posts,
        total: result.total,
        page,
        page_size,
    }))
}

/// GET /api/v1/posts/:slug
pub async fn get_post(
    State(state): State<AppState>,
    MaybeAuthUser(_user): MaybeAuthUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<PostDetailResponse>> {
    let repo = PostRepository::new(state.pool.clone());
    let mut post = repo
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Post '{}' not found", slug),
            location: ErrorLocation::from(Location::caller()),
        })?;

    // Every retrieve counts as a view
    repo.increment_click_count(post.id).await?;
    post.click_count += 1;

    let comments = CommentRepository::new(state.pool.clone())
        .find_approved_by_post(post.id)
        .await?;
    let mut comment_dtos = Vec::with_capacity(comments.len());
    for comment in comments {
        let author = load_comment_author(&state, &comment).await?;
        comment_dtos.push(CommentDto::new(comment, author));
    }

    let post = assemble_dto(&state, post).await?;

    Ok(Json(PostDetailResponse {
        post,
        comments: comment_dtos,
    }))
}

/// POST /api/v1/posts
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let title = sanitize_string(&req.title);
    validate_title(&title)?;
    let content = req.content.trim_end().to_string();
    validate_content(&content)?;

    let slug = resolve_slug(req.slug.as_deref(), &title)?;
    let status = parse_status(req.status.as_deref())?;

    let repo = PostRepository::new(state.pool.clone());
    if repo.slug_exists(&slug).await? {
        return Err(ApiError::Conflict {
            message: format!("Slug '{}' already exists", slug),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let post = Post::new(
        user.id,
        title,
        slug,
        content,
        req.excerpt.map(|e| sanitize_string(&e)).unwrap_or_default(),
        status,
    );
    repo.create(&post).await?;

    if let Some(tag_slugs) = req.tags {
        attach_tags(&state, &repo, &post, &tag_slugs).await?;
    }

    log::info!("Created post '{}' by user {}", post.slug, user.username);

    let post = assemble_dto(&state, post).await?;
    Ok(Json(PostResponse { post }))
}

/// PUT /api/v1/posts/:slug
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(slug): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let repo = PostRepository::new(state.pool.clone());
    let mut post = find_owned_post(&repo, &slug, &user).await?;

    if let Some(title) = req.title {
        post.title = sanitize_string(&title);
        validate_title(&post.title)?;
    }

    if let Some(requested) = req.slug {
        let new_slug = resolve_slug(Some(&requested), &post.title)?;
        if new_slug != post.slug {
            if repo.slug_exists(&new_slug).await? {
                return Err(ApiError::Conflict {
                    message: format!("Slug '{}' already exists", new_slug),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            post.slug = new_slug;
        }
    }

    if let Some(content) = req.content {
        post.content = content.trim_end().to_string();
        validate_content(&post.content)?;
    }

    if let Some(excerpt) = req.excerpt {
        post.excerpt = sanitize_string(&excerpt);
    }

    if let Some(status) = req.status.as_deref() {
        match parse_status(Some(status))? {
            PostStatus::Published => post.publish(),
            PostStatus::Draft => post.status = PostStatus::Draft,
        }
    }

    post.updated_at = Utc::now();
    repo.update(&post).await?;

    if let Some(tag_slugs) = req.tags {
        attach_tags(&state, &repo, &post, &tag_slugs).await?;
    }

    log::info!("Updated post '{}' by user {}", post.slug, user.username);

    let post = assemble_dto(&state, post).await?;
    Ok(Json(PostResponse { post }))
}

/// DELETE /api/v1/posts/:slug
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let repo = PostRepository::new(state.pool.clone());
    let post = find_owned_post(&repo, &slug, &user).await?;

    repo.delete(post.id).await?;

    log::info!("Deleted post '{}' by user {}", slug, user.username);

    Ok(Json(DeleteResponse {
        deleted_id: post.id.to_string(),
    }))
}

/// Look up a post by slug regardless of status and enforce authorship.
async fn find_owned_post(repo: &PostRepository, slug: &str, user: &User) -> ApiResult<Post> {
    let post = repo
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Post '{}' not found", slug),
            location: ErrorLocation::from(Location::caller()),
        })?;

    if post.author_id != user.id {
        return Err(ApiError::Forbidden {
            message: "Only the author may modify this post".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(post)
}

async fn assemble_dto(state: &AppState, post: Post) -> ApiResult<PostDto> {
    let author = UserRepository::new(state.pool.clone())
        .find_by_id(post.author_id)
        .await?
        .ok_or_else(|| ApiError::Internal {
            message: "Post author not found".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let tags = PostRepository::new(state.pool.clone())
        .tags_for_post(post.id)
        .await?;

    Ok(PostDto::new(post, author, tags))
}

async fn load_comment_author(
    state: &AppState,
    comment: &blog_core::Comment,
) -> ApiResult<Option<User>> {
    match comment.author_id {
        Some(author_id) => Ok(UserRepository::new(state.pool.clone())
            .find_by_id(author_id)
            .await?),
        None => Ok(None),
    }
}

async fn attach_tags(
    state: &AppState,
    repo: &PostRepository,
    post: &Post,
    tag_slugs: &[String],
) -> ApiResult<()> {
    let tags = TagRepository::new(state.pool.clone())
        .find_by_slugs(tag_slugs)
        .await?;
    let ids: Vec<_> = tags.into_iter().map(|t| t.id).collect();
    repo.set_tags(post.id, &ids).await?;
    Ok(())
}

#[track_caller]
fn validate_title(title: &str) -> ApiResult<()> {
    if title.is_empty() {
        return Err(ApiError::Validation {
            message: "title cannot be empty".to_string(),
            field: Some("title".into()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if title.len() > MAX_TITLE_LENGTH {
        return Err(ApiError::Validation {
            message: format!("title must not exceed {} characters", MAX_TITLE_LENGTH),
            field: Some("title".into()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}

#[track_caller]
fn validate_content(content: &str) -> ApiResult<()> {
    if content.trim().is_empty() {
        return Err(ApiError::Validation {
            message: "content cannot be empty".to_string(),
            field: Some("content".into()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}

/// Explicit slug wins; otherwise derive from the title. Either way the
/// result must survive slugification non-empty.
#[track_caller]
fn resolve_slug(requested: Option<&str>, title: &str) -> ApiResult<String> {
    let source = match requested {
        Some(s) if !s.trim().is_empty() => s,
        _ => title,
    };

    let slug = slugify(source);
    if slug.is_empty() {
        return Err(ApiError::Validation {
            message: "slug cannot be derived from the given value".to_string(),
            field: Some("slug".into()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(slug)
}

#[track_caller]
fn parse_status(status: Option<&str>) -> ApiResult<PostStatus> {
    match status {
        None => Ok(PostStatus::Draft),
        Some(s) => PostStatus::from_str(s).map_err(|_| ApiError::Validation {
            message: "status must be 'draft' or 'published'".to_string(),
            field: Some("status".into()),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
