pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    author_dto::AuthorDto,
    comments::{
        comment_dto::CommentDto,
        comment_list_response::CommentListResponse,
        comment_response::CommentResponse,
        comments::{create_comment, delete_comment, list_comments},
        create_comment_request::CreateCommentRequest,
    },
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::auth_user::{AuthUser, MaybeAuthUser},
    me::{me::get_me, me_response::MeResponse, profile_dto::ProfileDto, user_dto::UserDto},
    posts::{
        create_post_request::CreatePostRequest,
        list_posts_query::ListPostsQuery,
        post_detail_response::PostDetailResponse,
        post_dto::PostDto,
        post_list_response::PostListResponse,
        post_response::PostResponse,
        posts::{create_post, delete_post, get_post, list_posts, update_post},
        update_post_request::UpdatePostRequest,
    },
    tags::{
        create_tag_request::CreateTagRequest,
        tag_dto::TagDto,
        tag_list_response::TagListResponse,
        tag_response::TagResponse,
        tags::{create_tag, delete_tag, list_tags},
    },
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
